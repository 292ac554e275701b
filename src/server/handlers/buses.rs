use axum::extract::{Extension, Json, Path, Query};
use serde::{Deserialize, Serialize};

use crate::api::FleetAPI;
use crate::entities::{Arrival, Bus, Coordinates, Stop};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    name: String,
    position: String,
    #[serde(default)]
    stops: Vec<Stop>,
}

#[derive(Serialize, Deserialize)]
pub struct ArrivalParams {
    target: String,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Bus>, Error> {
    let bus = api
        .create_bus(params.name, params.position, params.stops)
        .await?;

    Ok(bus.into())
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Bus>>, Error> {
    let buses = api.list_buses().await?;

    Ok(buses.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(name): Path<String>,
) -> Result<Json<Bus>, Error> {
    let bus = api.find_bus(name).await?;

    Ok(bus.into())
}

pub async fn arrival(
    Extension(api): Extension<DynAPI>,
    Path(name): Path<String>,
    Query(params): Query<ArrivalParams>,
) -> Result<Json<Arrival>, Error> {
    let target: Coordinates = params.target.parse()?;
    let arrival = api.estimate_arrival(name, target).await?;

    Ok(arrival.into())
}
