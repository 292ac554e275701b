use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::FleetAPI;
use crate::entities::{Coordinates, Transfer};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    origin: String,
    destination: String,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Transfer>, Error> {
    let origin: Coordinates = params.origin.parse()?;
    let destination: Coordinates = params.destination.parse()?;

    let transfer = api.request_transfer(origin, destination).await?;

    Ok(transfer.into())
}
