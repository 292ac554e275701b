use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::RouteAPI;
use crate::server::DynAPI;
use crate::{entities::Coordinates, error::Error};

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    stops: Vec<Vec<f64>>,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Vec<Coordinates>>, Error> {
    let route = api.assemble_route(params.stops).await?;

    Ok(route.into())
}
