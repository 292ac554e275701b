pub mod osrm;

use async_trait::async_trait;
use std::sync::Arc;

use crate::{entities::Coordinates, error::Error};

/// Source of point-to-point driving paths.
#[async_trait]
pub trait RoutingService {
    async fn find_segment(
        &self,
        start: Coordinates,
        end: Coordinates,
    ) -> Result<Vec<Coordinates>, Error>;
}

pub type DynRoutingService = Arc<dyn RoutingService + Send + Sync>;
