use async_trait::async_trait;

use crate::entities::{Arrival, Bus, Coordinates, Stop, Transfer};
use crate::error::Error;

#[async_trait]
pub trait RouteAPI {
    /// Each stop is `[ignored, lat, lon, ...]`.
    async fn assemble_route(&self, stops: Vec<Vec<f64>>) -> Result<Vec<Coordinates>, Error>;
}

#[async_trait]
pub trait FleetAPI {
    async fn create_bus(&self, name: String, position: String, stops: Vec<Stop>)
        -> Result<Bus, Error>;
    async fn list_buses(&self) -> Result<Vec<Bus>, Error>;
    async fn find_bus(&self, name: String) -> Result<Bus, Error>;
    async fn request_transfer(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Transfer, Error>;
    async fn estimate_arrival(&self, name: String, target: Coordinates) -> Result<Arrival, Error>;
}

pub trait API: RouteAPI + FleetAPI {}
