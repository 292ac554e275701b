mod fleet_api;
mod helpers;
mod route_api;

use tokio::sync::Mutex;

use crate::{api::API, config::Config, entities::Bus, external::DynRoutingService};

pub struct Engine {
    routing: DynRoutingService,
    fleet: Mutex<Vec<Bus>>,
    average_speed_kmh: f64,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(routing: DynRoutingService, config: &Config) -> Self {
        Self {
            routing,
            fleet: Mutex::new(Vec::new()),
            average_speed_kmh: config.average_speed_kmh,
        }
    }
}

impl API for Engine {}
