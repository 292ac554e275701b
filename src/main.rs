use std::sync::Arc;

use tora::api::FleetAPI;
use tora::config::Config;
use tora::engine::Engine;
use tora::entities::{Coordinates, Stop};
use tora::external::osrm::OsrmClient;
use tora::server::serve;

const ELEFTHERIA: Coordinates = Coordinates {
    lat: 35.17022784728593,
    lon: 33.35889554051766,
};
const S1_END: Coordinates = Coordinates {
    lat: 35.13160429484031,
    lon: 33.299296813161504,
};
const S2_END: Coordinates = Coordinates {
    lat: 35.11338633948102,
    lon: 33.33255319068168,
};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env().unwrap();
    let routing = OsrmClient::new(&config).unwrap();
    let engine = Engine::new(Arc::new(routing), &config);

    // one bus per service area, both starting from Eleftheria square
    for (name, end) in [("S1", S1_END), ("S2", S2_END)] {
        let stops = vec![
            Stop::new("eleftheria".into(), ELEFTHERIA),
            Stop::new(format!("{}-end", name.to_lowercase()), end),
        ];

        if let Err(err) = engine
            .create_bus(name.into(), ELEFTHERIA.into(), stops)
            .await
        {
            tracing::warn!("could not put bus {} in service: {}", name, err);
        }
    }

    serve(engine, config.bind_addr).await.unwrap();
}
