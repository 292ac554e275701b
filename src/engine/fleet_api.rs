use super::helpers::closest_bus;
use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::FleetAPI,
    entities::{Arrival, Bus, Coordinates, Stop, Transfer},
    error::{invalid_input_error, no_bus_available_error, not_found_error, Error},
};

#[async_trait]
impl FleetAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_bus(
        &self,
        name: String,
        position: String,
        stops: Vec<Stop>,
    ) -> Result<Bus, Error> {
        let mut bus = Bus::new(name, &position)?;
        bus.stops = stops;

        if self.fleet.lock().await.iter().any(|b| b.name == bus.name) {
            return Err(duplicate_bus_error(&bus.name));
        }

        // routing happens unlocked so readers are not stalled behind OSRM
        bus.route = self.route_between(&bus.stop_coordinates()).await?;

        let mut fleet = self.fleet.lock().await;

        if fleet.iter().any(|b| b.name == bus.name) {
            return Err(duplicate_bus_error(&bus.name));
        }

        tracing::info!("registered bus {} with {} stops", bus.name, bus.stops.len());

        fleet.push(bus.clone());

        Ok(bus)
    }

    #[tracing::instrument(skip(self))]
    async fn list_buses(&self) -> Result<Vec<Bus>, Error> {
        Ok(self.fleet.lock().await.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn find_bus(&self, name: String) -> Result<Bus, Error> {
        self.fleet
            .lock()
            .await
            .iter()
            .find(|b| b.name == name)
            .cloned()
            .ok_or_else(|| not_found_error(format!("bus {}", name)))
    }

    #[tracing::instrument(skip(self))]
    async fn request_transfer(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Transfer, Error> {
        // held across the route refresh so transfers cannot interleave
        let mut fleet = self.fleet.lock().await;

        let index = closest_bus(&fleet, &origin).ok_or_else(no_bus_available_error)?;

        let mut bus = fleet[index].clone();
        let pickup = Stop::new(format!("{}-{}", bus.name, Uuid::new_v4()), origin);
        let dropoff = Stop::new(format!("{}-{}", bus.name, Uuid::new_v4()), destination);

        bus.add_stop(pickup.clone());
        bus.add_stop(dropoff.clone());

        tracing::info!("assigning transfer to bus {}", bus.name);

        // on failure the registered bus keeps its old stops and route
        bus.route = self.route_between(&bus.stop_coordinates()).await?;

        let transfer = Transfer::new(bus.name.clone(), pickup, dropoff);
        fleet[index] = bus;

        Ok(transfer)
    }

    #[tracing::instrument(skip(self))]
    async fn estimate_arrival(&self, name: String, target: Coordinates) -> Result<Arrival, Error> {
        let bus = self.find_bus(name).await?;
        let distance_km = bus.position.haversine_km(&target);

        Ok(Arrival::estimate(
            bus.name,
            distance_km,
            self.average_speed_kmh,
        ))
    }
}

fn duplicate_bus_error(name: &str) -> Error {
    invalid_input_error(format!("bus {} already exists", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::time::Duration;
    use tokio_test::block_on;

    use crate::{
        config::Config,
        engine::testing::{DirectRouting, GatedRouting, ScriptedRouting},
        error::upstream_error,
    };

    fn stop(name: &str, lat: f64, lon: f64) -> Stop {
        Stop::new(name.into(), Coordinates::new(lat, lon))
    }

    fn direct_engine() -> Engine {
        Engine::new(Arc::new(DirectRouting), &Config::default())
    }

    #[test]
    fn created_bus_gets_its_route_assembled() {
        let engine = direct_engine();

        let bus = block_on(engine.create_bus(
            "S1".into(),
            "0,0".into(),
            vec![stop("a", 0.0, 0.0), stop("b", 0.0, 1.0), stop("c", 0.0, 2.0)],
        ))
        .unwrap();

        assert_eq!(bus.route.len(), 4);
        assert_eq!(block_on(engine.list_buses()).unwrap().len(), 1);
        assert_eq!(block_on(engine.find_bus("S1".into())).unwrap().name, "S1");
    }

    #[test]
    fn duplicate_or_malformed_buses_are_rejected() {
        let engine = direct_engine();
        block_on(engine.create_bus("S1".into(), "0,0".into(), vec![])).unwrap();

        let err = block_on(engine.create_bus("S1".into(), "1,1".into(), vec![])).unwrap_err();
        assert_eq!(err.code, 101);

        let err = block_on(engine.create_bus("S2".into(), "abc,def".into(), vec![])).unwrap_err();
        assert_eq!(err.code, 101);

        assert_eq!(block_on(engine.list_buses()).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn fleet_stays_readable_while_a_new_bus_is_routed() {
        let routing = Arc::new(GatedRouting::default());
        let engine = Arc::new(Engine::new(routing.clone(), &Config::default()));

        let creating = {
            let engine = engine.clone();
            tokio::spawn(async move {
                engine
                    .create_bus(
                        "S1".into(),
                        "0,0".into(),
                        vec![stop("a", 0.0, 0.0), stop("b", 0.0, 1.0)],
                    )
                    .await
            })
        };

        routing.entered.notified().await;

        let buses = tokio::time::timeout(Duration::from_secs(1), engine.list_buses())
            .await
            .expect("list_buses waited on routing")
            .unwrap();
        assert!(buses.is_empty());

        // same name registered while the first one is still routing
        engine
            .create_bus("S1".into(), "1,1".into(), vec![])
            .await
            .unwrap();

        routing.gate.notify_one();

        let err = creating.await.unwrap().unwrap_err();
        assert_eq!(err.code, 101);

        let buses = engine.list_buses().await.unwrap();
        assert_eq!(buses.len(), 1);
        assert_eq!(buses[0].position, Coordinates::new(1.0, 1.0));
    }

    #[test]
    fn unknown_bus_is_not_found() {
        let engine = direct_engine();

        let err = block_on(engine.find_bus("S9".into())).unwrap_err();
        assert_eq!(err.code, 104);
    }

    #[test]
    fn transfer_goes_to_the_closest_bus() {
        let engine = direct_engine();
        block_on(engine.create_bus(
            "S1".into(),
            "0,0".into(),
            vec![stop("a", 0.0, 0.0), stop("b", 0.0, 10.0)],
        ))
        .unwrap();
        block_on(engine.create_bus(
            "S2".into(),
            "0,0".into(),
            vec![stop("a", 0.0, 0.0), stop("c", 10.0, 0.0)],
        ))
        .unwrap();

        let transfer = block_on(
            engine.request_transfer(Coordinates::new(9.0, 1.0), Coordinates::new(5.0, 0.5)),
        )
        .unwrap();

        assert_eq!(transfer.bus, "S2");
        assert!(transfer.pickup.name.starts_with("S2-"));

        let bus = block_on(engine.find_bus("S2".into())).unwrap();
        let stops: Vec<Coordinates> = bus.stop_coordinates();
        assert_eq!(
            stops,
            vec![
                Coordinates::new(0.0, 0.0),
                Coordinates::new(5.0, 0.5),
                Coordinates::new(9.0, 1.0),
                Coordinates::new(10.0, 0.0),
            ]
        );
        assert_eq!(bus.route.len(), 6);
    }

    #[test]
    fn transfer_without_routed_buses_fails() {
        let engine = direct_engine();
        block_on(engine.create_bus("S1".into(), "0,0".into(), vec![])).unwrap();

        let err = block_on(
            engine.request_transfer(Coordinates::new(1.0, 1.0), Coordinates::new(2.0, 2.0)),
        )
        .unwrap_err();

        assert_eq!(err.code, 103);
    }

    #[test]
    fn failed_reroute_leaves_the_bus_unchanged() {
        let routing = ScriptedRouting::new(vec![
            Ok(vec![Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 10.0)]),
            Err(upstream_error("504 Gateway Timeout")),
        ]);
        let engine = Engine::new(routing.clone(), &Config::default());

        block_on(engine.create_bus(
            "S1".into(),
            "0,0".into(),
            vec![stop("a", 0.0, 0.0), stop("b", 0.0, 10.0)],
        ))
        .unwrap();

        let err = block_on(
            engine.request_transfer(Coordinates::new(0.0, 5.0), Coordinates::new(0.0, 8.0)),
        )
        .unwrap_err();
        assert_eq!(err.code, 4);

        let bus = block_on(engine.find_bus("S1".into())).unwrap();
        assert_eq!(bus.stops.len(), 2);
        assert_eq!(bus.route.len(), 2);
    }

    #[test]
    fn arrival_is_estimated_from_the_bus_position() {
        let engine = direct_engine();
        block_on(engine.create_bus("S1".into(), "0,0".into(), vec![])).unwrap();

        let arrival =
            block_on(engine.estimate_arrival("S1".into(), Coordinates::new(0.1, 0.0))).unwrap();

        assert_eq!(arrival.bus, "S1");
        assert!((arrival.distance_km - 11.12).abs() < 0.01);
        assert_eq!(arrival.minutes, 23);
    }
}
