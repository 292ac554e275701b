use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Stop;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transfer {
    pub bus: String,
    pub pickup: Stop,
    pub dropoff: Stop,
    pub requested_at: DateTime<Utc>,
}

impl Transfer {
    pub fn new(bus: String, pickup: Stop, dropoff: Stop) -> Self {
        Self {
            bus,
            pickup,
            dropoff,
            requested_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Arrival {
    pub bus: String,
    pub distance_km: f64,
    pub minutes: u32,
}

impl Arrival {
    pub fn estimate(bus: String, distance_km: f64, speed_kmh: f64) -> Self {
        let minutes = (distance_km / speed_kmh * 60.0).ceil() as u32;

        Self {
            bus,
            distance_km,
            minutes,
        }
    }
}

#[test]
fn arrival_minutes_round_up() {
    let arrival = Arrival::estimate("S1".into(), 10.1, 30.0);
    assert_eq!(arrival.minutes, 21);

    let arrival = Arrival::estimate("S1".into(), 0.0, 30.0);
    assert_eq!(arrival.minutes, 0);
}
