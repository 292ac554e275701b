use std::str::FromStr;

use geo::HaversineDistance;
use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Squared planar distance in degrees. Only meaningful for ranking nearby points.
    pub fn squared_distance(&self, other: &Coordinates) -> f64 {
        (self.lat - other.lat).powi(2) + (self.lon - other.lon).powi(2)
    }

    /// Great-circle distance in kilometres.
    pub fn haversine_km(&self, other: &Coordinates) -> f64 {
        let a: Point<f64> = (*self).into();
        let b: Point<f64> = (*other).into();

        a.haversine_distance(&b) / 1000.0
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(c: Coordinates) -> Self {
        Point::new(c.lon, c.lat)
    }
}

impl From<Coordinates> for String {
    fn from(c: Coordinates) -> Self {
        format!("{},{}", c.lat, c.lon)
    }
}

/// Parses `"<lat>,<lon>"`. Malformed input is an error, never a zero default.
impl FromStr for Coordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');

        let (lat, lon) = match (parts.next(), parts.next(), parts.next()) {
            (Some(lat), Some(lon), None) => (lat.trim(), lon.trim()),
            _ => return Err(invalid_input_error(format!("{:?} is not a lat,lon pair", s))),
        };

        let lat: f64 = lat
            .parse()
            .map_err(|_| invalid_input_error(format!("latitude {:?} is not a number", lat)))?;
        let lon: f64 = lon
            .parse()
            .map_err(|_| invalid_input_error(format!("longitude {:?} is not a number", lon)))?;

        if !(lat.is_finite() && lon.is_finite()) {
            return Err(invalid_input_error(format!("{:?} is not a finite lat,lon pair", s)));
        }

        Ok(Self { lat, lon })
    }
}

#[test]
fn parses_well_formed_pairs_exactly() {
    let c: Coordinates = "35.17022784728593,33.35889554051766".parse().unwrap();
    assert_eq!(c, Coordinates::new(35.17022784728593, 33.35889554051766));

    let c: Coordinates = " -12.5 , 130 ".parse().unwrap();
    assert_eq!(c, Coordinates::new(-12.5, 130.0));
}

#[test]
fn rejects_malformed_pairs() {
    for input in ["abc,def", "40.0", "40.0,", "40.0,-73.0,12", "", "NaN,NaN", "inf,0", "0,-inf"] {
        let err = input.parse::<Coordinates>().unwrap_err();
        assert_eq!(err.code, 101, "{:?} should be invalid input", input);
    }
}

#[test]
fn out_of_range_values_are_kept() {
    let c: Coordinates = "123.0,-500.0".parse().unwrap();
    assert_eq!(c, Coordinates::new(123.0, -500.0));
}

#[test]
fn point_is_longitude_first() {
    let p: Point<f64> = Coordinates::new(40.0, -73.0).into();
    assert_eq!(p.x(), -73.0);
    assert_eq!(p.y(), 40.0);
}

#[test]
fn haversine_distance_of_one_degree_of_latitude() {
    let a = Coordinates::new(0.0, 0.0);
    let b = Coordinates::new(1.0, 0.0);

    let km = a.haversine_km(&b);
    assert!((km - 111.19).abs() < 0.1, "got {}", km);
}
