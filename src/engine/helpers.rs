use crate::{
    entities::{Bus, Coordinates},
    error::{invalid_input_error, Error},
};

/// Reads `[ignored, lat, lon, ...]`.
pub fn stop_coordinates(raw: &[f64]) -> Result<Coordinates, Error> {
    match raw {
        [_, lat, lon, ..] => Ok(Coordinates::new(*lat, *lon)),
        _ => Err(invalid_input_error(format!(
            "stop {:?} needs at least 3 values",
            raw
        ))),
    }
}

/// Index of the bus whose route passes nearest to `origin`. Ties go to the earlier bus.
pub fn closest_bus(buses: &[Bus], origin: &Coordinates) -> Option<usize> {
    let mut closest = None;
    let mut min_distance = f64::INFINITY;

    for (i, bus) in buses.iter().enumerate() {
        if let Some(d) = bus.closest_route_distance(origin) {
            if d < min_distance {
                min_distance = d;
                closest = Some(i);
            }
        }
    }

    closest
}

#[test]
fn stop_coordinates_skip_the_leading_value() {
    let c = stop_coordinates(&[7.0, 40.0, -73.0]).unwrap();
    assert_eq!(c, Coordinates::new(40.0, -73.0));

    let c = stop_coordinates(&[0.0, 40.0, -73.0, 99.0]).unwrap();
    assert_eq!(c, Coordinates::new(40.0, -73.0));

    let err = stop_coordinates(&[40.0, -73.0]).unwrap_err();
    assert_eq!(err.code, 101);
}

#[test]
fn closest_bus_compares_every_route_point() {
    let mut near = Bus::new("near".into(), "0,0").unwrap();
    near.route = vec![Coordinates::new(5.0, 5.0), Coordinates::new(1.0, 1.0)];

    let mut far = Bus::new("far".into(), "1,1").unwrap();
    far.route = vec![Coordinates::new(3.0, 3.0)];

    let idle = Bus::new("idle".into(), "0,0").unwrap();

    let buses = vec![far, idle, near];
    assert_eq!(closest_bus(&buses, &Coordinates::new(0.0, 0.0)), Some(2));
    assert_eq!(closest_bus(&buses[1..2], &Coordinates::new(0.0, 0.0)), None);
}
