use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, Stop};
use crate::error::Error;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bus {
    pub name: String,
    pub position: Coordinates,
    #[serde(default)]
    pub stops: Vec<Stop>,
    #[serde(default)]
    pub route: Vec<Coordinates>,
}

impl Bus {
    /// Builds a bus at `position`, given as `"<lat>,<lon>"`.
    pub fn new(name: String, position: &str) -> Result<Self, Error> {
        let position: Coordinates = position.parse()?;

        Ok(Self {
            name,
            position,
            stops: Vec::new(),
            route: Vec::new(),
        })
    }

    pub fn stop_coordinates(&self) -> Vec<Coordinates> {
        self.stops.iter().map(|stop| stop.coordinates).collect()
    }

    /// Index at which `new_stop` adds the least detour between two
    /// consecutive stops. Past the end when there are fewer than two stops.
    pub fn insertion_index(&self, new_stop: &Coordinates) -> usize {
        let mut min_increase = f64::INFINITY;
        let mut insert_index = self.stops.len();

        for (i, pair) in self.stops.windows(2).enumerate() {
            let (a, b) = (&pair[0].coordinates, &pair[1].coordinates);
            let increase =
                a.squared_distance(new_stop) + new_stop.squared_distance(b) - a.squared_distance(b);

            if increase < min_increase {
                min_increase = increase;
                insert_index = i + 1;
            }
        }

        insert_index
    }

    #[tracing::instrument(skip(self), fields(bus = %self.name))]
    pub fn add_stop(&mut self, stop: Stop) -> usize {
        let index = self.insertion_index(&stop.coordinates);
        self.stops.insert(index, stop);

        index
    }

    /// Squared distance from `origin` to the nearest point on the route, if any.
    pub fn closest_route_distance(&self, origin: &Coordinates) -> Option<f64> {
        self.route
            .iter()
            .map(|point| origin.squared_distance(point))
            .fold(None, |best, d| match best {
                Some(b) if b <= d => Some(b),
                _ => Some(d),
            })
    }
}
