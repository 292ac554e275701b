use super::helpers::stop_coordinates;
use super::Engine;

use async_trait::async_trait;

use crate::{api::RouteAPI, entities::Coordinates, error::Error};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn assemble_route(&self, stops: Vec<Vec<f64>>) -> Result<Vec<Coordinates>, Error> {
        // validate everything before the first request goes out
        let stops = stops
            .iter()
            .map(|raw| stop_coordinates(raw))
            .collect::<Result<Vec<_>, _>>()?;

        self.route_between(&stops).await
    }
}

impl Engine {
    /// Concatenates the driving path between each consecutive pair of stops.
    ///
    /// Segments are fetched one after another; the first failure aborts the
    /// whole route. Shared boundary points are kept as returned.
    #[tracing::instrument(skip(self))]
    pub async fn route_between(&self, stops: &[Coordinates]) -> Result<Vec<Coordinates>, Error> {
        let mut route = Vec::new();

        for (i, pair) in stops.windows(2).enumerate() {
            let segment = self.routing.find_segment(pair[0], pair[1]).await?;

            tracing::debug!("segment {} has {} points", i, segment.len());

            route.extend(segment);
        }

        tracing::info!("assembled route with {} points", route.len());

        Ok(route)
    }
}
