use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    entities::Coordinates,
    error::{decode_error, no_route_found_error, unexpected_error, upstream_error, Error},
    external::RoutingService,
};

const POLYLINE_PRECISION: u32 = 5;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    code: Option<String>,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Route {
    geometry: String,
}

#[derive(Clone, Debug)]
pub struct OsrmClient {
    client: reqwest::Client,
    api_base: String,
    profile: String,
}

impl OsrmClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tora/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()
            .map_err(unexpected_error)?;

        Ok(Self {
            client,
            api_base: config.osrm_api_base.clone(),
            profile: config.osrm_profile.clone(),
        })
    }

    // OSRM wants longitude first
    fn route_url(&self, start: &Coordinates, end: &Coordinates) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.api_base, self.profile, start.lon, start.lat, end.lon, end.lat
        )
    }
}

#[async_trait]
impl RoutingService for OsrmClient {
    #[tracing::instrument(skip(self))]
    async fn find_segment(
        &self,
        start: Coordinates,
        end: Coordinates,
    ) -> Result<Vec<Coordinates>, Error> {
        let url = self.route_url(&start, &end);

        let res = self
            .client
            .get(url)
            .query(&[("overview", "full")])
            .query(&[("geometries", "polyline")])
            .send()
            .await?;

        let status = res.status();

        if !status.is_success() {
            tracing::warn!("OSRM returned HTTP {}", status);
            return Err(upstream_error(status));
        }

        // a body that stalls or drops is a transport failure, not bad data
        let body = res.bytes().await?;
        let data: Response = serde_json::from_slice(&body).map_err(decode_error)?;

        if let Some(code) = data.code.as_deref() {
            if code != "Ok" {
                tracing::warn!("OSRM answered with code {}", code);
                return Err(upstream_error(code));
            }
        }

        // alternates, if any, are ignored
        let route = data.routes.first().ok_or_else(no_route_found_error)?;

        decode_geometry(&route.geometry)
    }
}

pub fn decode_geometry(geometry: &str) -> Result<Vec<Coordinates>, Error> {
    let line = polyline::decode_polyline(geometry, POLYLINE_PRECISION).map_err(decode_error)?;

    Ok(line
        .coords()
        .map(|c| Coordinates::new(c.y, c.x))
        .collect())
}
