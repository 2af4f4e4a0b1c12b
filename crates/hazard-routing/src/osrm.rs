use async_trait::async_trait;
use hazard_core::HazardResult;
use hazard_geo::{Coordinate, Route};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::client::{join, parse_base_url, ClientError};
use crate::collaborator::Router;

/// Driving routes from an OSRM `route/v1` endpoint.
#[derive(Clone)]
pub struct OsrmRouter {
    client: Client,
    base_url: Url,
    profile: String,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: `[longitude, latitude]`.
    coordinates: Vec<[f64; 2]>,
}

impl OsrmRouter {
    pub fn new(client: Client, base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            profile: "driving".to_string(),
        })
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    fn route_url(&self, from: Coordinate, to: Coordinate) -> Result<Url, ClientError> {
        let path = format!(
            "route/v1/{}/{:.6},{:.6};{:.6},{:.6}",
            self.profile, from.longitude, from.latitude, to.longitude, to.latitude
        );
        let mut url = join(&self.base_url, &path)?;
        url.query_pairs_mut()
            .append_pair("overview", "full")
            .append_pair("geometries", "geojson");
        Ok(url)
    }
}

#[async_trait]
impl Router for OsrmRouter {
    async fn route(&self, from: Coordinate, to: Coordinate) -> HazardResult<Option<Route>> {
        let url = self.route_url(from, to)?;
        let response = self.client.get(url).send().await.map_err(ClientError::from)?;
        let status = response.status();
        let body = response.text().await.map_err(ClientError::from)?;
        // OSRM reports NoRoute and friends as 4xx with a JSON body.
        match serde_json::from_str::<OsrmResponse>(&body) {
            Ok(parsed) => Ok(parse_route(parsed)?),
            Err(_) if !status.is_success() => Err(ClientError::Status(status).into()),
            Err(err) => Err(ClientError::Decode(err.to_string()).into()),
        }
    }
}

fn parse_route(response: OsrmResponse) -> Result<Option<Route>, ClientError> {
    if response.code != "Ok" {
        tracing::debug!(
            code = %response.code,
            message = response.message.as_deref().unwrap_or(""),
            "OSRM returned no route"
        );
        return Ok(None);
    }
    let Some(first) = response.routes.into_iter().next() else {
        return Ok(None);
    };
    let points = first
        .geometry
        .coordinates
        .into_iter()
        .map(|[longitude, latitude]| Coordinate::new(latitude, longitude))
        .collect();
    Route::new(points)
        .map(Some)
        .map_err(|err| ClientError::Decode(err.message))
}
