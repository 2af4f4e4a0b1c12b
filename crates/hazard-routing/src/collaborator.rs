use async_trait::async_trait;
use hazard_core::HazardResult;
use hazard_geo::{Coordinate, Route};

/// Resolves free-text addresses to a single best-match point.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when the service has no match for `address`.
    async fn geocode(&self, address: &str) -> HazardResult<Option<Coordinate>>;
}

/// Produces driving routes between two points. Must tolerate concurrent
/// calls, the detour planner requests both legs at once.
#[async_trait]
pub trait Router: Send + Sync {
    /// `Ok(None)` when no route exists between the two points.
    async fn route(&self, from: Coordinate, to: Coordinate) -> HazardResult<Option<Route>>;
}
