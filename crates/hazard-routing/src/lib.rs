//! Route evaluation against hazards: the geocoding and routing collaborators,
//! detour planning and the evaluation flow that ties them together.

pub mod client;
pub mod collaborator;
pub mod evaluate;
pub mod nominatim;
pub mod osrm;
pub mod planner;
pub mod tracker;

pub use client::{build_http_client, ClientError};
pub use collaborator::{Geocoder, Router};
pub use evaluate::{evaluate, plan_trip, Evaluation, TripPlan};
pub use nominatim::NominatimGeocoder;
pub use osrm::OsrmRouter;
pub use planner::{plan_detour, Detour, DetourPlanner};
pub use tracker::{EvaluationTracker, Ticket};

#[cfg(test)]
pub(crate) mod testing;
