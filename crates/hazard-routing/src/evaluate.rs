use hazard_core::{ErrorCode, HazardError, HazardResult};
use hazard_geo::{blocking_hazards, intersects_with, Coordinate, HazardRef, HazardSet, Route};
use serde::Serialize;

use crate::collaborator::{Geocoder, Router};
use crate::planner::{Detour, DetourPlanner};

/// Outcome of checking one route against a hazard snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub hazard: bool,
    pub blocking: Vec<HazardRef>,
    pub detour: Option<Detour>,
}

impl Evaluation {
    pub fn clear() -> Self {
        Self {
            hazard: false,
            blocking: Vec::new(),
            detour: None,
        }
    }

    pub fn alternate(&self) -> Option<&Route> {
        self.detour.as_ref().map(|detour| &detour.route)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPlan {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub route: Route,
    pub evaluation: Evaluation,
}

/// Runs the intersection check and, when the route is blocked, the detour
/// planner. A failed detour leaves `hazard` set with no alternate.
pub async fn evaluate<R: Router + ?Sized>(
    planner: &DetourPlanner,
    route: &Route,
    origin: Coordinate,
    hazards: &HazardSet,
    router: &R,
) -> Evaluation {
    let params = planner.params();
    if !intersects_with(route, hazards, params) {
        metrics::counter!("hazard_evaluations_total", "blocked" => "false").increment(1);
        return Evaluation::clear();
    }
    metrics::counter!("hazard_evaluations_total", "blocked" => "true").increment(1);

    let blocking = blocking_hazards(route, hazards, params);
    let detour = planner.plan(route, origin, hazards, router).await;
    tracing::info!(
        blocking = blocking.len(),
        alternate = detour.is_some(),
        "Route crosses hazard zone"
    );
    Evaluation {
        hazard: true,
        blocking,
        detour,
    }
}

/// Geocodes both addresses, fetches the primary route and evaluates it.
pub async fn plan_trip<G, R>(
    planner: &DetourPlanner,
    start: &str,
    end: &str,
    hazards: &HazardSet,
    geocoder: &G,
    router: &R,
) -> HazardResult<TripPlan>
where
    G: Geocoder + ?Sized,
    R: Router + ?Sized,
{
    let (origin, destination) = tokio::join!(geocoder.geocode(start), geocoder.geocode(end));
    let origin = resolved(start, origin)?;
    let destination = resolved(end, destination)?;

    let route = match router.route(origin, destination).await {
        Ok(Some(route)) => route,
        Ok(None) => {
            return Err(HazardError::new(ErrorCode::RoutingFailure, "no route found"));
        }
        Err(err) => {
            tracing::warn!(error = %err, "Primary route request failed");
            return Err(HazardError::new(ErrorCode::RoutingFailure, "no route found"));
        }
    };

    let evaluation = evaluate(planner, &route, origin, hazards, router).await;
    Ok(TripPlan {
        origin,
        destination,
        route,
        evaluation,
    })
}

fn resolved(address: &str, result: HazardResult<Option<Coordinate>>) -> HazardResult<Coordinate> {
    match result {
        Ok(Some(coord)) => Ok(coord),
        Ok(None) => Err(lookup_failure(address)),
        Err(err) => {
            tracing::warn!(address, error = %err, "Geocoding request failed");
            Err(lookup_failure(address))
        }
    }
}

fn lookup_failure(address: &str) -> HazardError {
    HazardError::new(
        ErrorCode::LookupFailure,
        format!("cannot resolve address {address:?}"),
    )
}
