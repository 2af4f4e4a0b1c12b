use hazard_geo::{Coordinate, HazardRef, Route};
use hazard_routing::{Detour, Ticket, TripPlan};
use serde::Serialize;

/// Display-ready outcome of one trip request.
#[derive(Debug, Clone, Serialize)]
pub struct TripRecord {
    pub ticket: Ticket,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub route: Route,
    pub hazard: bool,
    pub blocking: Vec<HazardRef>,
    pub alternate: Option<Route>,
    pub detour: Option<Detour>,
}

impl TripRecord {
    pub fn new(ticket: Ticket, plan: TripPlan) -> Self {
        let TripPlan {
            origin,
            destination,
            route,
            evaluation,
        } = plan;
        let alternate = evaluation.alternate().cloned();
        Self {
            ticket,
            origin,
            destination,
            route,
            hazard: evaluation.hazard,
            blocking: evaluation.blocking,
            alternate,
            detour: evaluation.detour,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TripResponse {
    #[serde(flatten)]
    pub trip: TripRecord,
    /// A newer request started before this one finished; the result was not
    /// stored as the latest trip.
    pub superseded: bool,
}
