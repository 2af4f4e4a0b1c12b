use actix_web::{get, post, web, HttpResponse};
use hazard_routing::plan_trip;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;
use crate::trips::{TripRecord, TripResponse};

#[derive(Debug, Deserialize)]
pub struct TripRequest {
    pub start: String,
    pub end: String,
}

/// Geocodes both addresses, routes between them and checks the route against
/// the hazards present when the request arrived.
#[post("/v1/trips")]
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<TripRequest>,
) -> Result<HttpResponse, ApiError> {
    let ticket = state.trips.begin();
    let hazards = state.registry.snapshot();
    let plan = match plan_trip(
        &state.planner,
        &body.start,
        &body.end,
        &hazards,
        &*state.geocoder,
        &*state.router,
    )
    .await
    {
        Ok(plan) => plan,
        Err(err) => {
            state.trips.discard(ticket);
            tracing::info!(ticket = ticket.value(), error = %err, "Trip request failed");
            return Err(err.into());
        }
    };

    let trip = TripRecord::new(ticket, plan);
    let stored = state.trips.commit(ticket, trip.clone());
    if !stored {
        metrics::counter!("hazard_evaluations_superseded_total").increment(1);
        tracing::info!(ticket = ticket.value(), "Discarding superseded trip evaluation");
    }
    Ok(HttpResponse::Ok().json(TripResponse {
        trip,
        superseded: !stored,
    }))
}

#[get("/v1/trips/latest")]
pub async fn latest(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let (_, trip) = state
        .trips
        .latest()
        .ok_or_else(|| ApiError::not_found("no trip evaluated yet"))?;
    Ok(HttpResponse::Ok().json(trip))
}
