use actix_web::{get, web, HttpResponse};
use hazard_core::ReportId;

use crate::error::ApiError;
use crate::render::{report_context, trip_context, REPORT_POPUP, TRIP_STATUS};
use crate::state::AppState;

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type("text/html; charset=utf-8").body(body)
}

#[get("/partials/reports/{id}")]
pub async fn report_popup(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id: ReportId = path
        .parse()
        .map_err(|_| ApiError::bad_request("invalid report id"))?;
    let report = state
        .registry
        .report(id)
        .ok_or_else(|| ApiError::not_found(format!("hazard report {id} not found")))?;
    let body = state.tera.render(REPORT_POPUP, &report_context(&report))?;
    Ok(html(body))
}

#[get("/partials/trips/latest")]
pub async fn trip_status(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let latest = state.trips.latest();
    let body = state
        .tera
        .render(TRIP_STATUS, &trip_context(latest.as_ref().map(|(_, trip)| trip)))?;
    Ok(html(body))
}
