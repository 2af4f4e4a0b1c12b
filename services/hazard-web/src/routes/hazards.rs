use actix_web::{delete, get, post, web, HttpResponse};
use hazard_core::AreaId;
use hazard_geo::{AreaKind, Coordinate, Severity};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub severity: Severity,
}

#[derive(Debug, Deserialize)]
pub struct AreaRequest {
    #[serde(default = "default_area_kind")]
    pub kind: AreaKind,
    pub rings: Vec<Vec<Coordinate>>,
}

fn default_area_kind() -> AreaKind {
    AreaKind::Polygon
}

#[get("/v1/hazards")]
pub async fn list(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.registry.snapshot())
}

#[post("/v1/hazards/reports")]
pub async fn create_report(
    state: web::Data<AppState>,
    body: web::Json<ReportRequest>,
) -> Result<HttpResponse, ApiError> {
    let location = Coordinate::new(body.latitude, body.longitude);
    let report = state.registry.add_report(location, body.severity)?;
    Ok(HttpResponse::Created().json(report))
}

#[post("/v1/hazards/areas")]
pub async fn create_area(
    state: web::Data<AppState>,
    body: web::Json<AreaRequest>,
) -> Result<HttpResponse, ApiError> {
    let AreaRequest { kind, rings } = body.into_inner();
    let area = state.registry.add_area(kind, rings).inspect_err(|err| {
        tracing::warn!(error = %err, "Rejected hazard area");
    })?;
    tracing::info!(area_id = %area.id, kind = ?area.kind, "Hazard area drawn");
    Ok(HttpResponse::Created().json(area))
}

#[delete("/v1/hazards/areas/{id}")]
pub async fn delete_area(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id: AreaId = path
        .parse()
        .map_err(|_| ApiError::bad_request("invalid area id"))?;
    if !state.registry.remove_area(id) {
        return Err(ApiError::not_found(format!("hazard area {id} not found")));
    }
    Ok(HttpResponse::NoContent().finish())
}

/// Clears every report, area and the latest trip. Evaluations still in
/// flight can no longer be stored.
#[post("/v1/reset")]
pub async fn reset(state: web::Data<AppState>) -> HttpResponse {
    state.registry.reset();
    state.trips.reset();
    tracing::info!("Session hazards cleared");
    HttpResponse::NoContent().finish()
}
