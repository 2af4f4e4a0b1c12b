use hazard_config::{DetourConfig, ServiceConfig};
use hazard_geo::{GeometryParams, HazardReport};
use hazard_routing::{DetourPlanner, EvaluationTracker, Geocoder, Router};
use std::sync::Arc;
use tera::Tera;

use crate::registry::HazardRegistry;
use crate::render::load_templates;
use crate::trips::TripRecord;

pub struct AppState {
    pub config: ServiceConfig,
    pub tera: Tera,
    pub geocoder: Arc<dyn Geocoder>,
    pub router: Arc<dyn Router>,
    pub planner: DetourPlanner,
    pub registry: HazardRegistry,
    pub trips: EvaluationTracker<TripRecord>,
}

impl AppState {
    pub fn new(
        config: ServiceConfig,
        detour: DetourConfig,
        geocoder: Arc<dyn Geocoder>,
        router: Arc<dyn Router>,
    ) -> Result<Self, tera::Error> {
        let planner = DetourPlanner::new(GeometryParams::from(detour));
        let registry = HazardRegistry::new().with_listener(Box::new(|report: &HazardReport| {
            tracing::info!(
                report_id = %report.id,
                severity = ?report.severity,
                latitude = report.location.latitude,
                longitude = report.location.longitude,
                "Hazard reported"
            );
        }));
        Ok(Self {
            config,
            tera: load_templates()?,
            geocoder,
            router,
            planner,
            registry,
            trips: EvaluationTracker::new(),
        })
    }
}
