use actix_web::web;
use async_trait::async_trait;
use hazard_config::{DetourConfig, Environment, ServiceConfig};
use hazard_core::{HazardError, HazardResult};
use hazard_geo::{Coordinate, Route};
use hazard_routing::{Geocoder, Router};
use std::sync::Arc;

use crate::state::AppState;

pub struct ScriptedGeocoder {
    places: Vec<(&'static str, Coordinate)>,
}

impl ScriptedGeocoder {
    pub fn hyderabad() -> Self {
        Self {
            places: vec![
                ("Ameerpet", Coordinate::new(17.30, 78.40)),
                ("Uppal", Coordinate::new(17.40, 78.50)),
            ],
        }
    }
}

#[async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn geocode(&self, address: &str) -> HazardResult<Option<Coordinate>> {
        Ok(self
            .places
            .iter()
            .find(|(name, _)| *name == address)
            .map(|(_, coord)| *coord))
    }
}

/// Routes every request as a straight two-point line, or fails every
/// request when unavailable.
pub struct StraightRouter {
    available: bool,
}

impl StraightRouter {
    pub fn new() -> Self {
        Self { available: true }
    }

    pub fn unavailable() -> Self {
        Self { available: false }
    }
}

#[async_trait]
impl Router for StraightRouter {
    async fn route(&self, from: Coordinate, to: Coordinate) -> HazardResult<Option<Route>> {
        if !self.available {
            return Err(HazardError::upstream("router offline"));
        }
        Route::new(vec![from, to]).map(Some)
    }
}

pub fn app_state_with(geocoder: Arc<dyn Geocoder>, router: Arc<dyn Router>) -> web::Data<AppState> {
    let config = ServiceConfig {
        service_name: "hazard-web-test".to_string(),
        environment: Environment::Test,
        bind_addr: "127.0.0.1:0".to_string(),
        metrics_addr: None,
        log_level: "debug".to_string(),
    };
    let state = AppState::new(config, DetourConfig::default(), geocoder, router).unwrap();
    web::Data::new(state)
}

pub fn app_state() -> web::Data<AppState> {
    app_state_with(Arc::new(ScriptedGeocoder::hyderabad()), Arc::new(StraightRouter::new()))
}

macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state)
                .configure(crate::routes::configure),
        )
        .await
    };
}

pub(crate) use init_app;
