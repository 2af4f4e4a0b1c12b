mod error;
mod registry;
mod render;
mod routes;
mod state;
mod trips;

#[cfg(test)]
mod test_support;

use actix_web::{web, App, HttpServer};
use hazard_config::{DetourConfig, ProviderConfig, ServiceConfig};
use hazard_observability::{init, log_startup, ObservabilityConfig, StartupSummary};
use hazard_routing::{build_http_client, NominatimGeocoder, OsrmRouter};
use state::AppState;
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = ServiceConfig::from_env("hazard-web");
    let obs_config = ObservabilityConfig {
        service_name: config.service_name.clone(),
        environment: config.environment.to_string(),
        log_level: config.log_level.clone(),
        metrics_addr: config.metrics_addr.clone(),
    };
    let handle = init(&obs_config);

    let providers = ProviderConfig::from_env();
    let detour = DetourConfig::from_env();
    let client = build_http_client(&providers.user_agent, providers.timeout()).map_err(io_error)?;
    let geocoder =
        NominatimGeocoder::new(client.clone(), &providers.geocoder_url).map_err(io_error)?;
    let router = OsrmRouter::new(client, &providers.router_url)
        .map_err(io_error)?
        .with_profile(providers.router_profile.clone());
    log_startup(
        &handle,
        &StartupSummary {
            bind_addr: &config.bind_addr,
            geocoder_url: &providers.geocoder_url,
            router_url: &providers.router_url,
            router_profile: &providers.router_profile,
            timeout_ms: providers.timeout_ms,
            report_radius_m: detour.report_radius_m,
            detour_offset_deg: detour.detour_offset_deg,
        },
    );

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config, detour, Arc::new(geocoder), Arc::new(router))
        .map_err(io_error)?;
    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}

fn io_error(err: impl std::fmt::Display) -> io::Error {
    io::Error::other(err.to_string())
}
