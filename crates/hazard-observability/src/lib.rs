//! Logging and metrics bootstrap for the hazard route service.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub service_name: String,
    pub environment: String,
    pub log_level: String,
    pub metrics_addr: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ObservabilityHandle {
    pub service_name: String,
    pub environment: String,
    /// Address the Prometheus exporter listens on, when one was installed.
    pub metrics_addr: Option<SocketAddr>,
}

impl ObservabilityHandle {
    pub fn metrics_enabled(&self) -> bool {
        self.metrics_addr.is_some()
    }
}

/// Settings worth one line in the log when the service boots.
#[derive(Debug, Clone)]
pub struct StartupSummary<'a> {
    pub bind_addr: &'a str,
    pub geocoder_url: &'a str,
    pub router_url: &'a str,
    pub router_profile: &'a str,
    pub timeout_ms: u64,
    pub report_radius_m: f64,
    pub detour_offset_deg: f64,
}

pub fn init(config: &ObservabilityConfig) -> ObservabilityHandle {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);

    let metrics_addr = metrics_listen_addr(config).filter(|addr| install_exporter(config, *addr));
    if metrics_addr.is_some() {
        describe_metrics();
    }

    ObservabilityHandle {
        service_name: config.service_name.clone(),
        environment: config.environment.clone(),
        metrics_addr,
    }
}

pub fn log_startup(handle: &ObservabilityHandle, summary: &StartupSummary<'_>) {
    tracing::info!(
        service = %handle.service_name,
        environment = %handle.environment,
        bind_addr = %summary.bind_addr,
        metrics_addr = ?handle.metrics_addr,
        geocoder = %summary.geocoder_url,
        router = %summary.router_url,
        router_profile = %summary.router_profile,
        timeout_ms = summary.timeout_ms,
        report_radius_m = summary.report_radius_m,
        detour_offset_deg = summary.detour_offset_deg,
        "Hazard route service starting"
    );
}

fn describe_metrics() {
    metrics::describe_counter!(
        "hazard_evaluations_total",
        "Routes checked against the hazard set, labelled by whether they were blocked"
    );
    metrics::describe_counter!("hazard_detours_total", "Detour attempts by outcome");
    metrics::describe_counter!(
        "hazard_evaluations_superseded_total",
        "Evaluations discarded because a newer request started first"
    );
}

fn metrics_listen_addr(config: &ObservabilityConfig) -> Option<SocketAddr> {
    let raw = config.metrics_addr.as_deref()?;
    match raw.parse() {
        Ok(addr) => Some(addr),
        Err(err) => {
            tracing::warn!(
                service = %config.service_name,
                value = %raw,
                error = %err,
                "Invalid HAZARD_METRICS_ADDR value, metrics disabled"
            );
            None
        }
    }
}

fn install_exporter(config: &ObservabilityConfig, addr: SocketAddr) -> bool {
    let builder = PrometheusBuilder::new()
        .with_http_listener(addr)
        .add_global_label("service", config.service_name.clone())
        .add_global_label("environment", config.environment.clone());

    match builder.install() {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(
                service = %config.service_name,
                %addr,
                error = %err,
                "Failed to initialize Prometheus exporter"
            );
            false
        }
    }
}
