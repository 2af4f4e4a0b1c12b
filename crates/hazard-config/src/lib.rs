use hazard_geo::{GeometryParams, DETOUR_OFFSET_DEG, REPORT_BUFFER_M};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{env, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Local,
    Dev,
    Test,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_env(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "local" => Self::Local,
            "dev" | "development" => Self::Dev,
            "test" | "testing" => Self::Test,
            "staging" => Self::Staging,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Prod => "prod",
        };
        write!(f, "{}", value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub service_name: String,
    pub environment: Environment,
    pub bind_addr: String,
    pub metrics_addr: Option<String>,
    pub log_level: String,
}

impl ServiceConfig {
    pub fn from_env(default_service_name: &str) -> Self {
        let service_name = env_var("HAZARD_SERVICE_NAME", default_service_name.to_string());
        let environment = Environment::from_env(&env_var("HAZARD_ENV", "local".to_string()));
        let bind_addr = env_var("HAZARD_BIND_ADDR", "0.0.0.0:8080".to_string());
        let metrics_addr = env::var("HAZARD_METRICS_ADDR").ok();
        let log_level = env_var("HAZARD_LOG_LEVEL", "info".to_string());

        Self {
            service_name,
            environment,
            bind_addr,
            metrics_addr,
            log_level,
        }
    }
}

/// Endpoints and transport settings for the geocoding and routing services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub geocoder_url: String,
    pub router_url: String,
    pub router_profile: String,
    pub user_agent: String,
    pub timeout_ms: u64,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self {
            geocoder_url: env_var(
                "HAZARD_GEOCODER_URL",
                "https://nominatim.openstreetmap.org".to_string(),
            ),
            router_url: env_var(
                "HAZARD_ROUTER_URL",
                "https://router.project-osrm.org".to_string(),
            ),
            router_profile: env_var("HAZARD_ROUTER_PROFILE", "driving".to_string()),
            user_agent: env_var(
                "HAZARD_USER_AGENT",
                format!("hazard-route/{}", env!("CARGO_PKG_VERSION")),
            ),
            timeout_ms: env_var_u64("HAZARD_HTTP_TIMEOUT_MS", 10_000).max(1),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DetourConfig {
    pub report_radius_m: f64,
    pub detour_offset_deg: f64,
}

impl DetourConfig {
    pub fn from_env() -> Self {
        Self {
            report_radius_m: positive_or(
                env_var_f64("HAZARD_REPORT_RADIUS_M"),
                REPORT_BUFFER_M,
            ),
            detour_offset_deg: positive_or(
                env_var_f64("HAZARD_DETOUR_OFFSET_DEG"),
                DETOUR_OFFSET_DEG,
            ),
        }
    }
}

impl Default for DetourConfig {
    fn default() -> Self {
        Self {
            report_radius_m: REPORT_BUFFER_M,
            detour_offset_deg: DETOUR_OFFSET_DEG,
        }
    }
}

impl From<DetourConfig> for GeometryParams {
    fn from(config: DetourConfig) -> Self {
        Self {
            report_radius_m: config.report_radius_m,
            detour_offset_deg: config.detour_offset_deg,
        }
    }
}

fn env_var(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn env_var_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_var_f64(key: &str) -> Option<f64> {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<f64>().ok())
}

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    value
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(default)
}
