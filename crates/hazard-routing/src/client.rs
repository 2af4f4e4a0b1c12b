use hazard_core::{ErrorCode, HazardError};
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid provider url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("provider responded with {0}")]
    Status(StatusCode),
    #[error("unexpected provider payload: {0}")]
    Decode(String),
}

impl From<ClientError> for HazardError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::InvalidUrl { .. } => HazardError::new(ErrorCode::InvalidInput, error.to_string()),
            other => HazardError::upstream(other.to_string()),
        }
    }
}

/// HTTP client shared by the provider adapters.
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, ClientError> {
    Ok(Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()?)
}

/// Parses a provider base URL, always ending it with `/` so relative joins
/// keep any path prefix.
pub(crate) fn parse_base_url(base: &str) -> Result<Url, ClientError> {
    let normalized = format!("{}/", base.trim().trim_end_matches('/'));
    Url::parse(&normalized).map_err(|err| ClientError::InvalidUrl {
        url: base.to_string(),
        reason: err.to_string(),
    })
}

pub(crate) fn join(base: &Url, path: &str) -> Result<Url, ClientError> {
    base.join(path).map_err(|err| ClientError::InvalidUrl {
        url: format!("{base}{path}"),
        reason: err.to_string(),
    })
}
