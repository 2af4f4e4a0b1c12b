use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidInput,
    NotFound,
    /// Geocoding found no match or the lookup itself failed.
    LookupFailure,
    /// The routing collaborator failed or returned no candidate route.
    RoutingFailure,
    /// A drawn area whose outer ring has fewer than three points.
    MalformedHazard,
    Upstream,
    Internal,
}

#[derive(Debug, Clone)]
pub struct HazardError {
    pub code: ErrorCode,
    pub message: String,
}

impl HazardError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Upstream, message)
    }
}

impl fmt::Display for HazardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for HazardError {}

pub type HazardResult<T> = Result<T, HazardError>;
