use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use hazard_core::{ErrorCode, HazardError};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: ErrorCode,
}

/// HTTP face of [`HazardError`].
#[derive(Debug)]
pub struct ApiError(pub HazardError);

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(HazardError::new(ErrorCode::NotFound, message))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(HazardError::invalid_input(message))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self(HazardError::new(ErrorCode::Internal, message))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<HazardError> for ApiError {
    fn from(error: HazardError) -> Self {
        Self(error)
    }
}

impl From<tera::Error> for ApiError {
    fn from(error: tera::Error) -> Self {
        Self::internal(format!("template rendering failed: {error}"))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0.code {
            ErrorCode::InvalidInput | ErrorCode::MalformedHazard => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound | ErrorCode::LookupFailure => StatusCode::NOT_FOUND,
            ErrorCode::RoutingFailure | ErrorCode::Upstream => StatusCode::BAD_GATEWAY,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.0.message.clone(),
            code: self.0.code,
        })
    }
}
