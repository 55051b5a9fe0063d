use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::ComparisonError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ExternalApiError { service: String, message: String },

    ValidationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::ExternalApiError { service, message } => {
                write!(f, "{service} error: {message}")
            }
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::ExternalApiError { service, message } => {
                tracing::warn!("{} API error: {}", service, message);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("{service} service is unavailable"),
                )
            }
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<ComparisonError> for ApiError {
    fn from(err: ComparisonError) -> Self {
        match err {
            ComparisonError::InvalidInput(msg) => Self::ValidationError(msg),
            ComparisonError::UserNotFound(name) => {
                Self::NotFound(format!("User '{name}' not found"))
            }
            ComparisonError::Fetch { username, source } => Self::ExternalApiError {
                service: "AniList".to_string(),
                message: format!("{username}: {source}"),
            },
        }
    }
}
