//! API error type with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use rxrules_contracts::error::RxError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// Errors surfaced to HTTP clients, each mapped to a status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<RxError> for ApiError {
    fn from(err: RxError) -> Self {
        match err {
            RxError::UnknownSymptom { .. }
            | RxError::UnknownCondition { .. }
            | RxError::InvalidInput { .. } => ApiError::BadRequest(err.to_string()),
            RxError::ConfigError { .. }
            | RxError::SerializationError { .. }
            | RxError::ScenarioFailed { .. }
            | RxError::ServerError { .. } => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}
