//! Error handling module for the Promptify backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Validation error
    Validation(String),
    /// Resource not found
    NotFound(String),
    /// Analysis service unreachable, non-2xx, or timed out
    Upstream(String),
    /// Analysis service responded but the result failed schema validation
    Malformed(String),
    /// Database error
    Database(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Malformed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message for the response envelope.
    ///
    /// Validation and not-found messages pass through verbatim; server-side
    /// failures are reduced to a generic message with the cause logged only.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Upstream(_) => "Failed to analyze project".to_string(),
            AppError::Malformed(_) => "Failed to analyze project".to_string(),
            AppError::Database(_) => "Internal server error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Optional details line for the response envelope.
    ///
    /// Distinguishes an unreachable analysis service from a malformed result
    /// without exposing the underlying cause.
    pub fn public_details(&self) -> Option<String> {
        match self {
            AppError::Upstream(_) => Some("analysis service request failed".to_string()),
            AppError::Malformed(_) => {
                Some("analysis service returned a malformed result".to_string())
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "validation error: {}", msg),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::Upstream(msg) => write!(f, "analysis service error: {}", msg),
            AppError::Malformed(msg) => write!(f, "malformed analysis result: {}", msg),
            AppError::Database(msg) => write!(f, "database error: {}", msg),
            AppError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(format!("Database error: {}", err))
    }
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::debug!("request rejected: {}", self);
        }

        let body = ErrorResponse {
            error: self.public_message(),
            details: self.public_details(),
        };
        (status, Json(body)).into_response()
    }
}
