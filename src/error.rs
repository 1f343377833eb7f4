/// Unified error types for the WebFinger server
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the server
#[derive(Error, Debug)]
pub enum FingerError {
    /// Strategy invoked with a URI whose scheme it does not handle
    #[error("Invalid scheme: expected {expected}, got {found}")]
    InvalidScheme { expected: String, found: String },

    /// Scheme-specific part of the resource could not be interpreted
    #[error("Invalid account: {0}")]
    InvalidToken(String),

    /// No lookup strategy registered for the scheme
    #[error("Invalid scheme: no lookup registered for {0:?}")]
    UnsupportedScheme(String),

    /// Resource is not an absolute URI
    #[error("Malformed resource URI: {0}")]
    MalformedUri(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration errors
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict errors (e.g., duplicate account)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FingerError {
    /// True for failures caused by the shape of the requested resource.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            FingerError::InvalidScheme { .. }
                | FingerError::InvalidToken(_)
                | FingerError::UnsupportedScheme(_)
                | FingerError::MalformedUri(_)
        )
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Convert FingerError to HTTP response
impl IntoResponse for FingerError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            // WebFinger answers every unresolvable resource with 404
            FingerError::InvalidScheme { .. }
            | FingerError::InvalidToken(_)
            | FingerError::UnsupportedScheme(_)
            | FingerError::MalformedUri(_)
            | FingerError::NotFound(_) => (StatusCode::NOT_FOUND, "NotFound", self.to_string()),
            FingerError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "InvalidRequest",
                self.to_string(),
            ),
            FingerError::Conflict(_) => (StatusCode::CONFLICT, "Conflict", self.to_string()),
            FingerError::Database(_)
            | FingerError::Migration(_)
            | FingerError::Internal(_)
            | FingerError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalServerError",
                "Internal server error".to_string(), // Don't leak details
            ),
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for server operations
pub type FingerResult<T> = Result<T, FingerError>;
