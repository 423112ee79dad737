//! Error types for the entry server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

// == Store Error Enum ==
/// Failure raised by the backing key-value store while scanning or loading.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store cannot currently be read
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Underlying I/O failure
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be decoded
    #[error("Store data is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

// == API Error Enum ==
/// Unified error type for the HTTP surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request parameters, one message per rejected parameter
    #[error("Invalid request: {}", .0.join("; "))]
    InvalidRequest(Vec<String>),

    /// Scan of the backing store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::InvalidRequest(messages) => {
                let errors: Vec<_> = messages.iter().map(|msg| json!({ "msg": msg })).collect();
                return (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response();
            }
            // The cause is logged here and never echoed to the client.
            ApiError::Store(cause) => {
                error!(error = %cause, "Store failure while serving request");
                "Internal server error"
            }
            ApiError::Internal(cause) => {
                error!(error = %cause, "Internal failure while serving request");
                "Internal server error"
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP layer.
pub type Result<T> = std::result::Result<T, ApiError>;
