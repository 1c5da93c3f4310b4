//! Error handling module
//!
//! HTTP boundary errors and response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Missing request signature")]
    MissingSignature,

    #[error("Invalid request signature")]
    InvalidSignature(#[from] crate::discord::SignatureError),

    #[error("Request body too large")]
    PayloadTooLarge,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            // 401 Unauthorized
            AppError::MissingSignature => {
                (StatusCode::UNAUTHORIZED, "missing_signature", None)
            }
            AppError::InvalidSignature(e) => {
                tracing::warn!("Rejected interaction signature: {}", e);
                (StatusCode::UNAUTHORIZED, "invalid_signature", None)
            }

            // 413 Payload Too Large
            AppError::PayloadTooLarge => {
                (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", None)
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
