//! Application error type mapping to HTTP status codes and envelope format.
//!
//! Client responses never include internal cause detail; generation and
//! internal faults surface the generic high-traffic message and the full
//! cause is logged server-side.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use senpai_types::error::ChatError;

/// Client-facing text for the 400 envelope's `response` field.
const BAD_REQUEST_RESPONSE: &str = "An error occurred. Please check your request.";
/// Client-facing text for the 500 envelope's `error` field.
const INTERNAL_ERROR: &str = "An internal server error occurred.";
/// Client-facing text for the 500 envelope's `response` field.
const HIGH_TRAFFIC_RESPONSE: &str = "There is currently a high traffic. Please try again later.";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat relay errors.
    Chat(ChatError),
    /// Request-shape validation error (missing fields, malformed body).
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Chat(ChatError::InvalidRequest(msg)) | AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": msg,
                    "response": BAD_REQUEST_RESPONSE,
                    "status": 400,
                })),
            )
                .into_response(),

            AppError::Chat(ChatError::SessionNotFound(_)) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Chat not found. Please check again",
                })),
            )
                .into_response(),

            AppError::Chat(err @ ChatError::GenerationFailed(_)) => {
                // Cause chain already logged at the orchestrator boundary;
                // record the envelope conversion here.
                tracing::debug!(error = %err, "returning generic generation-failure envelope");
                internal_envelope()
            }

            AppError::Chat(ChatError::Internal(msg)) | AppError::Internal(msg) => {
                tracing::error!(error = %msg, "unhandled internal fault");
                internal_envelope()
            }
        }
    }
}

fn internal_envelope() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": INTERNAL_ERROR,
            "response": HIGH_TRAFFIC_RESPONSE,
            "status": 500,
        })),
    )
        .into_response()
}
