use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

const GENERATION_FAILED: &str = "Failed to generate proposals";
const MISSING_KEY_HINT: &str = "Set OPENROUTER_API_KEY in the server environment \
    (e.g. .env for local development or the hosting provider's environment settings).";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Completion failed: {0}")]
    Completion(#[from] LlmError),

    /// The model output did not yield enough sections for assembly.
    #[error("Expected {expected} sections from the model, parsed {found}")]
    ParseShape { expected: usize, found: usize },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": msg, "hint": MISSING_KEY_HINT }),
                )
            }
            AppError::Completion(e) => {
                tracing::error!("Completion error [{}]: {e} (cause: {})", e.kind(), e.cause());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": GENERATION_FAILED,
                        "details": e.to_string(),
                        "type": e.kind(),
                    }),
                )
            }
            AppError::ParseShape { expected, found } => {
                tracing::error!(
                    "Marker contract drift: parsed {found} of {expected} required sections"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": GENERATION_FAILED,
                        "details": self.to_string(),
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
