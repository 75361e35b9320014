use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut retry_after = None;

        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Llm(LlmError::NotConfigured) => {
                tracing::error!("Generation requested but no LLM provider is configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    LlmError::not_configured_message(),
                )
            }
            AppError::Llm(LlmError::EndpointNotFound { hint }) => (
                StatusCode::NOT_FOUND,
                "PROVIDER_NOT_FOUND",
                format!("API endpoint not found. {hint}"),
            ),
            AppError::Llm(LlmError::RateLimited { retry_after_secs }) => {
                retry_after = Some(*retry_after_secs);
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "RATE_LIMITED",
                    format!(
                        "Rate limit exceeded. Please wait {retry_after_secs} seconds before trying again."
                    ),
                )
            }
            AppError::Llm(LlmError::Credentials { .. }) => (
                StatusCode::PAYMENT_REQUIRED,
                "PROVIDER_CREDENTIALS",
                "API key issue or insufficient credits. Please check your API account balance."
                    .to_string(),
            ),
            AppError::Llm(LlmError::Upstream { message, .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                message.clone(),
            ),
            AppError::Llm(LlmError::Transport(e)) => {
                tracing::error!("LLM transport error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_UNREACHABLE",
                    "Unable to reach the AI service. Please try again later.".to_string(),
                )
            }
            AppError::Llm(LlmError::MalformedResponse(reason)) => {
                tracing::error!("LLM malformed response: {reason}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MALFORMED_RESPONSE",
                    "The AI service returned an unexpected response.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut body = json!({
            "code": code,
            "message": message,
        });
        if let Some(secs) = retry_after {
            body["retryAfter"] = json!(secs);
        }

        (status, Json(body)).into_response()
    }
}
