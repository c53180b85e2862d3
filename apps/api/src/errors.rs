use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::editing::EditError;
use crate::generation::generator::GenerationError;
use crate::normalize::NormalizeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid response format: {0}")]
    InvalidResponseFormat(String),

    #[error("AI response malformed: {0}")]
    MalformedResponse(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::Extraction => AppError::InvalidResponseFormat(err.to_string()),
            NormalizeError::MalformedJson { .. } => AppError::MalformedResponse(err.to_string()),
        }
    }
}

impl From<EditError> for AppError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::FieldNotInSection { .. } => AppError::Validation(err.to_string()),
            EditError::AlreadyEditing | EditError::NotEditing | EditError::ExportWhileEditing => {
                AppError::Conflict(err.to_string())
            }
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::UnreadableDocument(msg) => AppError::Validation(msg),
            GenerationError::Llm(e) => AppError::Llm(e.to_string()),
            GenerationError::Internal(e) => AppError::Internal(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg.clone(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::InvalidResponseFormat(msg) => {
                tracing::warn!("Invalid AI response format: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "INVALID_RESPONSE_FORMAT",
                    "The AI returned a response in an invalid format".to_string(),
                )
            }
            AppError::MalformedResponse(msg) => {
                tracing::warn!("Malformed AI response: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_RESPONSE",
                    "AI response malformed".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (StatusCode::BAD_GATEWAY, "LLM_ERROR", msg.clone())
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

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
