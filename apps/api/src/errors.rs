use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::campaign::response_parser::ParseFailure;
use crate::llm_client::LlmError;
use crate::search_volume::dataset::DatasetError;
use crate::site::SiteError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Fetch error: {0}")]
    Fetch(#[from] SiteError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Could not read the model's keyword list: {0}")]
    KeywordParse(#[from] ParseFailure),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Fetch(e @ SiteError::InvalidUrl { .. }) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Fetch(e) => {
                tracing::warn!("Fetch error: {e}");
                (StatusCode::BAD_GATEWAY, "FETCH_ERROR", e.to_string())
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "The language model request failed".to_string(),
                )
            }
            AppError::KeywordParse(failure) => {
                tracing::warn!("Keyword response rejected ({}): {failure}", failure.code());
                (StatusCode::UNPROCESSABLE_ENTITY, failure.code(), failure.to_string())
            }
            AppError::Dataset(e) => (StatusCode::BAD_REQUEST, "DATASET_ERROR", e.to_string()),
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
