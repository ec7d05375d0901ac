//! Axum route handlers for keyword extraction.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::keywords::extractor::{extract, ExtractOptions};
use crate::site::page::visible_text;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
    pub top_n: Option<usize>,
    pub min_length: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub url: String,
    pub top_n: Option<usize>,
    pub min_length: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub url: String,
    pub keywords: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/keywords/extract
///
/// Ranks keywords in caller-supplied text. Empty text yields an empty list.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let options = resolve_options(&state, request.top_n, request.min_length);
    let keywords = extract(&request.text, &state.stopwords, options);
    Ok(Json(ExtractResponse { keywords }))
}

/// POST /api/v1/keywords/suggest
///
/// Fetches the business website and suggests keywords from its visible text.
pub async fn handle_suggest(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }

    let html = state.fetcher.fetch(request.url.trim()).await?;
    let text = visible_text(&html);

    let options = resolve_options(&state, request.top_n, request.min_length);
    let keywords = extract(&text, &state.stopwords, options);
    info!("Suggested {} keywords for {}", keywords.len(), request.url);

    Ok(Json(SuggestResponse {
        url: request.url,
        keywords,
    }))
}

fn resolve_options(state: &AppState, top_n: Option<usize>, min_length: Option<usize>) -> ExtractOptions {
    let defaults = state.config.extract_options();
    ExtractOptions {
        top_n: top_n.unwrap_or(defaults.top_n),
        min_length: min_length.unwrap_or(defaults.min_length),
    }
}
