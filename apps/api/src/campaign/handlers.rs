//! Axum route handlers for the campaign API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::campaign::generator::{analyze_seo, generate_keywords, generate_ppc_plan};
use crate::campaign::response_parser::KeywordRecord;
use crate::errors::AppError;
use crate::site::fetcher::validate_page_url;
use crate::site::page::{seo_snapshot, SeoPage};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateKeywordsRequest {
    pub business_description: String,
    /// Keep the valid records when some lack a field, instead of failing.
    #[serde(default)]
    pub allow_partial: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateKeywordsResponse {
    pub records: Vec<KeywordRecord>,
    pub keywords: Vec<String>,
    pub labels: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PpcPlanRequest {
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PpcPlanResponse {
    pub keywords: Vec<String>,
    pub plan: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SeoAnalyzeRequest {
    pub url: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub business_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SeoAnalyzeResponse {
    pub page: SeoPage,
    pub keywords: Vec<String>,
    pub analysis: String,
    pub generated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/keywords/generate
///
/// Asks the model for 15 keywords in 3 ad groups for the described business.
/// Parser failures come back as EXTRACTION_FAILURE / DECODE_FAILURE / SCHEMA_FAILURE.
pub async fn handle_generate_keywords(
    State(state): State<AppState>,
    Json(request): Json<GenerateKeywordsRequest>,
) -> Result<Json<GenerateKeywordsResponse>, AppError> {
    let description = request.business_description.trim();
    if description.is_empty() {
        return Err(AppError::Validation(
            "business_description cannot be empty".to_string(),
        ));
    }

    let generated =
        generate_keywords(state.model.as_ref(), description, request.allow_partial).await?;

    Ok(Json(GenerateKeywordsResponse {
        keywords: generated.keywords(),
        labels: generated.records.iter().map(KeywordRecord::label).collect(),
        records: generated.records,
        warnings: generated.warnings,
    }))
}

/// POST /api/v1/campaigns/ppc-plan
///
/// Generates a small-budget PPC plan for the five keywords the user selected.
pub async fn handle_ppc_plan(
    State(state): State<AppState>,
    Json(request): Json<PpcPlanRequest>,
) -> Result<Json<PpcPlanResponse>, AppError> {
    let generated = generate_ppc_plan(state.model.as_ref(), &request.keywords).await?;
    info!("Generated PPC plan for {} keywords", generated.keywords.len());

    Ok(Json(PpcPlanResponse {
        keywords: generated.keywords,
        plan: generated.plan,
        generated_at: Utc::now(),
    }))
}

/// POST /api/v1/seo/analyze
///
/// Fetches the page, extracts its on-page SEO signals and asks the model for
/// improvements. Without keywords, generates them from the business description first.
pub async fn handle_seo_analyze(
    State(state): State<AppState>,
    Json(request): Json<SeoAnalyzeRequest>,
) -> Result<Json<SeoAnalyzeResponse>, AppError> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(AppError::Validation("Please enter a valid URL.".to_string()));
    }
    validate_page_url(url)?;

    let mut keywords: Vec<String> = request
        .keywords
        .iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();

    if keywords.is_empty() {
        let description = request
            .business_description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(missing_keywords)?;
        keywords = generate_keywords(state.model.as_ref(), description, false)
            .await?
            .keywords();
        if keywords.is_empty() {
            warn!("Keyword generation returned no keywords; skipping SEO analysis");
            return Err(missing_keywords());
        }
    }

    let html = state.fetcher.fetch(url).await?;
    let page = seo_snapshot(&html)?;
    let analysis = analyze_seo(state.model.as_ref(), &page, &keywords).await?;

    Ok(Json(SeoAnalyzeResponse {
        page,
        keywords,
        analysis,
        generated_at: Utc::now(),
    }))
}

fn missing_keywords() -> AppError {
    AppError::Validation(
        "Please generate keywords by filling out the business description.".to_string(),
    )
}
