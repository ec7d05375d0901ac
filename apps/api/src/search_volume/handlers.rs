//! Axum route handlers for the search-volume API.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::search_volume::dataset::{load_keyword_table, KeywordTable, TableRow};
use crate::search_volume::filter::filter_rows;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    pub q: String,
    pub skip_rows: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchVolumeResponse {
    pub headers: Vec<String>,
    pub total_rows: usize,
    pub matched: usize,
    pub rows: Vec<TableRow>,
}

impl SearchVolumeResponse {
    fn filtered(table: &KeywordTable, query: &str) -> Self {
        let rows = filter_rows(&table.rows, query);
        Self {
            headers: table.headers.clone(),
            total_rows: table.rows.len(),
            matched: rows.len(),
            rows,
        }
    }
}

/// GET /api/v1/search-volume?q=
///
/// Filters the dataset loaded at startup. 404 when none is configured.
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchVolumeResponse>, AppError> {
    let table = state.keyword_stats.as_ref().ok_or_else(|| {
        AppError::NotFound("No keyword dataset configured (set KEYWORD_STATS_PATH)".to_string())
    })?;
    Ok(Json(SearchVolumeResponse::filtered(table, &params.q)))
}

/// POST /api/v1/search-volume/filter?q=&skip_rows=
///
/// Filters an uploaded CSV export (multipart field `file`). Nothing is kept after the response.
pub async fn handle_filter_upload(
    State(state): State<AppState>,
    Query(params): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Json<SearchVolumeResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some(bytes);
            break;
        }
    }

    let bytes = upload
        .ok_or_else(|| AppError::Validation("Missing multipart field 'file'".to_string()))?;
    let skip_rows = params
        .skip_rows
        .unwrap_or(state.config.keyword_stats_skip_rows);
    let table = load_keyword_table(bytes.as_ref(), skip_rows)?;
    info!("Filtering uploaded dataset: {} rows", table.rows.len());

    Ok(Json(SearchVolumeResponse::filtered(&table, &params.q)))
}
