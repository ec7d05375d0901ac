use std::sync::Arc;

use crate::config::Config;
use crate::keywords::stopwords::StopwordSet;
use crate::llm_client::CompletionModel;
use crate::search_volume::dataset::KeywordTable;
use crate::site::fetcher::PageFetcher;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup; per-user keyword lists travel in requests.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable model backend. Default: `LlmClient`.
    pub model: Arc<dyn CompletionModel>,
    pub fetcher: PageFetcher,
    pub stopwords: Arc<StopwordSet>,
    /// Search-volume export loaded from KEYWORD_STATS_PATH, if configured.
    pub keyword_stats: Option<Arc<KeywordTable>>,
    pub config: Config,
}
