mod campaign;
mod config;
mod errors;
mod keywords;
mod llm_client;
mod routes;
mod search_volume;
mod site;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::keywords::stopwords::StopwordSet;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::search_volume::dataset::{load_keyword_table, KeywordTable};
use crate::site::fetcher::PageFetcher;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Keyword Planner API v{}", env!("CARGO_PKG_VERSION"));

    let stopwords = match &config.stopwords_path {
        Some(path) => StopwordSet::load(path)?,
        None => StopwordSet::english(),
    };
    if stopwords.is_empty() {
        warn!("Stopword set is empty; no words will be filtered from keyword ranking");
    }
    info!("Stopword set ready ({} words)", stopwords.len());

    let keyword_stats = load_configured_dataset(&config)?;

    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_timeout)
        .context("Failed to build LLM client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let fetcher = PageFetcher::new(config.fetch_timeout).context("Failed to build page fetcher")?;

    let state = AppState {
        model: Arc::new(llm),
        fetcher,
        stopwords: Arc::new(stopwords),
        keyword_stats,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Loads KEYWORD_STATS_PATH once; the table is shared read-only afterwards.
fn load_configured_dataset(config: &Config) -> Result<Option<Arc<KeywordTable>>> {
    let Some(path) = &config.keyword_stats_path else {
        info!("No KEYWORD_STATS_PATH set; search-volume lookup limited to uploads");
        return Ok(None);
    };

    let file = std::fs::File::open(path)
        .with_context(|| format!("File '{}' not found", path.display()))?;
    let table = load_keyword_table(file, config.keyword_stats_skip_rows)
        .with_context(|| format!("Failed to load keyword data from '{}'", path.display()))?;
    info!(
        "Loaded {} keyword rows from {}",
        table.rows.len(),
        path.display()
    );
    Ok(Some(Arc::new(table)))
}
