use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::keywords::extractor::{ExtractOptions, DEFAULT_MIN_LENGTH, DEFAULT_TOP_N};
use crate::search_volume::dataset::DEFAULT_SKIP_ROWS;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a number does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Search-volume export loaded at startup, if any.
    pub keyword_stats_path: Option<PathBuf>,
    pub keyword_stats_skip_rows: usize,
    /// Replaces the built-in English stopwords when set.
    pub stopwords_path: Option<PathBuf>,
    pub keyword_top_n: usize,
    pub keyword_min_length: usize,
    pub fetch_timeout: Duration,
    pub llm_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").with_context(|| {
                "Required environment variable 'ANTHROPIC_API_KEY' is not set".to_string()
            })?,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            keyword_stats_path: lookup("KEYWORD_STATS_PATH").map(PathBuf::from),
            keyword_stats_skip_rows: parse_or(&lookup, "KEYWORD_STATS_SKIP_ROWS", DEFAULT_SKIP_ROWS)?,
            stopwords_path: lookup("STOPWORDS_PATH").map(PathBuf::from),
            keyword_top_n: parse_or(&lookup, "KEYWORD_TOP_N", DEFAULT_TOP_N)?,
            keyword_min_length: parse_or(&lookup, "KEYWORD_MIN_LENGTH", DEFAULT_MIN_LENGTH)?,
            fetch_timeout: Duration::from_secs(parse_or(&lookup, "FETCH_TIMEOUT_SECS", 30)?),
            llm_timeout: Duration::from_secs(parse_or(&lookup, "LLM_TIMEOUT_SECS", 120)?),
        })
    }

    /// Extraction defaults; request fields override them.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            top_n: self.keyword_top_n,
            min_length: self.keyword_min_length,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid non-negative integer, got '{raw}'")),
    }
}
