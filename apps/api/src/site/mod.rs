// Website access: fetching a business page and turning its HTML into text.

pub mod fetcher;
pub mod page;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch content from {url} (status {status})")]
    Status { url: String, status: u16 },

    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTML extraction error: {0}")]
    Extraction(String),
}
