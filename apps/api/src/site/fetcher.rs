use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::site::SiteError;

const USER_AGENT: &str = concat!("keyword_planner/", env!("CARGO_PKG_VERSION"));

/// Plain HTTP GET for business web pages. One attempt per call.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, SiteError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(SiteError::Client)?;
        Ok(Self { client })
    }

    /// Returns the body of `url`. Non-2xx responses are errors.
    pub async fn fetch(&self, url: &str) -> Result<String, SiteError> {
        let parsed = validate_page_url(url)?;
        info!("Fetching {parsed}");

        let request_error = |source| SiteError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiteError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(request_error)?;
        debug!("Fetched {} bytes from {url}", body.len());
        Ok(body)
    }
}

/// Accepts absolute http(s) URLs only.
pub fn validate_page_url(url: &str) -> Result<Url, SiteError> {
    let invalid = |reason: String| SiteError::InvalidUrl {
        url: url.to_string(),
        reason,
    };

    if url.trim().is_empty() {
        return Err(invalid("URL cannot be empty".to_string()));
    }

    let parsed = Url::parse(url.trim()).map_err(|e| invalid(format!("Invalid URL format: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(invalid(format!("Unsupported URL scheme: {scheme}"))),
    }
}
