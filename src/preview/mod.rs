//! Link preview resolution for external story URLs
//!
//! Fetches an arbitrary page's HTML with a fixed timeout and extracts Open
//! Graph / meta-tag fields into a normalized [`PreviewData`] record. Network
//! failure, timeout, and non-success statuses all collapse into one
//! [`PreviewError`]; there is no retry and no partial-result fallback.

pub mod extract;

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::config::PreviewConfig;
use crate::error::PreviewError;
use crate::models::PreviewData;

/// Scraper for Open Graph metadata on external pages
#[derive(Debug, Clone)]
pub struct PreviewFetcher {
    client: Client,
}

impl PreviewFetcher {
    /// Create a new fetcher from preview configuration
    ///
    /// # Errors
    ///
    /// Returns `PreviewError::Http` if the HTTP client cannot be created
    pub fn new(config: &PreviewConfig) -> Result<Self, PreviewError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .gzip(true)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch a page and extract its preview metadata
    ///
    /// All fields of the result are optional; a page without any usable
    /// metadata still succeeds with an empty record carrying the URL.
    ///
    /// # Errors
    ///
    /// Returns a `PreviewError` on any transport failure, timeout, or
    /// non-success status.
    pub async fn fetch_preview(&self, url: &str) -> Result<PreviewData, PreviewError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                PreviewError::Timeout
            } else {
                PreviewError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PreviewError::Status(status.as_u16()));
        }

        let html = response.text().await.map_err(PreviewError::Http)?;
        debug!(url = %url, bytes = html.len(), "scraping preview metadata");

        Ok(extract::extract_preview(&html, url))
    }
}
