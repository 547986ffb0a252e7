//! Hacker News API client
//!
//! [`HnClient`] wraps a reqwest client plus the upstream base URL and the
//! fan-out caps from configuration. The base URL is injected at construction
//! so tests can point the client at a mock server.
//!
//! Submodules split the client by concern:
//! - [`item`] - single item/user fetches with the null-on-failure policy
//! - [`stories`] - top-story list pagination and parallel fan-out
//! - [`comments`] - shallow and recursive comment resolution

pub mod comments;
pub mod item;
pub mod stories;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::UpstreamConfig;
use crate::error::FetchError;

/// Client for the upstream Hacker News Firebase API
#[derive(Debug, Clone)]
pub struct HnClient {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Upstream base URL without the version segment
    base_url: String,

    /// Aggregation limits and defaults
    config: UpstreamConfig,
}

impl HnClient {
    /// Create a new client from upstream configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &UpstreamConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            config: config.clone(),
        })
    }

    /// Create a client pointed at a custom base URL, for mock-server tests
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_base_url(base_url: &str, config: &UpstreamConfig) -> Result<Self, FetchError> {
        let mut merged = config.clone();
        merged.api_url = base_url.to_string();
        Self::new(&merged)
    }

    /// Upstream limits and defaults this client was built with
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Build a full URL for a `v0` API path
    fn url(&self, path: &str) -> String {
        format!("{}/v0/{}", self.base_url, path)
    }

    /// GET a `v0` path and deserialize the JSON body
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Status` on a non-success response and
    /// `FetchError::Timeout`/`FetchError::Http` on transport failures.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.json::<T>().await.map_err(FetchError::from_reqwest)
    }

    /// Truncate a client-supplied id list to the configured cap
    fn cap_ids<'a>(&self, ids: &'a [u64]) -> &'a [u64] {
        &ids[..ids.len().min(self.config.max_ids_per_request)]
    }
}
