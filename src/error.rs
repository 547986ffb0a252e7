//! Unified error handling for the ember crate
//!
//! Domain-specific errors ([`FetchError`], [`PreviewError`]) cover the two
//! network paths; [`Error`] wraps them for use across module boundaries.
//!
//! The propagation policy is deliberately lopsided: a single item fetch
//! failing inside a fan-out batch is recovered locally (the item becomes
//! `None` and is filtered out), while the top-story id-list fetch, the user
//! fetch, and the preview scrape are allowed to fail the whole request.

use thiserror::Error;

/// Errors that can occur while fetching from the upstream API
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from upstream
    #[error("upstream returned status {0}")]
    Status(u16),

    /// Request timeout
    #[error("request timeout")]
    Timeout,
}

impl FetchError {
    /// Fold a reqwest error into the taxonomy, distinguishing timeouts
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Errors that can occur while scraping a link preview
///
/// Network failure, timeout, non-success status, and parse trouble all
/// normalize to one user-facing failure with no retry.
#[derive(Error, Debug)]
pub enum PreviewError {
    /// HTTP request error
    #[error("preview request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the target page
    #[error("preview target returned status {0}")]
    Status(u16),

    /// Request timeout
    #[error("preview request timeout")]
    Timeout,
}

/// Unified error type for the ember crate
#[derive(Error, Debug)]
pub enum Error {
    /// The top-story id list could not be fetched; fatal for the request
    #[error("failed to fetch story IDs")]
    StoryIdsUnavailable(#[source] FetchError),

    /// The user record could not be fetched from upstream
    #[error("failed to fetch user")]
    UserUnavailable(#[source] FetchError),

    /// Upstream returned `null` for the requested username
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// Link preview scrape failed
    #[error("failed to fetch or parse metadata")]
    Preview(#[from] PreviewError),

    /// Fetch error outside a recoverable fan-out batch
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Configuration errors
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
