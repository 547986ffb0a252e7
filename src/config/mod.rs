//! Configuration management for the ember proxy
//!
//! Configuration loads from environment variables (`EMBER_*`) or a TOML file.
//! Upstream base URLs live here and are handed to each component at
//! construction; nothing in the crate reads a process-wide constant.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Upstream Hacker News API configuration
    pub upstream: UpstreamConfig,

    /// Link preview scraper configuration
    pub preview: PreviewConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:8080"
    pub bind_address: String,

    /// Enable CORS for API responses
    pub enable_cors: bool,

    /// Enable per-request trace logging
    pub enable_request_logging: bool,
}

/// Upstream Hacker News API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API, without the version segment
    pub api_url: String,

    /// Request timeout in seconds for item/list/user fetches
    pub request_timeout_secs: u64,

    /// Number of stories returned by the top-stories convenience view
    pub top_stories_limit: usize,

    /// Default page size for paged top stories
    pub default_page_size: usize,

    /// Hard cap on page size; client-supplied limits clamp to this
    pub max_page_size: usize,

    /// Hard cap on ids accepted per comment-resolution request
    pub max_ids_per_request: usize,

    /// Hard cap on comment recursion depth
    pub max_comment_depth: u32,

    /// Depth used when a request does not specify one
    pub default_comment_depth: u32,
}

/// Link preview scraper configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Fixed per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent sent to scraped pages
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let bind_address =
            std::env::var("EMBER_BIND_ADDRESS").unwrap_or_else(|_| String::from("0.0.0.0:8080"));

        let api_url = std::env::var("EMBER_HN_API_URL")
            .unwrap_or_else(|_| String::from("https://hacker-news.firebaseio.com"));

        let user_agent = std::env::var("EMBER_PREVIEW_USER_AGENT")
            .unwrap_or_else(|_| format!("ember/{}", env!("CARGO_PKG_VERSION")));

        let log_level = std::env::var("EMBER_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));
        let log_format = std::env::var("EMBER_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        let config = Self {
            server: ServerConfig {
                bind_address,
                enable_cors: env_parsed("EMBER_ENABLE_CORS", true),
                enable_request_logging: env_parsed("EMBER_REQUEST_LOGGING", true),
            },
            upstream: UpstreamConfig {
                api_url,
                request_timeout_secs: env_parsed("EMBER_REQUEST_TIMEOUT", 30),
                top_stories_limit: env_parsed("EMBER_TOP_STORIES_LIMIT", 20),
                default_page_size: env_parsed("EMBER_DEFAULT_PAGE_SIZE", 20),
                max_page_size: env_parsed("EMBER_MAX_PAGE_SIZE", 100),
                max_ids_per_request: env_parsed("EMBER_MAX_IDS_PER_REQUEST", 50),
                max_comment_depth: env_parsed("EMBER_MAX_COMMENT_DEPTH", 8),
                default_comment_depth: env_parsed("EMBER_DEFAULT_COMMENT_DEPTH", 3),
            },
            preview: PreviewConfig {
                request_timeout_secs: env_parsed("EMBER_PREVIEW_TIMEOUT", 10),
                user_agent,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.upstream.api_url.is_empty() {
            anyhow::bail!("upstream.api_url must not be empty");
        }

        if self.upstream.default_page_size == 0 || self.upstream.max_page_size == 0 {
            anyhow::bail!("page sizes must be greater than 0");
        }

        if self.upstream.default_page_size > self.upstream.max_page_size {
            anyhow::bail!("default_page_size must not exceed max_page_size");
        }

        if self.upstream.max_ids_per_request == 0 {
            anyhow::bail!("max_ids_per_request must be greater than 0");
        }

        if self.upstream.max_comment_depth == 0 {
            anyhow::bail!("max_comment_depth must be greater than 0");
        }

        if self.upstream.default_comment_depth > self.upstream.max_comment_depth {
            anyhow::bail!("default_comment_depth must not exceed max_comment_depth");
        }

        Ok(())
    }

    /// Get the upstream request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.request_timeout_secs)
    }

    /// Get the preview request timeout as Duration
    #[must_use]
    pub fn preview_timeout(&self) -> Duration {
        Duration::from_secs(self.preview.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: String::from("0.0.0.0:8080"),
                enable_cors: true,
                enable_request_logging: true,
            },
            upstream: UpstreamConfig {
                api_url: String::from("https://hacker-news.firebaseio.com"),
                request_timeout_secs: 30,
                top_stories_limit: 20,
                default_page_size: 20,
                max_page_size: 100,
                max_ids_per_request: 50,
                max_comment_depth: 8,
                default_comment_depth: 3,
            },
            preview: PreviewConfig {
                request_timeout_secs: 10,
                user_agent: format!("ember/{}", env!("CARGO_PKG_VERSION")),
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}
