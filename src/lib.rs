//! ember - Hacker News aggregation proxy with link previews
//!
//! A stateless proxy over the public Hacker News Firebase API: paginates the
//! top-story list, fan-out fetches items in parallel, resolves nested
//! comment trees up to a bounded depth, and scrapes Open Graph metadata for
//! external story URLs.
//!
//! # Architecture
//!
//! - [`config`] - Configuration management and fan-out caps
//! - [`client`] - Upstream API client: items, stories, comments
//! - [`preview`] - Open Graph link preview scraping
//! - [`server`] - HTTP proxy endpoints
//! - [`models`] - Core data structures
//! - [`error`] - Error taxonomy
//!
//! # Example
//!
//! ```no_run
//! use ember::client::HnClient;
//! use ember::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = HnClient::new(&config.upstream)?;
//!     let page = client.fetch_paged_top_stories(1, 20).await?;
//!     println!("{} stories of {}", page.stories.len(), page.total);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod preview;
pub mod server;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::HnClient;
    pub use crate::config::Config;
    pub use crate::error::{Error, FetchError, PreviewError, Result};
    pub use crate::models::{Comment, PaginatedStories, PreviewData, Story, User};
    pub use crate::preview::PreviewFetcher;
    pub use crate::server::ProxyServer;
}

// Direct re-exports for convenience
pub use models::{Comment, PaginatedStories, PreviewData, Story, User};
