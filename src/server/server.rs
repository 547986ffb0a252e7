//! Proxy server assembly and lifecycle

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::client::HnClient;
use crate::config::Config;
use crate::preview::PreviewFetcher;

use super::api::create_router;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
///
/// Both clients are cheap handles around a reqwest client; no mutable state
/// is shared between requests.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Upstream Hacker News client
    pub hn: Arc<HnClient>,

    /// Link preview scraper
    pub preview: Arc<PreviewFetcher>,

    /// Server start time
    pub start_time: Instant,

    /// Configuration
    pub config: Arc<Config>,
}

// ============================================================================
// Proxy Server
// ============================================================================

/// Main proxy server
#[derive(Debug)]
pub struct ProxyServer {
    config: Config,
    state: AppState,
}

impl ProxyServer {
    /// Create a new proxy server
    pub fn new(config: Config) -> Result<Self, ServerError> {
        config
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let hn = Arc::new(
            HnClient::new(&config.upstream).map_err(|e| ServerError::Init(e.to_string()))?,
        );
        let preview = Arc::new(
            PreviewFetcher::new(&config.preview).map_err(|e| ServerError::Init(e.to_string()))?,
        );

        let state = AppState {
            hn,
            preview,
            start_time: Instant::now(),
            config: Arc::new(config.clone()),
        };

        Ok(Self { config, state })
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the router with all routes and configured layers
    pub fn build_router(&self) -> Router {
        let mut router = create_router(self.state.clone());

        if self.config.server.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.config.server.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start the server
    pub async fn start(&self) -> Result<(), ServerError> {
        let router = self.build_router();
        let addr = &self.config.server.bind_address;

        tracing::info!("Starting ember proxy on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(e.to_string()))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        Ok(())
    }

    /// Start with graceful shutdown
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let router = self.build_router();
        let addr = &self.config.server.bind_address;

        tracing::info!("Starting ember proxy on {} (with graceful shutdown)", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(e.to_string()))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        tracing::info!("ember proxy shutdown complete");
        Ok(())
    }
}

// ============================================================================
// Server Errors
// ============================================================================

/// Server lifecycle errors
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),

    /// Failed to bind to address
    #[error("Failed to bind: {0}")]
    Bind(String),

    /// Server error
    #[error("Server error: {0}")]
    Serve(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let config = Config::default();
        assert!(ProxyServer::new(config).is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.upstream.max_comment_depth = 0;
        let err = ProxyServer::new(config).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn test_state_shares_config() {
        let config = Config::default();
        let server = ProxyServer::new(config).unwrap();
        let state = server.state();
        assert_eq!(state.config.upstream.top_stories_limit, 20);
    }
}
