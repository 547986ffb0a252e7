//! HTTP proxy server
//!
//! Thin, stateless request/response mapping over the aggregation layer:
//! every handler parses its parameters, calls exactly one client or preview
//! operation, and serializes the result as JSON.

pub mod api;
pub mod server;

pub use api::create_router;
pub use server::{AppState, ProxyServer, ServerError};
