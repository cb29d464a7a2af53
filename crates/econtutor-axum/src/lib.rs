//! Axum web server adapter for the econtutor relay.
//!
//! Serves the chat relay over HTTP: a buffered JSON endpoint, a streaming
//! SSE endpoint, and provider health probes. All request handling is
//! delegated to [`econtutor_core::RelayEndpoint`].
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by integration tests under tests/
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod sse;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
