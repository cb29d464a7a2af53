//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where the Groq client and the relay
//! endpoint are wired together for the web adapter.

use std::sync::Arc;

use anyhow::{Context, Result};
use econtutor_core::{ChatModelClient, RelayConfig, RelayEndpoint};
use econtutor_groq::GroqClient;

/// Default port of the persistent server.
pub const DEFAULT_PORT: u16 = 8787;

/// Default request body limit (1 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins.
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            body_limit: DEFAULT_BODY_LIMIT,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
#[derive(Debug, Clone)]
pub struct AxumContext {
    /// The relay every chat route delegates to.
    pub relay: RelayEndpoint,
}

impl AxumContext {
    /// Build a context around an arbitrary model client.
    pub fn new(config: RelayConfig, client: Arc<dyn ChatModelClient>) -> Self {
        Self {
            relay: RelayEndpoint::new(Arc::new(config), client),
        }
    }
}

/// Wire the Groq client into a relay endpoint.
pub fn bootstrap(config: RelayConfig) -> Result<AxumContext> {
    tracing::debug!(
        target: "econtutor.config",
        model = %config.model,
        base_url = %config.base_url,
        has_api_key = config.has_credential(),
        "Axum bootstrap resolved relay configuration"
    );

    let client = GroqClient::from_config(&config).context("Failed to build HTTP client")?;
    Ok(AxumContext::new(config, Arc::new(client)))
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig, relay_config: RelayConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(relay_config)?;
    let app = crate::routes::create_router(ctx, &config);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("econtutor relay listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
