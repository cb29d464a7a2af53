//! CLI bootstrap - the composition root.
//!
//! Loads `.env`, installs logging and resolves the relay configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use econtutor_core::{RelayConfig, RelayEndpoint};
use econtutor_groq::GroqClient;
use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber.
///
/// Logs go to stderr so `invoke` can write its response to stdout.
/// `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// Load `.env` into the process environment, if present.
pub fn load_env() {
    dotenvy::dotenv().ok();
}

/// Resolve the relay configuration from the environment.
pub fn load_config(model_override: Option<String>) -> Result<RelayConfig> {
    let config = RelayConfig::from_env().context("Failed to load relay configuration")?;
    let config = match model_override {
        Some(model) => config.with_model(model),
        None => config,
    };

    tracing::info!(
        model = %config.model,
        base_url = %config.base_url,
        key_len = config.api_key.as_ref().map_or(0, String::len),
        "Resolved relay configuration"
    );
    if !config.has_credential() {
        tracing::warn!("GROQ_API_KEY is not set; chat requests will be rejected");
    }
    Ok(config)
}

/// Build a relay endpoint backed by Groq.
pub fn relay_endpoint(config: RelayConfig) -> Result<RelayEndpoint> {
    let client = GroqClient::from_config(&config).context("Failed to build HTTP client")?;
    Ok(RelayEndpoint::new(Arc::new(config), Arc::new(client)))
}
