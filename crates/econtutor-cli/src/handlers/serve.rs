//! Serve command handler.

use anyhow::Result;
use econtutor_axum::{ServerConfig, start_server};
use econtutor_core::RelayConfig;

/// Run the persistent server until it fails or the process is stopped.
pub async fn execute(config: RelayConfig, port: u16) -> Result<()> {
    tracing::info!(port, "Starting persistent relay server");
    start_server(ServerConfig::default().with_port(port), config).await
}
