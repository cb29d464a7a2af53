//! Health command handler.

use anyhow::{Result, bail};
use econtutor_core::RelayConfig;

use crate::bootstrap::relay_endpoint;

/// Print the health report; fail when the probe does.
pub async fn execute(config: RelayConfig) -> Result<()> {
    let relay = relay_endpoint(config)?;
    let report = relay.health_report().await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    if !report.ok {
        bail!(
            "Health check failed: {}",
            report.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}
