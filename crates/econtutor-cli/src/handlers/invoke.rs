//! Invoke command handler.
//!
//! Runs one serverless function the way the platform would: one event in,
//! one response out.

use std::path::Path;

use anyhow::{Context, Result, bail};
use econtutor_core::RelayConfig;
use econtutor_functions::{Function, FunctionEvent, FunctionHandler};
use tokio::io::AsyncReadExt;

/// Execute `function` with an event from `event_path` or stdin.
pub async fn execute(config: RelayConfig, function: Function, event_path: Option<&Path>) -> Result<()> {
    let raw = match event_path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("Failed to read event from stdin")?;
            raw
        }
    };
    let event = parse_event(&raw)?;

    let handler = FunctionHandler::bootstrap(config)?;
    let response = handler.handle(function, &event).await;
    tracing::info!(%function, status = response.status_code, "Function invocation finished");

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

/// Parse an invocation event.
///
/// Blank input is treated as a bodiless `POST`.
pub fn parse_event(raw: &str) -> Result<FunctionEvent> {
    if raw.trim().is_empty() {
        return Ok(FunctionEvent::new("POST", None));
    }
    let event: FunctionEvent =
        serde_json::from_str(raw).context("Event must be JSON with an httpMethod field")?;
    if event.http_method.trim().is_empty() {
        bail!("Event httpMethod is empty");
    }
    Ok(event)
}
