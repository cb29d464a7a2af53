//! Relay endpoint orchestration.
//!
//! Each request runs Validating → Configuring → Normalizing → Invoking →
//! Emitting. The first two stages fail with a [`RelayError`] before any
//! frame exists; from Invoking on, every failure is reported in-band as an
//! `Error` frame, so a request always ends with a response.

use std::sync::Arc;

use serde::Serialize;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::domain::{Conversation, Turn};
use crate::emitter::{FrameStream, RunMode};
use crate::error::RelayError;
use crate::normalize::normalize;
use crate::ports::ChatModelClient;

/// Error text for a body whose `messages` field is not an array.
pub const MESSAGES_NOT_ARRAY: &str = "messages must be an array";

/// Prompt sent by the smoke-test endpoint.
pub const SMOKE_TEST_PROMPT: &str = "Explain the importance of fast language models";

/// Body of a health probe response.
///
/// `{"ok": true, "models": [...]}` or `{"ok": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    pub fn from_result(result: Result<Vec<String>, RelayError>) -> Self {
        match result {
            Ok(models) => Self {
                ok: true,
                models: Some(models),
                error: None,
            },
            Err(err) => {
                // Report the provider's own message, not the generic relay one.
                let error = match err {
                    RelayError::Upstream(upstream) => upstream.to_string(),
                    other => other.to_string(),
                };
                Self {
                    ok: false,
                    models: None,
                    error: Some(error),
                }
            }
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> u16 {
        if self.ok { 200 } else { 500 }
    }
}

/// Transport-independent chat relay.
///
/// Cheap to clone; configuration and client are shared read-only.
#[derive(Clone)]
pub struct RelayEndpoint {
    config: Arc<RelayConfig>,
    client: Arc<dyn ChatModelClient>,
}

impl std::fmt::Debug for RelayEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayEndpoint")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RelayEndpoint {
    pub fn new(config: Arc<RelayConfig>, client: Arc<dyn ChatModelClient>) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Validate, check configuration and normalize, without calling upstream.
    pub fn prepare(&self, body: &[u8]) -> Result<Conversation, RelayError> {
        let conversation = parse_conversation(body)?;
        if !self.config.has_credential() {
            warn!("Rejecting chat request: upstream credential is not configured");
            return Err(RelayError::ServiceUnavailable);
        }
        Ok(normalize(conversation, &self.config.persona))
    }

    /// Relay one chat request and return its frames.
    pub async fn relay(&self, body: &[u8], mode: RunMode) -> Result<FrameStream, RelayError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("relay", %request_id, streaming = mode.is_streaming());

        async move {
            let conversation = self.prepare(body)?;
            info!(
                model = %self.config.model,
                turns = conversation.len(),
                "Relaying chat request"
            );

            let emitter = mode.emitter(Arc::clone(&self.client), self.config.model.clone());
            Ok::<_, RelayError>(emitter.emit(conversation).await)
        }
        .instrument(span)
        .await
    }

    /// Probe the provider and list the models the credential can see.
    pub async fn health(&self) -> Result<Vec<String>, RelayError> {
        if !self.config.has_credential() {
            return Err(RelayError::ServiceUnavailable);
        }
        let models = self.client.list_models().await?;
        debug!(count = models.len(), "Health probe listed models");
        Ok(models)
    }

    /// Run [`Self::health`] and shape the outcome as a response body.
    pub async fn health_report(&self) -> HealthReport {
        let report = HealthReport::from_result(self.health().await);
        if let Some(error) = &report.error {
            warn!("Health probe failed: {error}");
        }
        report
    }

    /// Send a fixed prompt, without the persona, to the configured model.
    pub async fn smoke_test(&self) -> Result<String, RelayError> {
        if !self.config.has_credential() {
            return Err(RelayError::ServiceUnavailable);
        }
        let conversation = [Turn::user(SMOKE_TEST_PROMPT)];
        let content = self
            .client
            .complete(&self.config.model, &conversation)
            .await?;
        Ok(content)
    }
}

/// Extract the conversation from a request body.
///
/// The body must be a JSON object whose `messages` field is an array of
/// turns. Any other field is ignored.
pub fn parse_conversation(body: &[u8]) -> Result<Conversation, RelayError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| RelayError::bad_request(format!("Invalid JSON body: {e}")))?;

    let messages = match value.get("messages") {
        Some(messages @ serde_json::Value::Array(_)) => messages.clone(),
        _ => return Err(RelayError::bad_request(MESSAGES_NOT_ARRAY)),
    };

    serde_json::from_value(messages)
        .map_err(|e| RelayError::bad_request(format!("Invalid message: {e}")))
}
