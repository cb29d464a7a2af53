//! HTTP client for the provider's chat-completions API.

use async_trait::async_trait;
use econtutor_core::{ChatModelClient, DeltaStream, RelayConfig, Turn, UpstreamError};
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, error};

use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ModelsResponse, error_message};
use crate::stream::sse_to_deltas;

/// Upstream model client for Groq.
///
/// Holds one pooled `reqwest::Client`; clones share the pool.
#[derive(Clone)]
pub struct GroqClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl GroqClient {
    /// Create a client against `base_url` (e.g. `https://api.groq.com/openai/v1`).
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> reqwest::Result<Self> {
        let http = Client::builder().pool_max_idle_per_host(10).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Create a client from relay configuration.
    pub fn from_config(config: &RelayConfig) -> reqwest::Result<Self> {
        Self::new(config.base_url.clone(), config.api_key.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    async fn post_chat(
        &self,
        model: &str,
        conversation: &[Turn],
        stream: bool,
    ) -> Result<Response, UpstreamError> {
        let url = self.url("chat/completions");
        debug!(%url, model, turns = conversation.len(), stream, "Calling chat completions");

        let request = ChatCompletionRequest {
            model,
            messages: conversation,
            stream,
        };
        let response = self
            .authorized(self.http.post(&url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to connect to model provider: {e}");
                UpstreamError::Transport(e.to_string())
            })?;

        ensure_success(response).await
    }
}

/// Turn a non-2xx response into a provider error, keeping its JSON body.
async fn ensure_success(response: Response) -> Result<Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let bytes = response.bytes().await.unwrap_or_default();
    let err = provider_error(status.as_u16(), &bytes);
    error!(status = status.as_u16(), "Model provider returned an error: {err}");
    Err(err)
}

/// Build an [`UpstreamError::Provider`] from a status code and raw body.
pub fn provider_error(status: u16, body: &[u8]) -> UpstreamError {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(json) => UpstreamError::Provider {
            status: Some(status),
            message: error_message(&json, &format!("Provider returned status {status}")),
            body: Some(json),
        },
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            UpstreamError::Provider {
                status: Some(status),
                message: if text.is_empty() {
                    format!("Provider returned status {status}")
                } else {
                    text
                },
                body: None,
            }
        }
    }
}

#[async_trait]
impl ChatModelClient for GroqClient {
    async fn complete(&self, model: &str, conversation: &[Turn]) -> Result<String, UpstreamError> {
        let response = self.post_chat(model, conversation, false).await?;
        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;
        Ok(completion.into_content())
    }

    async fn stream(
        &self,
        model: &str,
        conversation: &[Turn],
    ) -> Result<DeltaStream, UpstreamError> {
        let response = self.post_chat(model, conversation, true).await?;
        Ok(sse_to_deltas(response.bytes_stream()))
    }

    async fn list_models(&self) -> Result<Vec<String>, UpstreamError> {
        let url = self.url("models");
        let response = self
            .authorized(self.http.get(&url))
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        let models: ModelsResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;
        Ok(models.data.into_iter().map(|m| m.id).collect())
    }
}
