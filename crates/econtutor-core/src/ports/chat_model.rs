//! Upstream model port.
//!
//! This port abstracts the hosted chat-completion provider. The relay
//! calls it with a normalized conversation and either waits for the whole
//! reply or pulls deltas one at a time.

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use thiserror::Error;

use crate::domain::{Delta, Turn};

/// Lazy, finite, single-consumer sequence of deltas.
///
/// The end of the stream is the `StreamTerminated` signal. An `Err` item
/// fails the whole call; nothing after it is meaningful. Dropping the stream
/// abandons the upstream request.
pub type DeltaStream = BoxStream<'static, Result<Delta, UpstreamError>>;

/// Errors surfaced by the upstream model provider.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// Network failure or the connection dropped.
    #[error("Failed to reach model provider: {0}")]
    Transport(String),

    /// The provider answered with an error.
    #[error("Model provider error: {message}")]
    Provider {
        /// HTTP status, when the error came from a status line rather than
        /// an in-stream error chunk.
        status: Option<u16>,
        message: String,
        /// Raw provider error body, when it was JSON.
        body: Option<serde_json::Value>,
    },

    /// The provider's response could not be understood.
    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

impl UpstreamError {
    /// Detail forwarded to the client: the provider's error body when
    /// available, else the error message.
    #[must_use]
    pub fn details(&self) -> serde_json::Value {
        match self {
            Self::Provider {
                body: Some(body), ..
            } => body.clone(),
            Self::Provider { message, .. } => serde_json::Value::String(message.clone()),
            other => serde_json::Value::String(other.to_string()),
        }
    }
}

/// Result of [`invoke`].
pub enum Invocation {
    Complete(String),
    Streaming(DeltaStream),
}

impl std::fmt::Debug for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete(text) => f.debug_tuple("Complete").field(text).finish(),
            Self::Streaming(_) => f.write_str("Streaming(..)"),
        }
    }
}

/// Port for the hosted chat-completion model.
///
/// Implementations perform a single attempt per call; retry policy, if
/// any, belongs to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatModelClient: Send + Sync {
    /// Wait for the full reply.
    ///
    /// An empty string means the provider returned no content; that is not
    /// an error.
    async fn complete(&self, model: &str, conversation: &[Turn]) -> Result<String, UpstreamError>;

    /// Open a streaming call and return its deltas.
    async fn stream(&self, model: &str, conversation: &[Turn])
    -> Result<DeltaStream, UpstreamError>;

    /// List model identifiers visible to the configured credential.
    async fn list_models(&self) -> Result<Vec<String>, UpstreamError>;
}

/// Call `client` in the requested mode.
pub async fn invoke(
    client: &dyn ChatModelClient,
    model: &str,
    conversation: &[Turn],
    streaming: bool,
) -> Result<Invocation, UpstreamError> {
    if streaming {
        client
            .stream(model, conversation)
            .await
            .map(Invocation::Streaming)
    } else {
        client
            .complete(model, conversation)
            .await
            .map(Invocation::Complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[test]
    fn test_details_prefers_provider_body() {
        let err = UpstreamError::Provider {
            status: Some(429),
            message: "Rate limit reached".into(),
            body: Some(serde_json::json!({"error": {"message": "Rate limit reached"}})),
        };
        assert_eq!(
            err.details(),
            serde_json::json!({"error": {"message": "Rate limit reached"}})
        );
    }

    #[test]
    fn test_details_falls_back_to_message() {
        let err = UpstreamError::Transport("connection reset".into());
        assert_eq!(
            err.details(),
            serde_json::json!("Failed to reach model provider: connection reset")
        );
    }

    #[tokio::test]
    async fn test_invoke_dispatches_on_streaming_flag() {
        let mut client = MockChatModelClient::new();
        client
            .expect_complete()
            .times(1)
            .returning(|_, _| Ok("full".to_string()));
        client.expect_stream().times(1).returning(|_, _| {
            Ok(futures_util::stream::iter(vec![Ok(Delta::new("a"))]).boxed())
        });

        let turns = vec![Turn::user("hi")];
        match invoke(&client, "m", &turns, false).await.unwrap() {
            Invocation::Complete(text) => assert_eq!(text, "full"),
            Invocation::Streaming(_) => panic!("expected complete"),
        }
        match invoke(&client, "m", &turns, true).await.unwrap() {
            Invocation::Streaming(stream) => {
                let deltas: Vec<_> = stream.collect().await;
                assert_eq!(deltas.len(), 1);
            }
            Invocation::Complete(_) => panic!("expected stream"),
        }
    }
}
