//! Function dispatch.
//!
//! One handler serves every function; the platform tells it which one was
//! invoked. Responses always carry the CORS headers.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Context;
use econtutor_core::{
    ErrorPayload, RelayConfig, RelayEndpoint, RelayError, RunMode, WireFrame, collect_reply,
};
use econtutor_groq::GroqClient;
use futures_util::StreamExt;
use tracing::{Instrument, debug, info_span};

use crate::event::{FunctionEvent, FunctionResponse};
use crate::function::Function;

const JSON_CONTENT_TYPE: &str = "application/json";
const SSE_CONTENT_TYPE: &str = "text/event-stream";

/// Serves function invocations against one relay endpoint.
#[derive(Debug, Clone)]
pub struct FunctionHandler {
    relay: RelayEndpoint,
}

impl FunctionHandler {
    pub const fn new(relay: RelayEndpoint) -> Self {
        Self { relay }
    }

    /// Wire the Groq client into a handler.
    pub fn bootstrap(config: RelayConfig) -> anyhow::Result<Self> {
        let client = GroqClient::from_config(&config).context("Failed to build HTTP client")?;
        Ok(Self::new(RelayEndpoint::new(
            Arc::new(config),
            Arc::new(client),
        )))
    }

    /// Handle one invocation of `function`.
    pub async fn handle(&self, function: Function, event: &FunctionEvent) -> FunctionResponse {
        let span = info_span!("function", %function, method = %event.http_method);
        async move {
            let headers = response_headers(function);

            if event.is_method("OPTIONS") {
                return FunctionResponse::new(200, headers, "");
            }
            if !event.is_method(function.method()) {
                debug!("Rejecting method");
                let payload = RelayError::MethodNotAllowed.payload();
                return FunctionResponse::new(405, headers, payload.to_json());
            }

            let (status, body) = match function {
                Function::Chat => self.chat(event).await,
                Function::ChatStream => self.chat_stream(event).await,
                Function::Health => self.health().await,
            };
            FunctionResponse::new(status, headers, body)
        }
        .instrument(span)
        .await
    }

    /// `{"content": ...}` or an error payload.
    async fn chat(&self, event: &FunctionEvent) -> (u16, String) {
        let reply = match self
            .relay
            .relay(event.body_bytes(), RunMode::buffered())
            .await
        {
            Ok(frames) => collect_reply(frames).await.map_err(|p| (500, p)),
            Err(err) => Err((err.status_code(), err.payload())),
        };

        match reply {
            Ok(content) => (200, serde_json::json!({ "content": content }).to_string()),
            Err((status, payload)) => (status, payload.to_json()),
        }
    }

    /// The whole reply as `token` + `done` frames, or a single `error` frame.
    async fn chat_stream(&self, event: &FunctionEvent) -> (u16, String) {
        let (status, frames) = match self
            .relay
            .relay(event.body_bytes(), RunMode::buffered_from_stream())
            .await
        {
            Ok(frames) => {
                let frames: Vec<WireFrame> = frames.collect().await;
                let failed = frames.iter().any(|f| matches!(f, WireFrame::Error(_)));
                (if failed { 500 } else { 200 }, frames)
            }
            Err(err) => (err.status_code(), vec![WireFrame::Error(err.payload())]),
        };

        (status, frames.iter().map(WireFrame::to_sse).collect())
    }

    async fn health(&self) -> (u16, String) {
        let report = self.relay.health_report().await;
        let body = serde_json::to_string(&report)
            .unwrap_or_else(|e| ErrorPayload::new(e.to_string()).to_json());
        (report.status_code(), body)
    }
}

fn response_headers(function: Function) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    let mut set = |name: &str, value: &str| {
        headers.insert(name.to_string(), value.to_string());
    };

    set("Access-Control-Allow-Origin", "*");
    set("Access-Control-Allow-Headers", "Content-Type");
    set(
        "Access-Control-Allow-Methods",
        &format!("{}, OPTIONS", function.method()),
    );

    match function {
        Function::ChatStream => {
            set("Content-Type", SSE_CONTENT_TYPE);
            set("Cache-Control", "no-cache");
            set("Connection", "keep-alive");
        }
        Function::Chat | Function::Health => set("Content-Type", JSON_CONTENT_TYPE),
    }
    headers
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use econtutor_core::{ChatModelClient, Delta, DeltaStream, Turn, UpstreamError};
    use futures_util::stream;

    use super::*;

    /// Replays fixed deltas, optionally failing; counts every call.
    struct FakeClient {
        deltas: Vec<&'static str>,
        failure: Option<UpstreamError>,
        calls: AtomicUsize,
    }

    impl FakeClient {
        fn replying(deltas: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                deltas,
                failure: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(err: UpstreamError) -> Arc<Self> {
            Arc::new(Self {
                deltas: Vec::new(),
                failure: Some(err),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatModelClient for FakeClient {
        async fn complete(&self, _: &str, _: &[Turn]) -> Result<String, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.failure {
                Some(err) => Err(err.clone()),
                None => Ok(self.deltas.concat()),
            }
        }

        async fn stream(&self, _: &str, _: &[Turn]) -> Result<DeltaStream, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut items: Vec<Result<Delta, UpstreamError>> =
                self.deltas.iter().map(|d| Ok(Delta::new(*d))).collect();
            if let Some(err) = &self.failure {
                items.push(Err(err.clone()));
            }
            Ok(stream::iter(items).boxed())
        }

        async fn list_models(&self) -> Result<Vec<String>, UpstreamError> {
            Ok(vec!["openai/gpt-oss-20b".into()])
        }
    }

    fn handler(config: RelayConfig, client: Arc<FakeClient>) -> FunctionHandler {
        FunctionHandler::new(RelayEndpoint::new(Arc::new(config), client))
    }

    fn configured() -> RelayConfig {
        RelayConfig::default()
            .with_api_key("gsk_test")
            .with_persona("persona")
    }

    const HELLO: &str = r#"{"messages":[{"role":"user","content":"What is opportunity cost?"}]}"#;

    #[tokio::test]
    async fn test_chat_returns_content() {
        let client = FakeClient::replying(vec!["The value ", "of the next best option."]);
        let response = handler(configured(), client.clone())
            .handle(Function::Chat, &FunctionEvent::post(HELLO))
            .await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&response.body).unwrap(),
            serde_json::json!({"content": "The value of the next best option."})
        );
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_chat_stream_drains_into_one_token() {
        let client = FakeClient::replying(vec!["Hi", " there"]);
        let response = handler(configured(), client)
            .handle(Function::ChatStream, &FunctionEvent::post(HELLO))
            .await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Content-Type"], "text/event-stream");
        assert_eq!(response.headers["Cache-Control"], "no-cache");
        assert_eq!(
            response.body,
            "data: {\"token\":\"Hi there\"}\n\nevent: done\ndata: [DONE]\n\n"
        );
    }

    #[tokio::test]
    async fn test_chat_stream_failure_is_single_error_frame() {
        let client = FakeClient::failing(UpstreamError::Transport("reset".into()));
        let response = handler(configured(), client)
            .handle(Function::ChatStream, &FunctionEvent::post(HELLO))
            .await;

        assert_eq!(response.status_code, 500);
        assert!(response.body.starts_with("event: error\ndata: "));
        assert!(response.body.contains("Failed to get response from Groq"));
        assert!(!response.body.contains("[DONE]"));
    }

    #[tokio::test]
    async fn test_chat_upstream_failure() {
        let client = FakeClient::failing(UpstreamError::Provider {
            status: Some(500),
            message: "Internal".into(),
            body: None,
        });
        let response = handler(configured(), client)
            .handle(Function::Chat, &FunctionEvent::post(HELLO))
            .await;

        assert_eq!(response.status_code, 500);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&response.body).unwrap(),
            serde_json::json!({"error": "Failed to get response from Groq", "details": "Internal"})
        );
    }

    #[tokio::test]
    async fn test_validation_and_credential_errors() {
        let client = FakeClient::replying(vec!["unused"]);
        let bad = FunctionEvent::post(r#"{"messages":"not-an-array"}"#);

        let response = handler(configured(), client.clone())
            .handle(Function::Chat, &bad)
            .await;
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, r#"{"error":"messages must be an array"}"#);

        let response = handler(configured(), client.clone())
            .handle(Function::ChatStream, &bad)
            .await;
        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.body,
            "event: error\ndata: {\"error\":\"messages must be an array\"}\n\n"
        );

        let response = handler(RelayConfig::default(), client.clone())
            .handle(Function::Chat, &FunctionEvent::post(HELLO))
            .await;
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, r#"{"error":"GROQ_API_KEY is missing on server"}"#);

        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_options_and_method_checks() {
        let client = FakeClient::replying(vec![]);
        let handler = handler(configured(), client.clone());

        for function in [Function::Chat, Function::ChatStream] {
            let response = handler
                .handle(function, &FunctionEvent::new("OPTIONS", None))
                .await;
            assert_eq!(response.status_code, 200);
            assert_eq!(response.body, "");
            assert_eq!(
                response.headers["Access-Control-Allow-Methods"],
                "POST, OPTIONS"
            );

            let response = handler
                .handle(function, &FunctionEvent::new("GET", None))
                .await;
            assert_eq!(response.status_code, 405);
            assert_eq!(response.body, r#"{"error":"Method not allowed"}"#);
        }
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_health() {
        let response = handler(configured(), FakeClient::replying(vec![]))
            .handle(Function::Health, &FunctionEvent::new("GET", None))
            .await;
        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.body,
            r#"{"ok":true,"models":["openai/gpt-oss-20b"]}"#
        );

        let response = handler(RelayConfig::default(), FakeClient::replying(vec![]))
            .handle(Function::Health, &FunctionEvent::new("GET", None))
            .await;
        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body,
            r#"{"ok":false,"error":"GROQ_API_KEY is missing on server"}"#
        );
    }
}
