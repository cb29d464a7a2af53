//! Shared fixtures for router tests.
//!
//! `ScriptedClient` stands in for the provider: it replays a fixed list of
//! deltas (or fails) and records every conversation it was sent.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use econtutor_axum::{AxumContext, ServerConfig, create_router};
use econtutor_core::{ChatModelClient, Delta, DeltaStream, RelayConfig, Turn, UpstreamError};
use futures_util::{StreamExt, stream};
use http_body_util::BodyExt;

pub const TEST_PERSONA: &str = "You are a test tutor.";
pub const TEST_MODEL: &str = "test-model";

enum Script {
    Reply(Vec<String>),
    FailOnOpen(UpstreamError),
    FailAfter(Vec<String>, UpstreamError),
}

pub struct ScriptedClient {
    script: Script,
    calls: AtomicUsize,
    conversations: Mutex<Vec<Vec<Turn>>>,
}

impl ScriptedClient {
    fn with(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
            conversations: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(deltas: &[&str]) -> Arc<Self> {
        Self::with(Script::Reply(owned(deltas)))
    }

    pub fn failing(err: UpstreamError) -> Arc<Self> {
        Self::with(Script::FailOnOpen(err))
    }

    pub fn failing_after(deltas: &[&str], err: UpstreamError) -> Arc<Self> {
        Self::with(Script::FailAfter(owned(deltas), err))
    }

    /// Number of upstream calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Conversation sent with the most recent call.
    pub fn last_conversation(&self) -> Vec<Turn> {
        self.conversations
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, conversation: &[Turn]) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.conversations
            .lock()
            .unwrap()
            .push(conversation.to_vec());
    }
}

fn owned(deltas: &[&str]) -> Vec<String> {
    deltas.iter().map(ToString::to_string).collect()
}

#[async_trait]
impl ChatModelClient for ScriptedClient {
    async fn complete(&self, model: &str, conversation: &[Turn]) -> Result<String, UpstreamError> {
        assert_eq!(model, TEST_MODEL);
        self.record(conversation);
        match &self.script {
            Script::Reply(deltas) => Ok(deltas.concat()),
            Script::FailOnOpen(err) | Script::FailAfter(_, err) => Err(err.clone()),
        }
    }

    async fn stream(
        &self,
        model: &str,
        conversation: &[Turn],
    ) -> Result<DeltaStream, UpstreamError> {
        assert_eq!(model, TEST_MODEL);
        self.record(conversation);
        let (deltas, failure) = match &self.script {
            Script::Reply(deltas) => (deltas.clone(), None),
            Script::FailOnOpen(err) => return Err(err.clone()),
            Script::FailAfter(deltas, err) => (deltas.clone(), Some(err.clone())),
        };
        let items = deltas
            .into_iter()
            .map(|text| Ok(Delta::new(text)))
            .chain(failure.map(Err));
        Ok(stream::iter(items.collect::<Vec<_>>()).boxed())
    }

    async fn list_models(&self) -> Result<Vec<String>, UpstreamError> {
        match &self.script {
            Script::FailOnOpen(err) => Err(err.clone()),
            _ => Ok(vec![TEST_MODEL.to_string(), "llama-3.1-8b-instant".to_string()]),
        }
    }
}

/// Relay configuration with a credential and a short persona.
pub fn configured() -> RelayConfig {
    RelayConfig::default()
        .with_api_key("gsk_test")
        .with_model(TEST_MODEL)
        .with_persona(TEST_PERSONA)
}

/// Relay configuration without a credential.
pub fn unconfigured() -> RelayConfig {
    RelayConfig::default()
        .with_model(TEST_MODEL)
        .with_persona(TEST_PERSONA)
}

pub fn router(config: RelayConfig, client: Arc<ScriptedClient>) -> Router {
    router_with(config, client, &ServerConfig::default())
}

pub fn router_with(
    config: RelayConfig,
    client: Arc<ScriptedClient>,
    server: &ServerConfig,
) -> Router {
    create_router(AxumContext::new(config, client), server)
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// One parsed SSE event: optional `event:` name and the `data:` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: Option<String>,
    pub data: String,
}

impl SseEvent {
    pub fn token(text: &str) -> Self {
        Self {
            event: None,
            data: serde_json::json!({ "token": text }).to_string(),
        }
    }

    pub fn done() -> Self {
        Self {
            event: Some("done".into()),
            data: "[DONE]".into(),
        }
    }
}

/// Split an SSE body into events, skipping comment-only blocks.
pub fn parse_sse(body: &str) -> Vec<SseEvent> {
    body.split("\n\n")
        .filter_map(|block| {
            let mut event = None;
            let mut data = None;
            for line in block.lines() {
                let Some((field, value)) = line.split_once(':') else {
                    continue;
                };
                let value = value.strip_prefix(' ').unwrap_or(value).to_string();
                match field {
                    "event" => event = Some(value),
                    "data" => data = Some(value),
                    _ => {}
                }
            }
            data.map(|data| SseEvent { event, data })
        })
        .collect()
}
