//! OpenAI API data models for request/response handling.
//!
//! Only the fields the relay reads are modelled; everything else the
//! provider sends is ignored on deserialization.

use econtutor_core::Turn;
use serde::{Deserialize, Serialize};

// =============================================================================
// Chat Completion Request/Response Types
// =============================================================================

/// Request to `/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Turn],
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
}

/// Response from `/chat/completions` (non-streaming).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, or an empty string.
    pub fn into_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default()
    }
}

/// A single chat completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
}

/// Message inside a choice; `content` is null for some finish reasons.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Streaming chunk from `/chat/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChatChunkChoice>,
}

impl ChatCompletionChunk {
    /// Text carried by the first choice's delta, if any.
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content)
    }
}

/// A single streaming choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChunkChoice {
    #[serde(default)]
    pub delta: ChatDelta,
}

/// Delta content in a streaming chunk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatDelta {
    #[serde(default)]
    pub content: Option<String>,
}

// =============================================================================
// Models Endpoint Types
// =============================================================================

/// Response from `/models`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsResponse {
    #[serde(default)]
    pub data: Vec<ModelInfo>,
}

/// Information about a single model.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    pub id: String,
}

// =============================================================================
// Error Response Types
// =============================================================================

/// Pull a human-readable message out of a provider error body.
///
/// OpenAI-style bodies look like `{"error": {"message": "..."}}`; anything
/// else falls back to `fallback`.
pub fn error_message(body: &serde_json::Value, fallback: &str) -> String {
    body.pointer("/error/message")
        .or_else(|| body.get("error"))
        .or_else(|| body.get("message"))
        .and_then(serde_json::Value::as_str)
        .map_or_else(|| fallback.to_string(), str::to_string)
}
