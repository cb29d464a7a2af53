//! Chat relay handlers.
//!
//! Bodies are taken as raw bytes so that validation failures produce the
//! relay's own error messages instead of axum's extractor rejections.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;
use econtutor_core::{RunMode, collect_reply};
use serde::Serialize;

use crate::error::HttpError;
use crate::sse;
use crate::state::AppState;

/// Body of a successful buffered reply.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub content: String,
}

/// `POST /api/chat`: wait for the full reply and return it as JSON.
pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatReply>, HttpError> {
    let frames = state.relay.relay(&body, RunMode::buffered()).await?;
    let content = collect_reply(frames).await?;
    Ok(Json(ChatReply { content }))
}

/// `POST /api/chat/stream`: forward tokens as SSE while the model writes.
///
/// Once the stream has started every failure arrives as an `error` frame
/// under status 200.
pub async fn chat_stream(State(state): State<AppState>, body: Bytes) -> Response {
    match state.relay.relay(&body, RunMode::streaming()).await {
        Ok(frames) => sse::stream_response(frames),
        Err(err) => sse::error_response(&err),
    }
}
