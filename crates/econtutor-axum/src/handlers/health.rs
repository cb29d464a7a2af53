//! Provider health and smoke-test handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::chat::ChatReply;
use crate::error::HttpError;
use crate::state::AppState;

/// `GET /api/health`: list the models the credential can reach.
pub async fn health(State(state): State<AppState>) -> Response {
    let report = state.relay.health_report().await;
    let status =
        StatusCode::from_u16(report.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(report)).into_response()
}

/// `GET /api/test`: send a fixed prompt and return the reply.
pub async fn smoke_test(State(state): State<AppState>) -> Result<Json<ChatReply>, HttpError> {
    let content = state.relay.smoke_test().await?;
    Ok(Json(ChatReply { content }))
}
