//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin wrappers that delegate to `RelayEndpoint`.

pub mod chat;
pub mod health;

use axum::http::StatusCode;

use crate::error::HttpError;
use econtutor_core::RelayError;

/// `OPTIONS` on a chat route: empty `200`.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any method other than `POST`/`OPTIONS` on a chat route.
pub async fn method_not_allowed() -> HttpError {
    HttpError::from(RelayError::MethodNotAllowed)
}
