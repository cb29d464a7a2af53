//! Axum-specific error types and mappings.
//!
//! Every error body is an [`ErrorPayload`]: `{"error": ..., "details"?: ...}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use econtutor_core::{ErrorPayload, RelayError};
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Rejected or failed before any reply was produced.
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// The emitter reported an upstream failure in-band.
    #[error("{}", .0.error)]
    Upstream(ErrorPayload),
}

impl HttpError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Relay(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for this error.
    pub fn payload(&self) -> ErrorPayload {
        match self {
            Self::Relay(err) => err.payload(),
            Self::Upstream(payload) => payload.clone(),
        }
    }
}

impl From<ErrorPayload> for HttpError {
    fn from(payload: ErrorPayload) -> Self {
        Self::Upstream(payload)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.payload())).into_response()
    }
}
