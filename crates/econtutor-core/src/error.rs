//! Relay error taxonomy.
//!
//! Every failure a relay request can reach maps to exactly one variant and
//! one response. None of them are retried.

use thiserror::Error;

use crate::domain::ErrorPayload;
use crate::ports::UpstreamError;

/// Message returned when the provider credential is not configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "GROQ_API_KEY is missing on server";

/// Message returned when the upstream call fails.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to get response from Groq";

/// Errors produced while relaying a chat request.
#[derive(Debug, Clone, Error)]
pub enum RelayError {
    /// Body is not JSON or `messages` is not an array of turns.
    #[error("{0}")]
    BadRequest(String),

    /// No upstream credential is configured. This is a deployment defect,
    /// not a per-request condition.
    #[error("GROQ_API_KEY is missing on server")]
    ServiceUnavailable,

    /// The model provider call failed.
    #[error("Failed to get response from Groq")]
    Upstream(#[from] UpstreamError),

    /// HTTP method other than `POST`/`OPTIONS` on a chat route.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl RelayError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::MethodNotAllowed => 405,
            Self::ServiceUnavailable | Self::Upstream(_) => 500,
        }
    }

    /// JSON body for this error.
    #[must_use]
    pub fn payload(&self) -> ErrorPayload {
        let payload = ErrorPayload::new(self.to_string());
        match self {
            Self::Upstream(upstream) => payload.with_details(upstream.details()),
            _ => payload,
        }
    }
}

impl From<RelayError> for ErrorPayload {
    fn from(err: RelayError) -> Self {
        err.payload()
    }
}
