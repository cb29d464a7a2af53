//! Model output and outbound wire frames.
//!
//! A `Delta` is what the upstream model produces while streaming. A
//! `WireFrame` is what the relay sends back to the browser. The SSE encoding
//! lives here so the persistent server and the serverless functions emit
//! byte-identical frames.

use serde::{Deserialize, Serialize};

/// One increment of streamed model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta {
    pub text: String,
}

impl Delta {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Terminal outcome of a model call as seen by an emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayResult {
    /// The full reply, either returned in one piece or accumulated from deltas.
    Complete(String),
    /// The delta sequence ended normally.
    StreamTerminated,
}

impl RelayResult {
    /// Frames that close out a request with this result.
    #[must_use]
    pub fn into_frames(self) -> Vec<WireFrame> {
        match self {
            Self::Complete(text) => vec![WireFrame::Token(text), WireFrame::Done],
            Self::StreamTerminated => vec![WireFrame::Done],
        }
    }
}

/// JSON error body shared by every failure response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Serialize to a JSON string.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"error\":{:?}}}", self.error))
    }
}

/// Outbound protocol unit.
///
/// `Done` and `Error` are terminal: nothing follows them.
#[derive(Debug, Clone, PartialEq)]
pub enum WireFrame {
    Token(String),
    Done,
    Error(ErrorPayload),
}

/// SSE event name of the terminal success frame.
pub const DONE_EVENT: &str = "done";
/// SSE data of the terminal success frame.
pub const DONE_DATA: &str = "[DONE]";
/// SSE event name of the terminal error frame.
pub const ERROR_EVENT: &str = "error";

impl WireFrame {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error(_))
    }

    /// Event name, if the frame carries one.
    #[must_use]
    pub const fn event_name(&self) -> Option<&'static str> {
        match self {
            Self::Token(_) => None,
            Self::Done => Some(DONE_EVENT),
            Self::Error(_) => Some(ERROR_EVENT),
        }
    }

    /// Payload written to the SSE `data:` field.
    #[must_use]
    pub fn data(&self) -> String {
        match self {
            Self::Token(text) => serde_json::json!({ "token": text }).to_string(),
            Self::Done => DONE_DATA.to_string(),
            Self::Error(payload) => payload.to_json(),
        }
    }

    /// Full SSE encoding of the frame, including the blank-line terminator.
    ///
    /// ```
    /// use econtutor_core::WireFrame;
    ///
    /// assert_eq!(WireFrame::Token("Hi".into()).to_sse(), "data: {\"token\":\"Hi\"}\n\n");
    /// assert_eq!(WireFrame::Done.to_sse(), "event: done\ndata: [DONE]\n\n");
    /// ```
    #[must_use]
    pub fn to_sse(&self) -> String {
        match self.event_name() {
            Some(event) => format!("event: {event}\ndata: {}\n\n", self.data()),
            None => format!("data: {}\n\n", self.data()),
        }
    }
}
