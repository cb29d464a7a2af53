//! Invocation event and response shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Incoming request as delivered by the function platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl FunctionEvent {
    pub fn new(http_method: impl Into<String>, body: Option<String>) -> Self {
        Self {
            http_method: http_method.into(),
            body,
        }
    }

    /// `POST` with a body.
    pub fn post(body: impl Into<String>) -> Self {
        Self::new("POST", Some(body.into()))
    }

    /// Request body bytes; a missing body is empty.
    pub fn body_bytes(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default().as_bytes()
    }

    /// Whether the method matches, ignoring ASCII case.
    pub fn is_method(&self, method: &str) -> bool {
        self.http_method.eq_ignore_ascii_case(method)
    }
}

/// Response returned to the function platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl FunctionResponse {
    pub fn new(status_code: u16, headers: BTreeMap<String, String>, body: impl Into<String>) -> Self {
        Self {
            status_code,
            headers,
            body: body.into(),
        }
    }
}
