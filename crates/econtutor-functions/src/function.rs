//! Function names.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The deployable functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// Buffered JSON chat.
    Chat,
    /// Buffered chat encoded as an SSE body.
    ChatStream,
    /// Provider health probe.
    Health,
}

impl Function {
    pub const ALL: [Self; 3] = [Self::Chat, Self::ChatStream, Self::Health];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::ChatStream => "chat-stream",
            Self::Health => "health",
        }
    }

    /// Method that invokes the function; anything else but `OPTIONS` is 405.
    pub const fn method(self) -> &'static str {
        match self {
            Self::Chat | Self::ChatStream => "POST",
            Self::Health => "GET",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown function '{0}' (expected one of: chat, chat-stream, health)")]
pub struct UnknownFunction(pub String);

impl FromStr for Function {
    type Err = UnknownFunction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|function| function.name() == s)
            .ok_or_else(|| UnknownFunction(s.to_string()))
    }
}
