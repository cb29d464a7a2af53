//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core relay expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.

pub mod chat_model;

pub use chat_model::{ChatModelClient, DeltaStream, Invocation, UpstreamError, invoke};

#[cfg(test)]
pub use chat_model::MockChatModelClient;
