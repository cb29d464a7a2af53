//! Core domain for the econtutor chat relay.
//!
//! This crate holds everything the relay protocol needs that is independent
//! of a transport: the conversation model, the tutor persona, the message
//! normalizer, the upstream model port, the two response emitters and the
//! relay endpoint that ties them together. HTTP and serverless adapters live
//! in their own crates and only translate `WireFrame`s to bytes.
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod emitter;
pub mod error;
pub mod normalize;
pub mod persona;
pub mod ports;
pub mod relay;

pub use config::{ConfigError, DEFAULT_BASE_URL, DEFAULT_MODEL, RelayConfig};
pub use domain::{Conversation, Delta, ErrorPayload, RelayResult, Role, Turn, WireFrame};
pub use emitter::{
    BufferSource, BufferedEmitter, Emitter, FrameStream, RunMode, StreamingEmitter, collect_reply,
};
pub use error::RelayError;
pub use normalize::normalize;
pub use persona::DEFAULT_PERSONA;
pub use ports::{ChatModelClient, DeltaStream, Invocation, UpstreamError, invoke};
pub use relay::{HealthReport, RelayEndpoint};
