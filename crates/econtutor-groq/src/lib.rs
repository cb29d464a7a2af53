//! Upstream model client for Groq's OpenAI-compatible chat API.
//!
//! Implements [`econtutor_core::ChatModelClient`] over `reqwest`. Streaming
//! responses arrive as Server-Sent Events and are turned into a lazy
//! [`econtutor_core::DeltaStream`] by [`stream::sse_to_deltas`].
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod client;
pub mod models;
pub mod stream;

pub use client::GroqClient;
