//! Serverless function handlers for the econtutor relay.
//!
//! Each invocation receives one [`FunctionEvent`] and returns one
//! [`FunctionResponse`], in the Netlify/Lambda JSON shape. Nothing is
//! streamed: `chat-stream` drains the provider stream and returns the whole
//! reply as a single SSE body.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use tokio as _;

pub mod event;
pub mod function;
pub mod handler;

pub use event::{FunctionEvent, FunctionResponse};
pub use function::{Function, UnknownFunction};
pub use handler::FunctionHandler;
