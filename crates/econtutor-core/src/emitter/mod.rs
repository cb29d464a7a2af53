//! Response emitters.
//!
//! An emitter drives the upstream model for one request and turns what it
//! produces into [`WireFrame`]s. Both variants hand back a [`FrameStream`];
//! the buffered one has already finished talking to the provider when it
//! returns, the streaming one pulls a delta every time the stream is polled.
//!
//! Frame streams always end with exactly one terminal frame (`Done` or
//! `Error`).

mod buffered;
mod streaming;

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;

use crate::domain::{Conversation, ErrorPayload, WireFrame};
use crate::ports::ChatModelClient;

pub use buffered::{BufferSource, BufferedEmitter};
pub use streaming::StreamingEmitter;

/// Frames for one request, in emission order.
pub type FrameStream = BoxStream<'static, WireFrame>;

/// Turns one model call into wire frames.
///
/// `emit` consumes the emitter, so an instance serves exactly one request.
#[async_trait]
pub trait Emitter: Send {
    async fn emit(self: Box<Self>, conversation: Conversation) -> FrameStream;
}

/// Delivery mode of a relay endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunMode {
    streaming: bool,
    source: BufferSource,
}

impl RunMode {
    /// Forward every delta as soon as it arrives.
    #[must_use]
    pub const fn streaming() -> Self {
        Self {
            streaming: true,
            source: BufferSource::Complete,
        }
    }

    /// Wait for the complete reply with a non-streaming call.
    #[must_use]
    pub const fn buffered() -> Self {
        Self {
            streaming: false,
            source: BufferSource::Complete,
        }
    }

    /// Open a streaming call but drain it before emitting anything.
    #[must_use]
    pub const fn buffered_from_stream() -> Self {
        Self {
            streaming: false,
            source: BufferSource::DrainStream,
        }
    }

    #[must_use]
    pub const fn is_streaming(self) -> bool {
        self.streaming
    }

    /// Fresh emitter for a single request.
    pub fn emitter(self, client: Arc<dyn ChatModelClient>, model: String) -> Box<dyn Emitter> {
        if self.streaming {
            Box::new(StreamingEmitter::new(client, model))
        } else {
            Box::new(BufferedEmitter::new(client, model, self.source))
        }
    }
}

/// Fold a frame stream into a single reply.
///
/// Tokens are concatenated until `Done`. An `Error` frame wins over any
/// text already received, since the transcript is then incomplete.
pub async fn collect_reply(mut frames: FrameStream) -> Result<String, ErrorPayload> {
    let mut content = String::new();
    while let Some(frame) = frames.next().await {
        match frame {
            WireFrame::Token(text) => content.push_str(&text),
            WireFrame::Done => return Ok(content),
            WireFrame::Error(payload) => return Err(payload),
        }
    }
    Ok(content)
}
