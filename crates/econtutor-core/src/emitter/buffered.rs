//! Buffered emitter for environments that cannot hold a connection open.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt, stream};
use tracing::{debug, error};

use super::{Emitter, FrameStream};
use crate::domain::{Conversation, RelayResult, WireFrame};
use crate::error::RelayError;
use crate::ports::{ChatModelClient, DeltaStream, Invocation, UpstreamError, invoke};

/// Where the buffered emitter gets the full reply from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferSource {
    /// A single non-streaming completion call.
    #[default]
    Complete,
    /// A streaming call whose deltas are drained internally.
    DrainStream,
}

/// Emits `[Token(full_reply), Done]`, or a lone `Error`.
///
/// The client never observes partial output.
pub struct BufferedEmitter {
    client: Arc<dyn ChatModelClient>,
    model: String,
    source: BufferSource,
}

impl BufferedEmitter {
    pub fn new(client: Arc<dyn ChatModelClient>, model: String, source: BufferSource) -> Self {
        Self {
            client,
            model,
            source,
        }
    }

    async fn fetch(&self, conversation: &Conversation) -> Result<RelayResult, UpstreamError> {
        let streaming = self.source == BufferSource::DrainStream;
        match invoke(self.client.as_ref(), &self.model, conversation, streaming).await? {
            Invocation::Complete(text) => Ok(RelayResult::Complete(text)),
            Invocation::Streaming(deltas) => drain(deltas).await.map(RelayResult::Complete),
        }
    }
}

/// Concatenate every delta with no separators.
async fn drain(deltas: DeltaStream) -> Result<String, UpstreamError> {
    deltas
        .try_fold(String::new(), |mut acc, delta| async move {
            acc.push_str(&delta.text);
            Ok(acc)
        })
        .await
}

#[async_trait]
impl Emitter for BufferedEmitter {
    async fn emit(self: Box<Self>, conversation: Conversation) -> FrameStream {
        let frames = match self.fetch(&conversation).await {
            Ok(result) => {
                debug!(model = %self.model, source = ?self.source, "Buffered reply complete");
                result.into_frames()
            }
            Err(e) => {
                error!(model = %self.model, "Upstream call failed: {e}");
                vec![WireFrame::Error(RelayError::from(e).payload())]
            }
        };
        stream::iter(frames).boxed()
    }
}
