//! Streaming emitter for long-lived processes.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{StreamExt, stream};
use tracing::{debug, error};

use super::{Emitter, FrameStream};
use crate::domain::{Conversation, WireFrame};
use crate::error::RelayError;
use crate::ports::{ChatModelClient, DeltaStream, UpstreamError};

/// Emits one `Token` per non-empty delta, then `Done`, or `Error` on the
/// first failure.
///
/// Deltas are pulled only when the returned stream is polled, so every
/// frame is a suspension point and dropping the stream drops the upstream
/// call with it.
pub struct StreamingEmitter {
    client: Arc<dyn ChatModelClient>,
    model: String,
}

impl StreamingEmitter {
    pub fn new(client: Arc<dyn ChatModelClient>, model: String) -> Self {
        Self { client, model }
    }
}

/// State threaded through the `unfold` stream.
struct FrameState {
    deltas: DeltaStream,
    model: String,
    tokens: usize,
}

fn error_frame(err: UpstreamError) -> WireFrame {
    WireFrame::Error(RelayError::from(err).payload())
}

#[async_trait]
impl Emitter for StreamingEmitter {
    async fn emit(self: Box<Self>, conversation: Conversation) -> FrameStream {
        let deltas = match self.client.stream(&self.model, &conversation).await {
            Ok(deltas) => deltas,
            Err(e) => {
                error!(model = %self.model, "Failed to open upstream stream: {e}");
                return stream::once(async move { error_frame(e) }).boxed();
            }
        };

        let state = FrameState {
            deltas,
            model: self.model,
            tokens: 0,
        };

        // `None` state means a terminal frame has been sent.
        stream::unfold(Some(state), |state| async move {
            let mut st = state?;
            loop {
                match st.deltas.next().await {
                    Some(Ok(delta)) if delta.text.is_empty() => {}
                    Some(Ok(delta)) => {
                        st.tokens += 1;
                        return Some((WireFrame::Token(delta.text), Some(st)));
                    }
                    Some(Err(e)) => {
                        error!(
                            model = %st.model,
                            tokens = st.tokens,
                            "Upstream stream failed: {e}"
                        );
                        return Some((error_frame(e), None));
                    }
                    None => {
                        debug!(model = %st.model, tokens = st.tokens, "Upstream stream finished");
                        return Some((WireFrame::Done, None));
                    }
                }
            }
        })
        .boxed()
    }
}
