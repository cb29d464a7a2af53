//! SSE → delta streaming adapter.
//!
//! The provider streams Server-Sent Events:
//!
//! ```text
//! data: {"choices":[{"delta":{"content":"Hi"}}]}
//!
//! data: [DONE]
//! ```
//!
//! This module reassembles lines across network reads and yields one
//! [`Delta`] per chunk that carries text.

use bytes::{Bytes, BytesMut};
use econtutor_core::{Delta, DeltaStream, UpstreamError};
use futures_util::{Stream, StreamExt};
use tracing::{trace, warn};

use crate::models::{ChatCompletionChunk, error_message};

/// SSE termination signal.
const DONE_MARKER: &str = "[DONE]";

/// State threaded through the `unfold` stream.
struct SseState<S> {
    stream: S,
    buf: BytesMut,
    eof: bool,
    done: bool,
}

/// What a single SSE line means for the delta stream.
enum LineOutcome {
    Skip,
    Delta(Delta),
    Finished,
    Failed(UpstreamError),
}

/// Convert a provider SSE byte stream into a delta stream.
///
/// The stream ends on `data: [DONE]`, or when the connection closes
/// cleanly without one. A transport error or an unparseable chunk yields
/// one `Err` and ends the stream.
pub fn sse_to_deltas<S, E>(byte_stream: S) -> DeltaStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let state = SseState {
        stream: byte_stream.boxed(),
        buf: BytesMut::new(),
        eof: false,
        done: false,
    };

    futures_util::stream::unfold(state, |mut st| async move {
        if st.done {
            return None;
        }

        loop {
            // Try to extract a complete SSE line from the buffer.
            if let Some(line) = next_line(&mut st.buf, st.eof) {
                match parse_line(&line) {
                    LineOutcome::Skip => continue,
                    LineOutcome::Delta(delta) => return Some((Ok(delta), st)),
                    LineOutcome::Finished => {
                        st.done = true;
                        return None;
                    }
                    LineOutcome::Failed(e) => {
                        st.done = true;
                        return Some((Err(e), st));
                    }
                }
            }

            if st.eof {
                // Connection closed without [DONE]; treat as a normal end.
                trace!("Upstream stream closed without [DONE]");
                return None;
            }

            // Need more data from upstream.
            match st.stream.next().await {
                Some(Ok(chunk)) => st.buf.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    warn!("Upstream stream error: {e}");
                    st.done = true;
                    return Some((Err(UpstreamError::Transport(e.to_string())), st));
                }
                None => st.eof = true,
            }
        }
    })
    .boxed()
}

/// Split the next line off the buffer.
///
/// At end of input a trailing line without a newline is returned too.
fn next_line(buf: &mut BytesMut, eof: bool) -> Option<String> {
    let line = match buf.iter().position(|&b| b == b'\n') {
        Some(pos) => buf.split_to(pos + 1),
        None if eof && !buf.is_empty() => buf.split(),
        None => return None,
    };
    Some(String::from_utf8_lossy(&line).trim().to_string())
}

fn parse_line(line: &str) -> LineOutcome {
    // Skip empty lines, SSE comments, and `event:`/`id:` fields.
    let Some(data) = line.strip_prefix("data:") else {
        return LineOutcome::Skip;
    };
    let data = data.trim();

    if data == DONE_MARKER {
        return LineOutcome::Finished;
    }

    let value: serde_json::Value = match serde_json::from_str(data) {
        Ok(value) => value,
        Err(e) => return LineOutcome::Failed(UpstreamError::Malformed(e.to_string())),
    };

    if value.get("error").is_some() {
        let message = error_message(&value, "Provider reported an error mid-stream");
        return LineOutcome::Failed(UpstreamError::Provider {
            status: None,
            message,
            body: Some(value),
        });
    }

    match serde_json::from_value::<ChatCompletionChunk>(value) {
        Ok(chunk) => chunk
            .into_content()
            .map_or(LineOutcome::Skip, |text| LineOutcome::Delta(Delta::new(text))),
        Err(e) => LineOutcome::Failed(UpstreamError::Malformed(e.to_string())),
    }
}
