//! Wire frames as Server-Sent Events.
//!
//! Frames are written with the same field order as
//! [`WireFrame::to_sse`]: `event:` first, then `data:`.

use std::convert::Infallible;
use std::time::Duration;

use axum::http::header::{CACHE_CONTROL, HeaderName, HeaderValue};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use econtutor_core::{FrameStream, RelayError, WireFrame};
use futures_util::{StreamExt, stream};

/// Disables response buffering in nginx-style reverse proxies.
const X_ACCEL_BUFFERING: &str = "x-accel-buffering";

/// Convert one frame into an SSE event.
pub fn frame_event(frame: &WireFrame) -> Event {
    let event = Event::default();
    let event = match frame.event_name() {
        Some(name) => event.event(name),
        None => event,
    };
    event.data(frame.data())
}

/// Stream frames to the client as they are produced.
///
/// Dropping the response body (client disconnect) drops `frames`, which
/// releases the upstream connection.
pub fn stream_response(frames: FrameStream) -> Response {
    let events = frames.map(|frame| Ok::<_, Infallible>(frame_event(&frame)));
    let sse = Sse::new(events).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("ping"),
    );

    let mut response = sse.into_response();
    let headers = response.headers_mut();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(
        HeaderName::from_static(X_ACCEL_BUFFERING),
        HeaderValue::from_static("no"),
    );
    response
}

/// A single error frame with the error's status code.
pub fn error_response(err: &RelayError) -> Response {
    let status = axum::http::StatusCode::from_u16(err.status_code())
        .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let frame = WireFrame::Error(err.payload());

    let mut response = stream_response(stream::iter([frame]).boxed());
    *response.status_mut() = status;
    response
}
