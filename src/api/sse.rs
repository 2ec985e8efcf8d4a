//! Server-Sent Events support

use super::types::{message_views, MessageView};
use crate::runtime::SseEvent;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Convert broadcast stream to SSE stream
pub fn sse_stream(
    init_event: SseEvent,
    broadcast_rx: tokio::sync::broadcast::Receiver<SseEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // Create stream that starts with init event then broadcasts
    let init = futures::stream::once(async move { Ok(sse_event_to_axum(init_event)) });

    let broadcasts = BroadcastStream::new(broadcast_rx).filter_map(|result| match result {
        Ok(event) => Some(Ok(sse_event_to_axum(event))),
        Err(_) => None, // Skip lagged messages
    });

    let combined = init.chain(broadcasts);

    Sse::new(combined).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn sse_event_to_axum(event: SseEvent) -> Event {
    let (event_type, data) = match event {
        SseEvent::Init { snapshot } => (
            "init",
            json!({
                "type": "init",
                "messages": message_views(&snapshot.messages),
                "typing": snapshot.typing
            }),
        ),
        SseEvent::Message { message } => (
            "message",
            json!({
                "type": "message",
                "message": MessageView::from(&message)
            }),
        ),
        SseEvent::Typing { typing } => (
            "typing",
            json!({
                "type": "typing",
                "typing": typing
            }),
        ),
        SseEvent::Reset { messages } => (
            "reset",
            json!({
                "type": "reset",
                "messages": message_views(&messages)
            }),
        ),
        SseEvent::Error { message } => (
            "error",
            json!({
                "type": "error",
                "message": message
            }),
        ),
    };

    Event::default().event(event_type).data(data.to_string())
}
