//! Server-sent event reader for streamed chat completions.

use eventsource_stream::Eventsource;
use futures::stream::{Stream, StreamExt};

use crate::error::{ApiError, Error, ErrorEnvelope};
use crate::types::chat::ChatCompletionChunk;

/// Sentinel payload that terminates an event stream.
const DONE_MARKER: &str = "[DONE]";

/// Signal delivered to a streaming callback.
///
/// A stream produces zero or more `Chunk` events followed by exactly one
/// `Done`.
#[derive(Debug)]
pub enum StreamEvent {
    Chunk(ChatCompletionChunk),
    Done(Option<Error>),
}

enum Decoded {
    Chunk(ChatCompletionChunk),
    Finished,
    Failed(Error),
}

fn decode(data: &str) -> Decoded {
    if data.trim() == DONE_MARKER {
        return Decoded::Finished;
    }

    // A chunk never carries an `error` key, so try the error envelope first.
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(data) {
        let err = ApiError::from_body(0, String::new(), envelope.error);
        return Decoded::Failed(Error::Api(err));
    }

    match serde_json::from_str::<ChatCompletionChunk>(data) {
        Ok(chunk) => Decoded::Chunk(chunk),
        Err(err) => Decoded::Failed(Error::Json(err)),
    }
}

/// Drains an SSE byte stream, invoking `callback` for every chunk and once
/// with the terminal [`StreamEvent::Done`].
pub(crate) async fn pump<S, B, E, F>(bytes: S, mut callback: F)
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
    F: FnMut(StreamEvent),
{
    let mut events = std::pin::pin!(bytes.eventsource());
    let mut delivered = 0usize;

    while let Some(event) = events.next().await {
        let event = match event {
            Ok(event) => event,
            Err(err) => {
                tracing::debug!("event stream failed after {} chunks: {}", delivered, err);
                callback(StreamEvent::Done(Some(Error::Stream(err.to_string()))));
                return;
            }
        };

        match decode(&event.data) {
            Decoded::Chunk(chunk) => {
                delivered += 1;
                callback(StreamEvent::Chunk(chunk));
            }
            Decoded::Finished => {
                tracing::debug!("event stream finished after {} chunks", delivered);
                callback(StreamEvent::Done(None));
                return;
            }
            Decoded::Failed(err) => {
                callback(StreamEvent::Done(Some(err)));
                return;
            }
        }
    }

    // Connection closed without the sentinel; treat what we got as complete.
    tracing::debug!("event stream closed without {} marker", DONE_MARKER);
    callback(StreamEvent::Done(None));
}
