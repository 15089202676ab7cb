//! Streaming chat scenario.
//!
//! The client pushes [`StreamEvent`]s into a callback from its reader task.
//! [`bridge`] splits those into a chunk channel and a completion channel, and
//! [`StreamBridge::drain`] pulls from both until completion, echoing deltas
//! as they arrive.

use std::io::Write;

use chrono::{Local, NaiveDate};
use genai_client::{models, ChatCompletionChunk, ChatCompletionRequest, ChatMessage, StreamEvent};
use tokio::sync::{mpsc, oneshot};

use super::ScenarioResult;
use crate::config::AppConfig;
use crate::errors::ScenarioError;
use crate::render::Render;

/// Text and metadata aggregated from a chat stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamedChat {
    pub id: String,
    pub model: String,
    pub content: String,
    pub chunks: usize,
    pub finish_reason: Option<String>,
}

impl StreamedChat {
    fn absorb(&mut self, chunk: &ChatCompletionChunk) -> Option<String> {
        if self.id.is_empty() {
            self.id = chunk.id.clone();
            self.model = chunk.model.clone();
        }
        self.chunks += 1;
        if let Some(reason) = chunk.choices.first().and_then(|c| c.finish_reason.clone()) {
            self.finish_reason = Some(reason);
        }

        let delta = chunk.delta_content()?;
        self.content.push_str(delta);
        Some(delta.to_string())
    }
}

impl Render for StreamedChat {
    fn render(&self) -> String {
        format!(
            "id: {}  model: {}  chunks: {}  chars: {} ({})",
            self.id,
            self.model,
            self.chunks,
            self.content.chars().count(),
            self.finish_reason.as_deref().unwrap_or("-")
        )
    }
}

/// Receiving half of a stream callback.
pub struct StreamBridge {
    data_rx: mpsc::UnboundedReceiver<ChatCompletionChunk>,
    done_rx: oneshot::Receiver<Option<genai_client::Error>>,
}

/// Creates a callback for [`genai_client::Client::chat_stream`] and the
/// bridge that consumes what it delivers.
pub fn bridge() -> (impl FnMut(StreamEvent) + Send + 'static, StreamBridge) {
    let (data_tx, data_rx) = mpsc::unbounded_channel();
    let (done_tx, done_rx) = oneshot::channel();
    let mut done_tx = Some(done_tx);

    let callback = move |event: StreamEvent| match event {
        StreamEvent::Chunk(chunk) => {
            let _ = data_tx.send(chunk);
        }
        StreamEvent::Done(err) => {
            if let Some(tx) = done_tx.take() {
                let _ = tx.send(err);
            }
        }
    };

    (callback, StreamBridge { data_rx, done_rx })
}

impl StreamBridge {
    /// Waits for chunks until the completion signal, writing each delta to
    /// `out` as it arrives and a newline at the end.
    ///
    /// Returns only after completion was signalled (or its sender vanished),
    /// together with whatever text had been received.
    pub async fn drain<W>(mut self, out: &mut W) -> (StreamedChat, Option<genai_client::Error>)
    where
        W: Write + Send,
    {
        let mut chat = StreamedChat::default();

        let terminal = loop {
            tokio::select! {
                biased;
                Some(chunk) = self.data_rx.recv() => {
                    emit(&mut chat, &chunk, out);
                }
                done = &mut self.done_rx => {
                    break done.unwrap_or_else(|_| {
                        Some(genai_client::Error::Stream(
                            "stream closed without completion".to_string(),
                        ))
                    });
                }
            }
        };

        // Chunks sent just before completion may still be queued.
        while let Ok(chunk) = self.data_rx.try_recv() {
            emit(&mut chat, &chunk, out);
        }

        if let Err(err) = writeln!(out).and_then(|_| out.flush()) {
            tracing::debug!("failed to echo stream output: {}", err);
        }
        tracing::debug!("stream drained: {} chunks", chat.chunks);
        (chat, terminal)
    }
}

fn emit<W: Write>(chat: &mut StreamedChat, chunk: &ChatCompletionChunk, out: &mut W) {
    if let Some(delta) = chat.absorb(chunk) {
        if let Err(err) = write!(out, "{}", delta).and_then(|_| out.flush()) {
            tracing::debug!("failed to echo stream output: {}", err);
        }
    }
}

fn prompt_for(date: NaiveDate) -> String {
    format!(
        "What are the historical events happened on {}",
        date.format("%m/%d")
    )
}

pub(super) async fn chat_completion_stream(config: &AppConfig) -> ScenarioResult {
    let client = config.client();
    let request = ChatCompletionRequest::new(
        models::GPT_3_5_TURBO_0613,
        vec![ChatMessage::user(prompt_for(Local::now().date_naive()))],
    );

    let (callback, bridge) = bridge();
    client.chat_stream(&request, callback).await?;

    let mut stdout = std::io::stdout();
    match bridge.drain(&mut stdout).await {
        (chat, None) => Ok(Box::new(chat)),
        (chat, Some(source)) => Err(ScenarioError::Stream {
            partial: chat.content,
            source,
        }),
    }
}
