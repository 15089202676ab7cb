//! # genai-client
//!
//! A small async client for an OpenAI-compatible generative-AI REST API:
//! text completion, image edit and variation, chat completion, and streamed
//! chat completion delivered through a callback.
//!
//! ```no_run
//! use genai_client::{models, ChatCompletionRequest, ChatMessage, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), genai_client::Error> {
//!     let client = Client::new(std::env::var("OPENAI_API_KEY").unwrap_or_default());
//!     let request = ChatCompletionRequest::new(
//!         models::GPT_3_5_TURBO,
//!         vec![ChatMessage::user("Hello!")],
//!     );
//!     let response = client.chat(&request).await?;
//!     println!("{:?}", response.choices.first().map(|c| &c.message.content));
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod stream;
pub mod types;

pub use client::{Client, DEFAULT_BASE_URL};
pub use error::{ApiError, Error, Result};
pub use stream::StreamEvent;
pub use types::{
    chat::{
        ChatChoice, ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse,
        ChatDelta, ChatMessage, ChunkChoice, Role,
    },
    completion::{CompletionChoice, CompletionRequest, CompletionResponse},
    images::{
        ImageData, ImageEditRequest, ImageFile, ImageResponse, ImageResponseFormat, ImageSize,
        ImageVariationRequest,
    },
    models, Usage,
};
