//! Request and response models for the API endpoints.

pub mod chat;
pub mod completion;
pub mod images;

use serde::Deserialize;

/// Token accounting reported with completion responses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Well-known model identifiers.
pub mod models {
    pub const TEXT_DAVINCI_003: &str = "text-davinci-003";
    pub const GPT_3_5_TURBO: &str = "gpt-3.5-turbo";
    pub const GPT_3_5_TURBO_0613: &str = "gpt-3.5-turbo-0613";
    pub const GPT_4: &str = "gpt-4";
}
