use genai_client::{models, ChatCompletionRequest, ChatMessage};

use super::ScenarioResult;
use crate::config::AppConfig;

async fn chat(config: &AppConfig, model: &str, message: &str) -> ScenarioResult {
    let client = config.client();
    let request = ChatCompletionRequest::new(model, vec![ChatMessage::user(message)]);
    let response = client.chat(&request).await?;
    Ok(Box::new(response))
}

pub(super) async fn chat_completion(config: &AppConfig) -> ScenarioResult {
    chat(config, models::GPT_3_5_TURBO, "Hello!").await
}

pub(super) async fn chat_completion_gpt4(config: &AppConfig) -> ScenarioResult {
    chat(config, models::GPT_4, "Who are you?").await
}
