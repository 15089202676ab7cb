use genai_client::{models, CompletionRequest};

use super::ScenarioResult;
use crate::config::AppConfig;

pub(super) async fn completion(config: &AppConfig) -> ScenarioResult {
    let client = config.client();
    let request = CompletionRequest::new(models::TEXT_DAVINCI_003, "Say this is a test");
    let response = client.completion(&request).await?;
    Ok(Box::new(response))
}
