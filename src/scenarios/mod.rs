//! The fixed, ordered list of API scenarios.

mod chat;
mod completion;
mod images;
pub mod stream;

use futures::future::{BoxFuture, FutureExt};

use crate::config::AppConfig;
use crate::errors::ScenarioError;
use crate::render::Render;

pub type ScenarioOutput = Box<dyn Render>;
pub type ScenarioResult = Result<ScenarioOutput, ScenarioError>;

type Operation = Box<dyn for<'a> Fn(&'a AppConfig) -> BoxFuture<'a, ScenarioResult> + Send + Sync>;

/// One named unit of work performing a single API call pattern.
pub struct Scenario {
    name: String,
    skip: bool,
    operation: Operation,
}

impl Scenario {
    pub fn new<F>(name: impl Into<String>, operation: F) -> Self
    where
        F: for<'a> Fn(&'a AppConfig) -> BoxFuture<'a, ScenarioResult> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            skip: false,
            operation: Box::new(operation),
        }
    }

    /// Marks the scenario so it is never executed, whatever the filter.
    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_skipped(&self) -> bool {
        self.skip
    }

    pub async fn run(&self, config: &AppConfig) -> ScenarioResult {
        (self.operation)(config).await
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("skip", &self.skip)
            .finish_non_exhaustive()
    }
}

/// All scenarios in execution order.
pub fn registry() -> Vec<Scenario> {
    vec![
        Scenario::new("completion", |config| completion::completion(config).boxed()),
        Scenario::new("image_edit", |config| images::image_edit(config).boxed()),
        Scenario::new("image_variation", |config| {
            images::image_variation(config).boxed()
        }),
        Scenario::new("chat_completion", |config| chat::chat_completion(config).boxed()),
        // gpt-4 needs account access most keys lack
        Scenario::new("chat_completion_gpt4", |config| {
            chat::chat_completion_gpt4(config).boxed()
        })
        .skipped(),
        Scenario::new("chat_completion_stream", |config| {
            stream::chat_completion_stream(config).boxed()
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_and_skip_flags() {
        let scenarios = registry();
        let names: Vec<_> = scenarios.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "completion",
                "image_edit",
                "image_variation",
                "chat_completion",
                "chat_completion_gpt4",
                "chat_completion_stream",
            ]
        );

        let skipped: Vec<_> = scenarios
            .iter()
            .filter(|s| s.is_skipped())
            .map(|s| s.name())
            .collect();
        assert_eq!(skipped, vec!["chat_completion_gpt4"]);
    }

    #[tokio::test]
    async fn run_invokes_operation() {
        let scenario = Scenario::new("echo", |config| {
            let key = config.api_key.clone();
            async move { Ok(Box::new(key) as ScenarioOutput) }.boxed()
        });
        let config = AppConfig {
            api_key: "sk-echo".to_string(),
            base_url: None,
            image_path: "unused.png".into(),
        };

        let output = scenario.run(&config).await.unwrap();
        assert_eq!(output.render(), "sk-echo");
    }
}
