use std::{collections::HashMap, path::PathBuf};

use genai_client::Client;

pub const DEFAULT_IMAGE_PATH: &str = "./testdata/baby-sea-otter.png";

/// Runtime configuration, loaded once from environment variables and passed
/// to every scenario.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub image_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut values = HashMap::new();
        for (key, default) in Self::tracked_keys() {
            let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
            values.insert(key.to_string(), value);
        }
        Self::from_map(&values)
    }

    pub fn from_map(values: &HashMap<String, String>) -> Self {
        fn read(values: &HashMap<String, String>, key: &str, default: &str) -> String {
            values
                .get(key)
                .cloned()
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        }

        Self {
            // Missing credentials are not an error here; the API rejects
            // each request instead.
            api_key: values.get("OPENAI_API_KEY").cloned().unwrap_or_default(),
            base_url: values
                .get("OPENAI_BASE_URL")
                .cloned()
                .filter(|value| !value.is_empty()),
            image_path: PathBuf::from(read(values, "GENAI_TESTAPP_IMAGE", DEFAULT_IMAGE_PATH)),
        }
    }

    fn tracked_keys() -> Vec<(&'static str, &'static str)> {
        vec![
            ("OPENAI_API_KEY", ""),
            ("OPENAI_BASE_URL", ""),
            ("GENAI_TESTAPP_IMAGE", DEFAULT_IMAGE_PATH),
        ]
    }

    /// Builds a fresh API client from this configuration.
    pub fn client(&self) -> Client {
        let client = Client::new(self.api_key.clone());
        match &self.base_url {
            Some(url) => client.with_base_url(url.clone()),
            None => client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_map(&HashMap::new());
        assert!(config.api_key.is_empty());
        assert!(config.base_url.is_none());
        assert_eq!(config.image_path, PathBuf::from(DEFAULT_IMAGE_PATH));
        assert_eq!(config.client().base_url(), genai_client::DEFAULT_BASE_URL);
    }

    #[test]
    fn overrides_from_values() {
        let config = AppConfig::from_map(&map(&[
            ("OPENAI_API_KEY", "sk-abc"),
            ("OPENAI_BASE_URL", "http://127.0.0.1:9000/v1"),
            ("GENAI_TESTAPP_IMAGE", "/tmp/otter.png"),
        ]));
        assert_eq!(config.api_key, "sk-abc");
        assert_eq!(config.image_path, PathBuf::from("/tmp/otter.png"));
        assert_eq!(config.client().base_url(), "http://127.0.0.1:9000/v1");
    }

    #[test]
    fn empty_values_fall_back() {
        let config = AppConfig::from_map(&map(&[("OPENAI_BASE_URL", ""), ("GENAI_TESTAPP_IMAGE", "")]));
        assert!(config.base_url.is_none());
        assert_eq!(config.image_path, PathBuf::from(DEFAULT_IMAGE_PATH));
    }
}
