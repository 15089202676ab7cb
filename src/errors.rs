//! Scenario error types
//!
//! Every failure a scenario can produce is folded into [`ScenarioError`] at
//! the scenario boundary, so the runner is the single place errors are
//! reported and counted.

use std::path::PathBuf;

use genai_client::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    /// Local input could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transport or API failure reported by the client
    #[error(transparent)]
    Client(#[from] genai_client::Error),

    /// Streaming ended with an error after delivering `partial`
    #[error("stream failed after {} bytes of output: {source}", .partial.len())]
    Stream {
        partial: String,
        #[source]
        source: genai_client::Error,
    },
}

impl ScenarioError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScenarioError::Io {
            path: path.into(),
            source,
        }
    }

    /// Structured API details, when the failure came from the API.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ScenarioError::Client(err) | ScenarioError::Stream { source: err, .. } => {
                err.api_error()
            }
            ScenarioError::Io { .. } => None,
        }
    }

    /// Text received before a streaming failure.
    pub fn partial_output(&self) -> Option<&str> {
        match self {
            ScenarioError::Stream { partial, .. } => Some(partial),
            _ => None,
        }
    }
}
