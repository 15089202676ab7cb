//! Error types for the API client.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Error type for client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response.
    #[error("{0}")]
    Api(ApiError),

    /// Event stream broke while reading.
    #[error("Stream error: {0}")]
    Stream(String),
}

impl Error {
    /// Structured API error details, if the server returned any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Error body returned by the API for non-success responses.
///
/// The wire shape is `{"error": {"message", "type", "param", "code"}}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiError {
    /// Numeric HTTP status code.
    pub status_code: u16,
    /// Status line, e.g. `401 Unauthorized`.
    pub status: String,
    /// Error category reported by the API (`type` on the wire).
    pub kind: String,
    pub message: String,
    pub code: Option<String>,
    pub param: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub(crate) error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    param: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    code: Option<String>,
}

impl ApiError {
    /// Builds an error from a response status and its raw body.
    ///
    /// Bodies that are not the standard error envelope are kept verbatim as
    /// the message.
    pub fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        let status_code = status.as_u16();
        let status = status.to_string();

        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => Self::from_body(status_code, status, envelope.error),
            Err(_) => Self {
                status_code,
                status,
                message: body.trim().to_string(),
                ..Default::default()
            },
        }
    }

    pub(crate) fn from_body(status_code: u16, status: String, body: ErrorBody) -> Self {
        Self {
            status_code,
            status,
            kind: body.kind.unwrap_or_default(),
            message: body.message,
            code: body.code,
            param: body.param,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status.is_empty() {
            write!(f, "API error: {}", self.message)
        } else {
            write!(f, "API error ({}): {}", self.status, self.message)
        }
    }
}

impl std::error::Error for ApiError {}

// `code` is usually a string but some deployments send integers.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// A specialized Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn parses_standard_error_envelope() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","param":null,"code":"invalid_api_key"}}"#;
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, body);

        assert_eq!(err.status_code, 401);
        assert_eq!(err.status, "401 Unauthorized");
        assert_eq!(err.kind, "invalid_request_error");
        assert_eq!(err.message, "Incorrect API key provided");
        assert_eq!(err.code.as_deref(), Some("invalid_api_key"));
        assert_eq!(err.param, None);
    }

    #[test]
    fn numeric_code_is_kept_as_text() {
        let body = r#"{"error":{"message":"overloaded","type":"server_error","code":503}}"#;
        let err = ApiError::from_response(StatusCode::SERVICE_UNAVAILABLE, body);
        assert_eq!(err.code.as_deref(), Some("503"));
    }

    #[test]
    fn non_envelope_body_becomes_message() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(err.message, "upstream down");
        assert!(err.kind.is_empty());
        assert_eq!(err.to_string(), "API error (502 Bad Gateway): upstream down");
    }

    #[test]
    fn api_error_accessor() {
        let err = Error::Api(ApiError::default());
        assert!(err.api_error().is_some());
        assert!(Error::Stream("eof".into()).api_error().is_none());
    }
}
