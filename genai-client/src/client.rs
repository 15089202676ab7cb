//! HTTP client for the generative-AI REST API.

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    multipart::{Form, Part},
};

use crate::error::{ApiError, Error, Result};
use crate::stream::{self, StreamEvent};
use crate::types::{
    chat::{ChatCompletionRequest, ChatCompletionResponse},
    completion::{CompletionRequest, CompletionResponse},
    images::{
        ImageEditRequest, ImageFile, ImageResponse, ImageResponseFormat, ImageSize,
        ImageVariationRequest,
    },
};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Creates a client authenticating with `api_key` against
    /// [`DEFAULT_BASE_URL`].
    ///
    /// The key is not validated; an empty or wrong key surfaces as an
    /// [`Error::Api`] on the first request.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Points the client at a different API root, e.g. a proxy or a mock
    /// server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(err) => tracing::warn!(
                "API key is not a valid header value, sending request without Authorization: {}",
                err
            ),
        }
        headers
    }

    // ========== Completions ==========

    pub async fn completion(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        tracing::debug!("POST completions model={}", request.model);
        let response = self
            .http_client
            .post(self.url("completions"))
            .headers(self.auth_headers())
            .json(request)
            .send()
            .await?;

        handle_response(response).await
    }

    // ========== Images ==========

    pub async fn edit_image(&self, request: ImageEditRequest) -> Result<ImageResponse> {
        tracing::debug!("POST images/edits ({} bytes)", request.image.bytes.len());
        let mut form = Form::new()
            .part("image", image_part(request.image)?)
            .text("prompt", request.prompt);

        if let Some(mask) = request.mask {
            form = form.part("mask", image_part(mask)?);
        }
        form = image_options(form, request.n, request.size, request.response_format);
        if let Some(user) = request.user {
            form = form.text("user", user);
        }

        self.send_form("images/edits", form).await
    }

    pub async fn create_image_variation(
        &self,
        request: ImageVariationRequest,
    ) -> Result<ImageResponse> {
        tracing::debug!("POST images/variations ({} bytes)", request.image.bytes.len());
        let mut form = Form::new().part("image", image_part(request.image)?);

        form = image_options(form, request.n, request.size, request.response_format);
        if let Some(user) = request.user {
            form = form.text("user", user);
        }

        self.send_form("images/variations", form).await
    }

    async fn send_form(&self, path: &str, form: Form) -> Result<ImageResponse> {
        let response = self
            .http_client
            .post(self.url(path))
            .headers(self.auth_headers())
            .multipart(form)
            .send()
            .await?;

        handle_response(response).await
    }

    // ========== Chat ==========

    pub async fn chat(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        tracing::debug!("POST chat/completions model={}", request.model);
        let mut request = request.clone();
        request.stream = false;

        let response = self
            .http_client
            .post(self.url("chat/completions"))
            .headers(self.auth_headers())
            .json(&request)
            .send()
            .await?;

        handle_response(response).await
    }

    /// Starts a streamed chat completion.
    ///
    /// The request is sent and its status checked before this returns; a
    /// rejected request is reported here and `callback` is never called.
    /// On success the body is read on a spawned task which invokes
    /// `callback` with each [`StreamEvent::Chunk`] in arrival order and
    /// finally exactly once with [`StreamEvent::Done`].
    ///
    /// Must be called from within a tokio runtime.
    pub async fn chat_stream<F>(&self, request: &ChatCompletionRequest, callback: F) -> Result<()>
    where
        F: FnMut(StreamEvent) + Send + 'static,
    {
        tracing::debug!("POST chat/completions model={} (stream)", request.model);
        let mut request = request.clone();
        request.stream = true;

        let response = self
            .http_client
            .post(self.url("chat/completions"))
            .headers(self.auth_headers())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(ApiError::from_response(status, &body)));
        }

        tokio::spawn(stream::pump(response.bytes_stream(), callback));
        Ok(())
    }
}

fn image_part(image: ImageFile) -> Result<Part> {
    let part = Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str("image/png")?;
    Ok(part)
}

fn image_options(
    mut form: Form,
    n: Option<u32>,
    size: Option<ImageSize>,
    response_format: Option<ImageResponseFormat>,
) -> Form {
    if let Some(n) = n {
        form = form.text("n", n.to_string());
    }
    if let Some(size) = size {
        form = form.text("size", size.as_str());
    }
    if let Some(format) = response_format {
        form = form.text("response_format", format.as_str());
    }
    form
}

/// Parses a success body as `T`, or turns the response into [`Error::Api`].
async fn handle_response<T>(response: reqwest::Response) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();

    if status.is_success() {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    } else {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("API returned {}: {}", status, body);
        Err(Error::Api(ApiError::from_response(status, &body)))
    }
}
