use serde::Deserialize;

/// Output size; sent as a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Size256,
    Size512,
    Size1024,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Size256 => "256x256",
            ImageSize::Size512 => "512x512",
            ImageSize::Size1024 => "1024x1024",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageResponseFormat {
    Url,
    B64Json,
}

impl ImageResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageResponseFormat::Url => "url",
            ImageResponseFormat::B64Json => "b64_json",
        }
    }
}

/// Source image uploaded as a multipart file part.
#[derive(Debug, Clone, Default)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Form fields of `POST /images/edits`.
#[derive(Debug, Clone, Default)]
pub struct ImageEditRequest {
    pub image: ImageFile,
    pub mask: Option<ImageFile>,
    pub prompt: String,
    pub n: Option<u32>,
    pub size: Option<ImageSize>,
    pub response_format: Option<ImageResponseFormat>,
    pub user: Option<String>,
}

/// Form fields of `POST /images/variations`.
#[derive(Debug, Clone, Default)]
pub struct ImageVariationRequest {
    pub image: ImageFile,
    pub n: Option<u32>,
    pub size: Option<ImageSize>,
    pub response_format: Option<ImageResponseFormat>,
    pub user: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub b64_json: Option<String>,
}
