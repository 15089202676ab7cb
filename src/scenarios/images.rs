use std::path::Path;

use genai_client::{ImageEditRequest, ImageFile, ImageSize, ImageVariationRequest};

use super::ScenarioResult;
use crate::config::AppConfig;
use crate::errors::ScenarioError;

/// Reads the whole image up front; no file handle outlives this call.
async fn load_image(path: &Path) -> Result<ImageFile, ScenarioError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| ScenarioError::io(path, err))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image.png".to_string());
    tracing::debug!("loaded {} ({} bytes)", path.display(), bytes.len());
    Ok(ImageFile::new(file_name, bytes))
}

pub(super) async fn image_edit(config: &AppConfig) -> ScenarioResult {
    let client = config.client();
    let request = ImageEditRequest {
        image: load_image(&config.image_path).await?,
        prompt: "A cute baby sea otter with big cheese".to_string(),
        size: Some(ImageSize::Size256),
        ..Default::default()
    };
    let response = client.edit_image(request).await?;
    Ok(Box::new(response))
}

pub(super) async fn image_variation(config: &AppConfig) -> ScenarioResult {
    let client = config.client();
    let request = ImageVariationRequest {
        image: load_image(&config.image_path).await?,
        size: Some(ImageSize::Size256),
        ..Default::default()
    };
    let response = client.create_image_variation(request).await?;
    Ok(Box::new(response))
}
