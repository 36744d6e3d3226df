//! Image generation model for Stable Diffusion on Bedrock.

use serde::Deserialize;
use tracing::{debug, instrument};

use super::request::{ImageToImageRequest, TextToImageRequest};
use crate::client::RuntimeClient;
use crate::error::{Error, Result};

/// Outcome of generating a single artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// The artifact was generated successfully.
    Success,
    /// Generation failed.
    Error,
    /// The artifact was withheld by the content filter.
    ContentFiltered,
}

/// A single generated image.
#[derive(Debug, Clone, Deserialize)]
pub struct Artifact {
    /// The image, base64-encoded.
    #[serde(default)]
    pub base64: String,
    /// The seed the service used for this artifact.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Outcome of generating this artifact.
    #[serde(rename = "finishReason", default)]
    pub finish_reason: Option<FinishReason>,
}

/// Decoded response of one generation invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    /// Overall result reported by the service.
    #[serde(default)]
    pub result: Option<String>,
    /// Generated artifacts, one per requested sample.
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl GenerationResponse {
    /// The base64 payload of the first artifact, if any were returned.
    #[must_use]
    pub fn first_base64(&self) -> Option<&str> {
        self.artifacts.first().map(|artifact| artifact.base64.as_str())
    }
}

/// Image generation model handle.
///
/// Created via [`RuntimeClient::image_generation_model`].
#[derive(Debug, Clone)]
pub struct ImageGenerationModel {
    client: RuntimeClient,
    model_id: String,
}

impl ImageGenerationModel {
    /// Create a new image generation model handle.
    pub(crate) fn new(client: RuntimeClient, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    /// The model identifier this handle invokes.
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Invoke the model and decode the response.
    #[instrument(skip(self, body), fields(model = %self.model_id))]
    async fn invoke_model(&self, body: &serde_json::Value) -> Result<GenerationResponse> {
        let text = self.client.invoke(&self.model_id, body).await?;
        let response: GenerationResponse = serde_json::from_str(&text)?;

        debug!(artifacts = response.artifacts.len(), "generation response received");

        Ok(response)
    }

    /// Generate images from text prompts and decode the full response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] or [`Error::Service`] when the call
    /// fails, and [`Error::Json`] when the response body is not a valid
    /// generation response.
    pub async fn generate(&self, request: &TextToImageRequest) -> Result<GenerationResponse> {
        self.invoke_model(&serde_json::to_value(request)?).await
    }

    /// Transform an init image guided by text prompts and decode the full
    /// response.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`generate`](Self::generate).
    pub async fn transform(&self, request: &ImageToImageRequest) -> Result<GenerationResponse> {
        self.invoke_model(&serde_json::to_value(request)?).await
    }

    /// Generate images from text prompts and return the first artifact's
    /// base64 payload.
    ///
    /// # Errors
    ///
    /// In addition to the failures of [`generate`](Self::generate), returns
    /// [`Error::ResponseFormat`] when the response carries no artifacts.
    pub async fn text_to_image(&self, request: &TextToImageRequest) -> Result<String> {
        let response = self.generate(request).await?;
        response
            .first_base64()
            .map(str::to_owned)
            .ok_or_else(|| Error::response_format("generation response contained no artifacts"))
    }

    /// Transform an init image and return the first artifact's base64
    /// payload.
    ///
    /// # Errors
    ///
    /// In addition to the failures of [`transform`](Self::transform),
    /// returns [`Error::ResponseFormat`] when the response carries no
    /// artifacts.
    pub async fn image_to_image(&self, request: &ImageToImageRequest) -> Result<String> {
        let response = self.transform(request).await?;
        response
            .first_base64()
            .map(str::to_owned)
            .ok_or_else(|| Error::response_format("generation response contained no artifacts"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_decodes() {
        let body = r#"{
            "result": "success",
            "artifacts": [
                {"base64": "aW1hZ2U=", "seed": 1885337276, "finishReason": "SUCCESS"}
            ]
        }"#;
        let response: GenerationResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.result.as_deref(), Some("success"));
        assert_eq!(response.first_base64(), Some("aW1hZ2U="));
        assert_eq!(
            response.artifacts[0].finish_reason,
            Some(FinishReason::Success)
        );
        assert_eq!(response.artifacts[0].seed, Some(1_885_337_276));
    }

    #[test]
    fn test_content_filtered_artifact() {
        let body = r#"{"artifacts": [{"base64": "", "finishReason": "CONTENT_FILTERED"}]}"#;
        let response: GenerationResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.artifacts[0].finish_reason,
            Some(FinishReason::ContentFiltered)
        );
    }

    #[test]
    fn test_empty_response_has_no_artifact() {
        let response: GenerationResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.first_base64(), None);
    }
}
