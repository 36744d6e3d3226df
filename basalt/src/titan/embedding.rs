//! Embedding model for Amazon Titan on Bedrock.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::RuntimeClient;
use crate::error::Result;

/// Input to an embedding invocation.
///
/// The wire body carries `inputText` and/or `inputImage`; an input with
/// neither is not representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddingInput {
    /// Embed a piece of text.
    Text(String),
    /// Embed a base64-encoded image.
    Image(String),
    /// Embed text and an image jointly (multimodal models only).
    TextAndImage {
        /// The text part.
        text: String,
        /// The base64-encoded image part.
        image: String,
    },
}

impl EmbeddingInput {
    /// Create a text input.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create an image input from base64 data.
    #[must_use]
    pub fn image(image_base64: impl Into<String>) -> Self {
        Self::Image(image_base64.into())
    }

    /// Create a joint text-and-image input.
    #[must_use]
    pub fn text_and_image(text: impl Into<String>, image_base64: impl Into<String>) -> Self {
        Self::TextAndImage {
            text: text.into(),
            image: image_base64.into(),
        }
    }

    fn text_part(&self) -> Option<&str> {
        match self {
            Self::Text(text) | Self::TextAndImage { text, .. } => Some(text),
            Self::Image(_) => None,
        }
    }

    fn image_part(&self) -> Option<&str> {
        match self {
            Self::Image(image) | Self::TextAndImage { image, .. } => Some(image),
            Self::Text(_) => None,
        }
    }
}

/// Wire request body for Titan embedding models.
#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    #[serde(rename = "inputText", skip_serializing_if = "Option::is_none")]
    input_text: Option<&'a str>,
    #[serde(rename = "inputImage", skip_serializing_if = "Option::is_none")]
    input_image: Option<&'a str>,
}

/// Decoded response of one embedding invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingResponse {
    /// The embedding vector.
    #[serde(default)]
    pub embedding: Vec<f32>,
    /// Number of input tokens consumed, when the model reports it.
    #[serde(rename = "inputTextTokenCount", default)]
    pub input_text_token_count: Option<u32>,
}

/// Embedding model handle.
///
/// Created via [`RuntimeClient::embedding_model`].
#[derive(Debug, Clone)]
pub struct EmbeddingModel {
    client: RuntimeClient,
    model_id: String,
}

impl EmbeddingModel {
    /// Create a new embedding model handle.
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

    /// Invoke the model and decode the full response.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] or [`crate::Error::Service`]
    /// when the call fails, and [`crate::Error::Json`] when the response
    /// body is not a valid embedding response.
    #[instrument(skip(self, input), fields(model = %self.model_id))]
    pub async fn embed_request(&self, input: &EmbeddingInput) -> Result<EmbeddingResponse> {
        let body = serde_json::to_value(EmbeddingRequest {
            input_text: input.text_part(),
            input_image: input.image_part(),
        })?;
        let text = self.client.invoke(&self.model_id, &body).await?;
        let response: EmbeddingResponse = serde_json::from_str(&text)?;

        debug!(
            dimension = response.embedding.len(),
            input_tokens = ?response.input_text_token_count,
            "embedding received"
        );

        Ok(response)
    }

    /// Invoke the model and return the embedding vector.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`embed_request`](Self::embed_request).
    pub async fn embed(&self, input: &EmbeddingInput) -> Result<Vec<f32>> {
        Ok(self.embed_request(input).await?.embedding)
    }

    /// Embed a piece of text.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`embed_request`](Self::embed_request).
    pub async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        self.embed(&EmbeddingInput::text(text)).await
    }

    /// Embed a base64-encoded image (multimodal models only).
    ///
    /// # Errors
    ///
    /// Same failure modes as [`embed_request`](Self::embed_request).
    pub async fn embed_image(&self, image_base64: &str) -> Result<Vec<f32>> {
        self.embed(&EmbeddingInput::image(image_base64)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_text_only() {
        let input = EmbeddingInput::text("a red bicycle");
        let body = serde_json::to_value(EmbeddingRequest {
            input_text: input.text_part(),
            input_image: input.image_part(),
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({"inputText": "a red bicycle"}));
    }

    #[test]
    fn test_request_body_image_only() {
        let input = EmbeddingInput::image("QUJD");
        let body = serde_json::to_value(EmbeddingRequest {
            input_text: input.text_part(),
            input_image: input.image_part(),
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({"inputImage": "QUJD"}));
    }

    #[test]
    fn test_request_body_text_and_image() {
        let input = EmbeddingInput::text_and_image("a red bicycle", "QUJD");
        let body = serde_json::to_value(EmbeddingRequest {
            input_text: input.text_part(),
            input_image: input.image_part(),
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({"inputText": "a red bicycle", "inputImage": "QUJD"})
        );
    }

    #[test]
    fn test_response_decodes() {
        let body = r#"{"embedding": [0.1, -0.25, 0.5], "inputTextTokenCount": 4}"#;
        let response: EmbeddingResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.embedding.len(), 3);
        assert_eq!(response.input_text_token_count, Some(4));
    }
}
