//! Message types for the Anthropic Messages API on Bedrock.
//!
//! Request content is an ordered sequence of [`ContentBlock`]s inside one
//! user message; the response mirrors the same block structure.

use serde::{Deserialize, Serialize};

/// Media type of an image passed to a vision model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    /// `image/jpeg`
    #[serde(rename = "image/jpeg")]
    Jpeg,
    /// `image/png`
    #[serde(rename = "image/png")]
    Png,
    /// `image/gif`
    #[serde(rename = "image/gif")]
    Gif,
    /// `image/webp`
    #[serde(rename = "image/webp")]
    Webp,
}

/// Encoding of an [`ImageSource`] payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Raw image bytes encoded as base64.
    #[serde(rename = "base64")]
    Base64,
}

/// An image payload inside a content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    #[serde(rename = "type")]
    source_type: SourceType,
    media_type: MediaType,
    data: String,
}

impl ImageSource {
    /// Create a base64 image source with an explicit media type.
    #[must_use]
    pub fn base64(media_type: MediaType, data: impl Into<String>) -> Self {
        Self {
            source_type: SourceType::Base64,
            media_type,
            data: data.into(),
        }
    }

    /// Create a base64 `image/webp` source, the format produced by
    /// [`crate::image::encode_image_base64`].
    #[must_use]
    pub fn webp(data: impl Into<String>) -> Self {
        Self::base64(MediaType::Webp, data)
    }

    /// The media type of the payload.
    #[must_use]
    pub const fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// The base64-encoded payload.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }
}

/// One typed unit of a multimodal message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// A text segment.
    Text {
        /// The text itself.
        text: String,
    },
    /// An inline image.
    Image {
        /// The image payload.
        source: ImageSource,
    },
}

impl ContentBlock {
    /// Create a text block.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an image block.
    #[must_use]
    pub const fn image(source: ImageSource) -> Self {
        Self::Image { source }
    }
}

/// A single multimodal user message plus an optional system instruction.
///
/// Every invocation sends exactly one user message; conversation history
/// is not managed by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    content: Vec<ContentBlock>,
    system: Option<String>,
}

impl ChatRequest {
    /// Create a request starting with a text block.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            system: None,
        }
    }

    /// Create a request containing only an image block.
    #[must_use]
    pub fn image(source: ImageSource) -> Self {
        Self {
            content: vec![ContentBlock::image(source)],
            system: None,
        }
    }

    /// Append an image block to the message content.
    #[must_use]
    pub fn with_image(mut self, source: ImageSource) -> Self {
        self.content.push(ContentBlock::image(source));
        self
    }

    /// Set the system instruction.
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// The ordered content blocks of the user message.
    #[must_use]
    pub fn content(&self) -> &[ContentBlock] {
        &self.content
    }

    /// The system instruction, if set.
    #[must_use]
    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }
}

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The caller.
    User,
    /// The model.
    Assistant,
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The model finished its turn naturally.
    EndTurn,
    /// The `max_tokens` limit was reached.
    MaxTokens,
    /// A configured stop sequence was produced.
    StopSequence,
    /// The model requested a tool invocation.
    ToolUse,
}

/// Token counts reported by the service for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the request.
    #[serde(default)]
    pub input_tokens: u32,
    /// Tokens produced in the response.
    #[serde(default)]
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Total tokens across input and output.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }

    /// Whether no usage was reported.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.input_tokens == 0 && self.output_tokens == 0
    }
}

/// Decoded response of one Messages API invocation.
///
/// Every field is optional on the wire; a body containing nothing but
/// `content` still decodes.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    /// Provider-assigned message identifier.
    #[serde(default)]
    pub id: String,
    /// Identifier of the model that produced the response.
    #[serde(default)]
    pub model: String,
    /// Author role, `assistant` for responses.
    #[serde(default)]
    pub role: Option<Role>,
    /// Ordered response content blocks.
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    /// Why generation stopped.
    #[serde(default)]
    pub stop_reason: Option<StopReason>,
    /// The stop sequence that fired, when `stop_reason` is `stop_sequence`.
    #[serde(default)]
    pub stop_sequence: Option<String>,
    /// Token accounting for the invocation.
    #[serde(default)]
    pub usage: TokenUsage,
}

impl MessageResponse {
    /// The text of the first content block, if that block is text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self.content.first() {
            Some(ContentBlock::Text { text }) => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_block_serialization() {
        let block = ContentBlock::text("hello");
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json, serde_json::json!({"type": "text", "text": "hello"}));
    }

    #[test]
    fn test_image_block_serialization() {
        let block = ContentBlock::image(ImageSource::webp("QUJD"));
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "image",
                "source": {
                    "type": "base64",
                    "media_type": "image/webp",
                    "data": "QUJD"
                }
            })
        );
    }

    #[test]
    fn test_chat_request_composition() {
        let request = ChatRequest::text("what is in this picture?")
            .with_image(ImageSource::base64(MediaType::Png, "iVBOR"))
            .with_system("answer briefly");

        assert_eq!(request.content().len(), 2);
        assert_eq!(request.system(), Some("answer briefly"));
        assert!(matches!(request.content()[0], ContentBlock::Text { .. }));
        assert!(matches!(request.content()[1], ContentBlock::Image { .. }));
    }

    #[test]
    fn test_minimal_response_decodes() {
        let body = r#"{"content":[{"type":"text","text":"hello"}]}"#;
        let response: MessageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text(), Some("hello"));
        assert!(response.stop_reason.is_none());
        assert!(response.usage.is_empty());
    }

    #[test]
    fn test_full_response_decodes() {
        let body = r#"{
            "id": "msg_01XFDUDYJgAACzvnptvVoYEL",
            "type": "message",
            "role": "assistant",
            "model": "anthropic.claude-3-5-sonnet-20240620-v1:0",
            "content": [{"type": "text", "text": "Hi! My name is Claude."}],
            "stop_reason": "end_turn",
            "stop_sequence": null,
            "usage": {"input_tokens": 12, "output_tokens": 6}
        }"#;
        let response: MessageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.role, Some(Role::Assistant));
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
        assert_eq!(response.usage.total(), 18);
        assert_eq!(response.text(), Some("Hi! My name is Claude."));
    }

    #[test]
    fn test_first_block_not_text() {
        let response = MessageResponse {
            id: String::new(),
            model: String::new(),
            role: None,
            content: vec![ContentBlock::image(ImageSource::webp("QUJD"))],
            stop_reason: None,
            stop_sequence: None,
            usage: TokenUsage::default(),
        };
        assert_eq!(response.text(), None);
    }
}
