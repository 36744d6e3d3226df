//! Anthropic Claude models on the Bedrock runtime.
//!
//! Implements the Bedrock flavor of the Anthropic Messages API: a single
//! multimodal user message (text, optionally an image, optionally a system
//! instruction) is sent per invocation and one assistant message comes
//! back.
//!
//! # Example
//!
//! ```rust,ignore
//! use basalt::RuntimeClient;
//! use basalt::anthropic::{self, ChatRequest, ImageSource};
//!
//! let client = RuntimeClient::from_env();
//! let claude = client.completion_model(anthropic::CLAUDE_3_5_SONNET);
//!
//! let request = ChatRequest::text("Describe this image.")
//!     .with_image(ImageSource::webp(image_base64))
//!     .with_system("You are a terse assistant.");
//!
//! let answer = claude.invoke_text(&request).await?;
//! ```

mod completion;
mod message;

pub use completion::{CompletionModel, GenerationConfig};
pub use message::{
    ChatRequest, ContentBlock, ImageSource, MediaType, MessageResponse, Role, StopReason,
    TokenUsage,
};

/// Anthropic API version the Bedrock runtime expects in every request body.
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Claude 3.5 Sonnet model identifier.
pub const CLAUDE_3_5_SONNET: &str = "anthropic.claude-3-5-sonnet-20240620-v1:0";
