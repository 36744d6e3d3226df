//! Amazon Titan embedding models on the Bedrock runtime.
//!
//! Two model families share the same wire shape: the text model embeds a
//! string, the multimodal model embeds a string, an image, or both.
//!
//! # Example
//!
//! ```rust,ignore
//! use basalt::RuntimeClient;
//! use basalt::titan::{self, EmbeddingInput};
//!
//! let client = RuntimeClient::from_env();
//! let titan = client.embedding_model(titan::TITAN_EMBED_TEXT_V2);
//!
//! let vector = titan.embed_text("a red bicycle").await?;
//! ```

mod embedding;

pub use embedding::{EmbeddingInput, EmbeddingModel, EmbeddingResponse};

/// Titan text embedding model identifier.
pub const TITAN_EMBED_TEXT_V2: &str = "amazon.titan-embed-text-v2:0";

/// Titan multimodal embedding model identifier.
pub const TITAN_EMBED_IMAGE_V1: &str = "amazon.titan-embed-image-v1";
