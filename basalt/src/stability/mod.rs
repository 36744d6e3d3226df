//! Stability AI Stable Diffusion models on the Bedrock runtime.
//!
//! Request records are validated at construction: prompt lists are
//! non-empty, dimensions are multiples of 64, and every numeric parameter
//! is range-checked before anything touches the network. A record that
//! exists can be sent.
//!
//! # Example
//!
//! ```rust,ignore
//! use basalt::RuntimeClient;
//! use basalt::stability::{self, StylePreset, TextToImageRequest};
//!
//! let client = RuntimeClient::from_env();
//! let sdxl = client.image_generation_model(stability::SDXL_V1);
//!
//! let request = TextToImageRequest::builder()
//!     .prompt("a lighthouse in a thunderstorm")
//!     .style_preset(StylePreset::Cinematic)
//!     .build()?;
//!
//! let image_base64 = sdxl.text_to_image(&request).await?;
//! ```

mod generation;
mod request;

pub use generation::{Artifact, FinishReason, GenerationResponse, ImageGenerationModel};
pub use request::{
    ClipGuidancePreset, DIMENSION_STEP, ImageSize, ImageToImageRequest,
    ImageToImageRequestBuilder, InitImageMode, MAX_PROMPT_LENGTH, MIN_DIMENSION, Sampler,
    StylePreset, TextPrompt, TextToImageRequest, TextToImageRequestBuilder,
};

/// Stable Diffusion XL 1.0 model identifier.
pub const SDXL_V1: &str = "stability.stable-diffusion-xl-v1";
