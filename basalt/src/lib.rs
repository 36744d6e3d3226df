#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(tail_expr_drop_order)]
//! Basalt is a typed async client for the Amazon Bedrock runtime API.
//!
//! Every operation is one `POST /model/{model-id}/invoke` call: build a
//! typed request, send it, decode the JSON reply. Three model families are
//! covered:
//!
//! - **Anthropic Claude** chat and vision ([`anthropic`])
//! - **Amazon Titan** text and multimodal embeddings ([`titan`])
//! - **Stability AI Stable Diffusion** image generation ([`stability`])
//!
//! Requests that the service would reject are rejected locally at
//! construction time, failures carry typed causes, and retry is an
//! explicit, configurable policy on the client.
//!
//! # Example
//!
//! ```rust,ignore
//! use basalt::RuntimeClient;
//! use basalt::anthropic::{self, ChatRequest};
//!
//! let client = RuntimeClient::from_env();
//! let claude = client.completion_model(anthropic::CLAUDE_3_5_SONNET);
//! let text = claude.invoke_text(&ChatRequest::text("Hello!")).await?;
//! ```

pub mod anthropic;
pub mod client;
pub mod config;
pub mod error;
pub mod image;
pub mod stability;
pub mod titan;
pub mod util;

// Re-export the client entry points
pub use client::{API_KEY_ENV, DEFAULT_REGION, REGION_ENV, RuntimeClient, RuntimeClientBuilder};

// Re-export configuration types
pub use config::{HttpClientConfig, RetryConfig};

// Re-export error types
pub use error::{Error, Result, ValidationError};
