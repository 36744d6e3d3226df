//! Completion model for the Anthropic Messages API on Bedrock.

use serde_json::Value;
use tracing::{debug, instrument};

use super::message::{ChatRequest, MessageResponse};
use crate::client::RuntimeClient;
use crate::error::{Error, Result};

/// Generation parameters applied to every invocation of a
/// [`CompletionModel`].
///
/// The defaults are tuned for deterministic extraction tasks rather than
/// creative writing: a low temperature, conservative nucleus sampling and
/// stop sequences that cut off chat-transcript continuations.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Maximum number of tokens to generate. Default: 4096.
    pub max_tokens: u32,
    /// Sampling temperature. Default: 0.1.
    pub temperature: f32,
    /// Nucleus sampling probability mass. Default: 0.9.
    pub top_p: f32,
    /// Number of candidate tokens considered at each step. Default: 250.
    pub top_k: u32,
    /// Sequences that terminate generation. Default: `["Human:", "H: "]`.
    pub stop_sequences: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            temperature: 0.1,
            top_p: 0.9,
            top_k: 250,
            stop_sequences: vec!["Human:".to_string(), "H: ".to_string()],
        }
    }
}

impl GenerationConfig {
    /// Set the maximum number of tokens to generate.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the nucleus sampling probability mass.
    #[must_use]
    pub const fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    /// Set the number of candidate tokens considered at each step.
    #[must_use]
    pub const fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    /// Replace the stop sequences.
    #[must_use]
    pub fn with_stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop_sequences = stop_sequences;
        self
    }
}

/// Chat/vision completion model handle.
///
/// Created via [`RuntimeClient::completion_model`]. Each invocation builds
/// one user message from a [`ChatRequest`], issues one call and decodes
/// the assistant reply.
#[derive(Debug, Clone)]
pub struct CompletionModel {
    client: RuntimeClient,
    model_id: String,
    config: GenerationConfig,
}

impl CompletionModel {
    /// Create a new completion model handle.
    pub(crate) fn new(client: RuntimeClient, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            config: GenerationConfig::default(),
        }
    }

    /// Replace the generation parameters for this handle.
    #[must_use]
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    /// The model identifier this handle invokes.
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// The generation parameters applied to every invocation.
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Build the request body for the Messages API.
    fn build_request_body(&self, request: &ChatRequest) -> Value {
        let mut body = serde_json::json!({
            "anthropic_version": super::ANTHROPIC_VERSION,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "top_p": self.config.top_p,
            "top_k": self.config.top_k,
            "stop_sequences": self.config.stop_sequences,
            "messages": [{
                "role": "user",
                "content": request.content(),
            }],
        });

        if let Some(system) = request.system() {
            body["system"] = Value::String(system.to_string());
        }

        body
    }

    /// Invoke the model and decode the full response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] or [`Error::Service`] when the call
    /// fails, and [`Error::Json`] when the response body is not a valid
    /// Messages API response.
    #[instrument(skip(self, request), fields(model = %self.model_id))]
    pub async fn invoke(&self, request: &ChatRequest) -> Result<MessageResponse> {
        let body = self.build_request_body(request);
        let text = self.client.invoke(&self.model_id, &body).await?;
        let response: MessageResponse = serde_json::from_str(&text)?;

        debug!(
            stop_reason = ?response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "completion received"
        );

        Ok(response)
    }

    /// Invoke the model and return the text of the first content block.
    ///
    /// # Errors
    ///
    /// In addition to the failures of [`invoke`](Self::invoke), returns
    /// [`Error::ResponseFormat`] when the response carries no leading text
    /// block.
    pub async fn invoke_text(&self, request: &ChatRequest) -> Result<String> {
        let response = self.invoke(request).await?;
        response
            .text()
            .map(str::to_owned)
            .ok_or_else(|| Error::response_format("response contained no text content"))
    }
}
