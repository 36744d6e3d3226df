//! Bedrock runtime client.
//!
//! Provides [`RuntimeClient`], the shared entry point that owns the HTTP
//! transport, the bearer credentials, the regional endpoint and the retry
//! policy. Model handles for the supported families are created from it:
//!
//! ```rust,ignore
//! use basalt::RuntimeClient;
//! use basalt::anthropic;
//!
//! let client = RuntimeClient::from_env();
//! let claude = client.completion_model(anthropic::CLAUDE_3_5_SONNET);
//! ```

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::anthropic::CompletionModel;
use crate::config::{HttpClientConfig, RetryConfig};
use crate::error::{Error, Result};
use crate::stability::ImageGenerationModel;
use crate::titan::EmbeddingModel;

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-west-2";

/// Environment variable holding the Bedrock bearer token.
pub const API_KEY_ENV: &str = "AWS_BEARER_TOKEN_BEDROCK";

/// Environment variable holding the region override.
pub const REGION_ENV: &str = "AWS_REGION";

/// Client for the Bedrock runtime API.
///
/// One invocation is one `POST /model/{model-id}/invoke` call carrying a
/// JSON body whose schema is fixed by the model family. The client itself
/// is model-agnostic; typed request building and response decoding live in
/// the per-family model handles.
///
/// Cloning is cheap and all configuration is immutable after construction,
/// so a single client can be shared freely across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use basalt::RuntimeClient;
///
/// // From the AWS_BEARER_TOKEN_BEDROCK environment variable
/// let client = RuntimeClient::from_env();
///
/// // With explicit configuration
/// let client = RuntimeClient::builder()
///     .api_key("bedrock-api-key")
///     .region("eu-central-1")
///     .build();
/// ```
#[derive(Clone)]
pub struct RuntimeClient {
    http_client: reqwest::Client,
    api_key: Arc<str>,
    endpoint: Arc<str>,
    region: Arc<str>,
    retry: RetryConfig,
}

impl std::fmt::Debug for RuntimeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeClient")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("retry", &self.retry)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl RuntimeClient {
    /// Create a new client with the given API key and default settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder().api_key(api_key).build()
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> RuntimeClientBuilder {
        RuntimeClientBuilder::default()
    }

    /// Create a new client from environment variables.
    ///
    /// Uses `AWS_BEARER_TOKEN_BEDROCK` for the bearer token and optionally
    /// `AWS_REGION` for the region.
    ///
    /// # Panics
    ///
    /// Panics if `AWS_BEARER_TOKEN_BEDROCK` is not set.
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .expect("AWS_BEARER_TOKEN_BEDROCK environment variable not set");

        let mut builder = Self::builder().api_key(api_key);

        if let Ok(region) = std::env::var(REGION_ENV) {
            builder = builder.region(region);
        }

        builder.build()
    }

    /// The configured region.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The endpoint URL invocations are sent to, without a trailing slash.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Create a chat/vision completion model handle.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let client = RuntimeClient::from_env();
    /// let claude = client.completion_model(basalt::anthropic::CLAUDE_3_5_SONNET);
    /// ```
    #[must_use]
    pub fn completion_model(&self, model_id: impl Into<String>) -> CompletionModel {
        CompletionModel::new(self.clone(), model_id)
    }

    /// Create an embedding model handle.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let client = RuntimeClient::from_env();
    /// let titan = client.embedding_model(basalt::titan::TITAN_EMBED_TEXT_V2);
    /// ```
    #[must_use]
    pub fn embedding_model(&self, model_id: impl Into<String>) -> EmbeddingModel {
        EmbeddingModel::new(self.clone(), model_id)
    }

    /// Create an image generation model handle.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let client = RuntimeClient::from_env();
    /// let sdxl = client.image_generation_model(basalt::stability::SDXL_V1);
    /// ```
    #[must_use]
    pub fn image_generation_model(&self, model_id: impl Into<String>) -> ImageGenerationModel {
        ImageGenerationModel::new(self.clone(), model_id)
    }

    /// Invoke a model with a serialized request body and return the raw
    /// response body text.
    ///
    /// Transient failures are retried according to the configured
    /// [`RetryConfig`]; permanent failures return immediately.
    #[instrument(skip(self, body), fields(model = %model_id))]
    pub(crate) async fn invoke(&self, model_id: &str, body: &serde_json::Value) -> Result<String> {
        let url = format!("{}/model/{model_id}/invoke", self.endpoint);

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.send(&url, body).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.delay_for_attempt(attempt - 1);
                    warn!(attempt, delay = ?delay, error = %err, "invocation failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Issue a single invocation attempt.
    async fn send(&self, url: &str, body: &serde_json::Value) -> Result<String> {
        debug!(url, "sending invoke request");

        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::service(status.as_u16(), message));
        }

        Ok(response.text().await?)
    }
}

/// Builder for [`RuntimeClient`].
#[derive(Debug, Default)]
pub struct RuntimeClientBuilder {
    api_key: Option<String>,
    region: Option<String>,
    endpoint: Option<String>,
    http_config: Option<HttpClientConfig>,
    retry: Option<RetryConfig>,
}

impl RuntimeClientBuilder {
    /// Set the bearer API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the region the endpoint URL is derived from.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set an explicit endpoint URL, overriding the regional default.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the HTTP transport configuration.
    #[must_use]
    pub fn http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = Some(config);
        self
    }

    /// Set the retry policy.
    #[must_use]
    pub const fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Build the client.
    ///
    /// # Panics
    ///
    /// Panics if the API key is not set or if the HTTP client fails to
    /// build.
    #[must_use]
    pub fn build(self) -> RuntimeClient {
        let api_key = self.api_key.expect("API key is required");
        let region = self.region.unwrap_or_else(|| DEFAULT_REGION.to_string());
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| format!("https://bedrock-runtime.{region}.amazonaws.com"));
        let http_client = self.http_config.unwrap_or_default().build_client();

        RuntimeClient {
            http_client,
            api_key: api_key.into(),
            endpoint: endpoint.trim_end_matches('/').into(),
            region: region.into(),
            retry: self.retry.unwrap_or_default(),
        }
    }
}
