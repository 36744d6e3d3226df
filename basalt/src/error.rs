//! Error types for Bedrock runtime operations.
//!
//! The error hierarchy separates three failure families so callers can
//! react to each programmatically:
//! - transport failures (connect, timeout) and non-2xx service replies
//! - malformed or unexpected response bodies
//! - invalid request parameters, rejected before anything is sent

/// Result type alias for basalt operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Bedrock runtime operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Network-level failure while talking to the service.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("Service returned HTTP {status}: {message}")]
    Service {
        /// HTTP status code returned by the service.
        status: u16,
        /// Response body text, if any was readable.
        message: String,
    },

    /// The response decoded as JSON but did not contain the expected fields.
    #[error("Unexpected response format: {0}")]
    ResponseFormat(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request parameters were rejected before the call was issued.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Base64 payload could not be decoded.
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Image data could not be decoded or encoded.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a service error from an HTTP status and response body.
    #[must_use]
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    /// Create a response format error with a message.
    #[must_use]
    pub fn response_format(msg: impl Into<String>) -> Self {
        Self::ResponseFormat(msg.into())
    }

    /// Check whether retrying the call might succeed.
    ///
    /// Connection failures, timeouts, throttling (HTTP 429) and server-side
    /// errors (HTTP 5xx) are considered transient. Validation and decode
    /// failures are permanent.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(err) => err.is_timeout() || err.is_connect(),
            Self::Service { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }
}

/// Error type for request parameters rejected at construction time.
///
/// Carried by [`Error::Validation`] once a request reaches the client, but
/// produced directly by request builders so invalid records never exist.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The prompt list was empty.
    #[error("Prompt list must not be empty")]
    EmptyPromptList,

    /// A prompt exceeded the maximum length.
    #[error("Prompt exceeds {max} characters (got {length})")]
    PromptTooLong {
        /// Actual prompt length in characters.
        length: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// A dimension was not a multiple of the required step.
    #[error("{field} must be a multiple of {step}, got {value}")]
    DimensionNotMultiple {
        /// Name of the offending field.
        field: &'static str,
        /// Supplied value.
        value: u32,
        /// Required step size.
        step: u32,
    },

    /// A dimension was below the minimum.
    #[error("{field} must be at least {min}, got {value}")]
    DimensionTooSmall {
        /// Name of the offending field.
        field: &'static str,
        /// Supplied value.
        value: u32,
        /// Minimum permitted value.
        min: u32,
    },

    /// A numeric parameter fell outside its permitted range.
    #[error("{field} must be within [{min}, {max}], got {value}")]
    ValueOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Supplied value.
        value: f64,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },

    /// The init image for an image-to-image request was empty.
    #[error("Init image must not be empty")]
    EmptyInitImage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_retryable() {
        assert!(Error::service(429, "throttled").is_retryable());
        assert!(Error::service(500, "internal").is_retryable());
        assert!(Error::service(503, "unavailable").is_retryable());
        assert!(!Error::service(400, "bad request").is_retryable());
        assert!(!Error::service(403, "forbidden").is_retryable());
    }

    #[test]
    fn test_validation_error_not_retryable() {
        let err = Error::from(ValidationError::EmptyPromptList);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::DimensionNotMultiple {
            field: "height",
            value: 500,
            step: 64,
        };
        assert_eq!(err.to_string(), "height must be a multiple of 64, got 500");

        let err = ValidationError::ValueOutOfRange {
            field: "cfg_scale",
            value: 36.0,
            min: 0.0,
            max: 35.0,
        };
        assert_eq!(err.to_string(), "cfg_scale must be within [0, 35], got 36");
    }
}
