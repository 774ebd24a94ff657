//! Error types for the cloud service client.

use thiserror::Error;

/// Errors that can occur talking to the cloud service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response body could not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// URL the request was issued against.
        url: String,
        /// Underlying transport failure.
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not valid JSON for the expected shape.
    #[error("invalid response from {url}: {source}")]
    Decode {
        /// URL the response came from.
        url: String,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// An environment variable is set but cannot be read as unicode.
    #[error("environment variable {name} is set but not valid unicode")]
    InvalidEnv {
        /// Name of the offending variable.
        name: &'static str,
    },
}

/// Result type alias for cloud service operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_invalid_env() {
        let err = ApiError::InvalidEnv {
            name: "SPICE_BASE_URL",
        };
        assert_eq!(
            err.to_string(),
            "environment variable SPICE_BASE_URL is set but not valid unicode"
        );
    }

    #[test]
    fn error_display_decode_includes_url() {
        let source = serde_json::from_str::<serde_json::Value>("not json")
            .expect_err("should fail to parse");
        let err = ApiError::Decode {
            url: "https://spice.ai/api/spice-cli/auth".into(),
            source,
        };
        assert!(err.to_string().contains("https://spice.ai/api/spice-cli/auth"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}
