//! CLI error types.

use std::fmt;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// The local runtime process is not running.
    RuntimeUnavailable,
    /// Fetching from the runtime endpoint failed.
    Fetch {
        /// URL the fetch was issued against.
        url: String,
        /// Underlying transport failure.
        source: reqwest::Error,
    },
    /// Decoding a runtime response failed.
    Decode {
        /// URL the response came from.
        url: String,
        /// Underlying decode failure.
        source: serde_json::Error,
    },
    /// Cloud service error.
    Api(spice_api::ApiError),
    /// Session log sink error.
    Logs(spice_logs::SinkError),
    /// Command execution failed.
    Command(String),
    /// Output formatting error.
    Format(String),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RuntimeUnavailable => write!(
                f,
                "the runtime is not running: start it with 'spice run' and try again"
            ),
            Self::Fetch { url, source } => write!(f, "error fetching {url}: {source}"),
            Self::Decode { url, source } => {
                write!(f, "error decoding response from {url}: {source}")
            }
            Self::Api(e) => write!(f, "{e}"),
            Self::Logs(e) => write!(f, "{e}"),
            Self::Command(msg) => write!(f, "command error: {msg}"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::Api(e) => Some(e),
            Self::Logs(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<spice_api::ApiError> for CliError {
    fn from(err: spice_api::ApiError) -> Self {
        Self::Api(err)
    }
}

impl From<spice_logs::SinkError> for CliError {
    fn from(err: spice_logs::SinkError) -> Self {
        Self::Logs(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
