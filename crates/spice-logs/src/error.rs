//! Error types for session log sinks.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur creating or writing a session log sink.
///
/// Both creation variants are fatal: there is no degraded log-to-nowhere
/// fallback, the caller decides whether to abort the session or proceed
/// without logging.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The log directory could not be resolved or created.
    #[error("failed to create log directory {path}: {source}")]
    DirectoryCreate {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying filesystem failure.
        #[source]
        source: io::Error,
    },

    /// The log file could not be created.
    #[error("failed to create log file {path}: {source}")]
    FileCreate {
        /// File that could not be created.
        path: PathBuf,
        /// Underlying filesystem failure.
        #[source]
        source: io::Error,
    },
}

/// Result type alias for sink operations.
pub type Result<T> = std::result::Result<T, SinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_path() {
        let err = SinkError::FileCreate {
            path: PathBuf::from("/tmp/.spice/log/cli.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/.spice/log/cli.log"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SinkError>();
    }
}
