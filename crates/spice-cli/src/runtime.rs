//! Runtime process context.
//!
//! The CLI controls a separately-running data runtime over a local HTTP
//! endpoint. [`RuntimeContext`] carries that endpoint and spawns the
//! runtime binary for the interactive SQL session.

use std::process::Stdio;

use tokio::process::Command;

use crate::error::CliError;

/// Default local HTTP endpoint exposed by the runtime.
pub const DEFAULT_HTTP_ENDPOINT: &str = "http://localhost:3000";

/// Runtime binary name, resolved from PATH.
const RUNTIME_BIN: &str = "spiced";

/// Handle onto the locally-running runtime.
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    http_endpoint: String,
}

impl RuntimeContext {
    /// Create a context for the given local HTTP endpoint.
    #[must_use]
    pub fn new(http_endpoint: impl Into<String>) -> Self {
        Self {
            http_endpoint: http_endpoint.into(),
        }
    }

    /// The runtime's local HTTP endpoint.
    #[must_use]
    pub fn http_endpoint(&self) -> &str {
        &self.http_endpoint
    }

    /// Spawn the runtime binary as an interactive REPL and wait for it.
    ///
    /// The three standard streams are handed to the child unmodified; the
    /// REPL owns the terminal until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime binary cannot be launched or exits
    /// with a failure status.
    pub async fn run_repl(&self) -> Result<(), CliError> {
        let status = Command::new(RUNTIME_BIN)
            .arg("--repl")
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| CliError::Command(format!("failed to launch '{RUNTIME_BIN}': {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(CliError::Command(format!(
                "'{RUNTIME_BIN} --repl' exited with {status}"
            )))
        }
    }
}

impl Default for RuntimeContext {
    fn default() -> Self {
        Self::new(DEFAULT_HTTP_ENDPOINT)
    }
}
