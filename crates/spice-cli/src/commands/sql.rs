//! Interactive SQL session command.
//!
//! The REPL itself lives in the runtime binary; this command only spawns
//! it with `--repl` and hands over the standard streams.

use crate::error::CliError;
use crate::runtime::RuntimeContext;

/// SQL command executor.
pub struct SqlCommand {
    rtcontext: RuntimeContext,
}

impl SqlCommand {
    /// Create a new SQL command.
    #[must_use]
    pub fn new(rtcontext: RuntimeContext) -> Self {
        Self { rtcontext }
    }

    /// Execute the SQL command, blocking until the REPL exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime binary cannot be launched or exits
    /// with a failure status.
    pub async fn execute(&self) -> Result<(), CliError> {
        self.rtcontext.run_repl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sql_fails_when_runtime_binary_is_missing() {
        // No `spiced` on the test PATH; the spawn itself should fail with
        // a command error naming the binary.
        if which_spiced() {
            return;
        }
        let cmd = SqlCommand::new(RuntimeContext::default());
        let err = cmd.execute().await.expect_err("binary is missing");
        assert!(err.to_string().contains("spiced"));
    }

    fn which_spiced() -> bool {
        std::env::var_os("PATH")
            .map(|paths| {
                std::env::split_paths(&paths).any(|dir| dir.join("spiced").is_file())
            })
            .unwrap_or(false)
    }
}
