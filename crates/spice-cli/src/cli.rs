//! Command-line argument parsing with clap.

use clap::{Parser, Subcommand, ValueEnum};

use crate::runtime::DEFAULT_HTTP_ENDPOINT;

/// Spice CLI - control layer for the Spice data runtime.
#[derive(Parser, Debug, Clone)]
#[command(name = "spice")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Local runtime HTTP endpoint.
    #[arg(
        long,
        env = "SPICE_RUNTIME_ENDPOINT",
        default_value = DEFAULT_HTTP_ENDPOINT
    )]
    pub runtime_endpoint: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in to the Spice.ai cloud service.
    Login(LoginArgs),

    /// List datasets registered with the runtime.
    Datasets,

    /// Start an interactive SQL query session against the runtime.
    Sql,

    /// Show the CLI version.
    Version,
}

/// Arguments for the login command.
#[derive(Parser, Debug, Clone)]
pub struct LoginArgs {
    /// Authorization code from the browser login flow. Without it, a new
    /// code is generated and the authorization URL printed.
    pub code: Option<String>,

    /// Organization name to resolve into.
    #[arg(short, long, default_value = "")]
    pub org: String,

    /// Application name to resolve into.
    #[arg(short, long, default_value = "")]
    pub app: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_datasets() {
        let cli = Cli::parse_from(["spice", "datasets"]);
        assert!(matches!(cli.command, Commands::Datasets));
        assert_eq!(cli.runtime_endpoint, DEFAULT_HTTP_ENDPOINT);
    }

    #[test]
    fn cli_parses_login_with_code_and_names() {
        let cli = Cli::parse_from(["spice", "login", "A1B2-C3D4", "--org", "acme"]);
        match cli.command {
            Commands::Login(args) => {
                assert_eq!(args.code.as_deref(), Some("A1B2-C3D4"));
                assert_eq!(args.org, "acme");
                assert_eq!(args.app, "");
            }
            other => panic!("expected login command, got {other:?}"),
        }
    }

    #[test]
    fn cli_respects_format_flag() {
        let cli = Cli::parse_from(["spice", "--format", "json", "datasets"]);
        assert_eq!(cli.format, Format::Json);
    }

    #[test]
    fn cli_respects_runtime_endpoint_flag() {
        let cli = Cli::parse_from([
            "spice",
            "--runtime-endpoint",
            "http://localhost:9999",
            "sql",
        ]);
        assert_eq!(cli.runtime_endpoint, "http://localhost:9999");
        assert!(matches!(cli.command, Commands::Sql));
    }
}
