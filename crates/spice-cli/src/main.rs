//! Spice CLI binary entrypoint.
//!
//! This is the main entry point for the `spice` command-line tool.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use spice_cli::cli::{Cli, Commands};
use spice_cli::commands::{DatasetsCommand, LoginCommand, SqlCommand};
use spice_cli::error::CliError;
use spice_cli::output::OutputFormat;
use spice_cli::runtime::RuntimeContext;
use spice_logs::{FileSink, FileSinkConfig};

fn main() -> ExitCode {
    // Session diagnostics go to a rotating file under ~/.spice; a sink
    // failure aborts the session, there is no log-to-nowhere fallback.
    let sink = match session_sink() {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing_subscriber::fmt()
        .json()
        .with_max_level(LevelFilter::DEBUG)
        .with_writer(sink)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn session_sink() -> Result<FileSink, CliError> {
    Ok(FileSink::create(FileSinkConfig::new("cli", dot_spice_path()?))?)
}

/// Resolve `~/.spice`, the CLI's working directory.
fn dot_spice_path() -> Result<PathBuf, CliError> {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".spice"))
        .ok_or_else(|| CliError::Command("HOME is not set; cannot resolve ~/.spice".into()))
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let format = OutputFormat::new(cli.format);
    let rtcontext = RuntimeContext::new(cli.runtime_endpoint.clone());
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Login(args) => {
            let cmd = LoginCommand::new()?;
            cmd.execute(&mut stdout, &format, &args).await?;
        }
        Commands::Datasets => {
            let cmd = DatasetsCommand::new(rtcontext);
            cmd.execute(&mut stdout, &format).await?;
        }
        Commands::Sql => {
            let cmd = SqlCommand::new(rtcontext);
            cmd.execute().await?;
        }
        Commands::Version => {
            writeln!(stdout, "spice {}", spice_api::version::version())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spice_cli::cli::Format;

    #[test]
    fn cli_parses_version() {
        let cli = Cli::parse_from(["spice", "version"]);
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn cli_parses_login() {
        let cli = Cli::parse_from(["spice", "login"]);
        match cli.command {
            Commands::Login(args) => assert!(args.code.is_none()),
            other => panic!("expected login command, got {other:?}"),
        }
    }

    #[test]
    fn cli_defaults_to_table_format() {
        let cli = Cli::parse_from(["spice", "datasets"]);
        assert_eq!(cli.format, Format::Table);
    }

    #[tokio::test]
    async fn run_datasets_without_runtime_fails() {
        // Nothing listens on the default endpoint in the test environment;
        // the command must fail rather than print an empty listing.
        let cli = Cli::parse_from([
            "spice",
            "--runtime-endpoint",
            "http://127.0.0.1:9",
            "datasets",
        ]);
        let result = run(cli).await;
        assert!(result.is_err());
    }
}
