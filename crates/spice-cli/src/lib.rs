//! # spice-cli
//!
//! Spice command-line interface: the client-side control layer for the
//! Spice data runtime.
//!
//! Provides commands for:
//! - Cloud login (authorization-code exchange, identity resolution)
//! - Resource listings fetched from the runtime's local HTTP endpoint
//! - An interactive SQL session (spawned runtime REPL)
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐     local HTTP      ┌─────────────────┐
//! │ spice-cli │◄───────────────────►│  spice runtime  │
//! └─────┬─────┘    (/v1/... )       └─────────────────┘
//!       │
//!       │ HTTPS via spice-api (bearer token)
//!       ▼
//! ┌─────────────────┐
//! │  spice.ai cloud │
//! └─────────────────┘
//! ```
//!
//! Session diagnostics are structured `tracing` records written to a
//! rotating file sink under `~/.spice/log` (see `spice-logs`).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod fetch;
pub mod output;
pub mod runtime;
pub mod spec;

pub use cli::{Cli, Commands, Format, LoginArgs};
pub use error::CliError;
pub use output::OutputFormat;
pub use runtime::RuntimeContext;
