//! # spice-logs
//!
//! Rotating, retention-bounded log sink for CLI session diagnostics.
//!
//! Provides:
//! - [`FileSink`] — a session log file under `{root}/log`, named
//!   `{name}-{UTC timestamp}.log`, rotated at a size cap with bounded
//!   backup count and age
//! - [`FileSinkConfig`] — per-creation parameters
//! - `tracing_subscriber::fmt::MakeWriter` integration, so the sink
//!   backs a JSON-formatted `tracing` subscriber
//!
//! # Example
//!
//! ```rust,no_run
//! use spice_logs::{FileSink, FileSinkConfig};
//!
//! # fn example() -> Result<(), spice_logs::SinkError> {
//! let sink = FileSink::create(FileSinkConfig::new("cli", "/home/op/.spice"))?;
//! tracing_subscriber::fmt()
//!     .json()
//!     .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
//!     .with_writer(sink)
//!     .init();
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod sink;

pub use error::SinkError;
pub use sink::{FileSink, FileSinkConfig, SinkWriter};
