//! CLI command implementations.
//!
//! One executor struct per command, writing to a caller-supplied sink so
//! tests can capture output.

mod datasets;
mod login;
mod sql;

pub use datasets::DatasetsCommand;
pub use login::LoginCommand;
pub use sql::SqlCommand;
