//! # spice-api
//!
//! Client for the Spice.ai cloud service.
//!
//! Provides:
//! - Base-URL selection (environment override, development and production
//!   endpoints)
//! - Authorization-URL construction for the browser login flow
//! - Authorization-code exchange for an access token
//! - Operator identity resolution ([`AuthContext`])
//!
//! # Architecture
//!
//! The CLI talks to the cloud service over HTTPS. [`SpiceApiClient`] hides
//! endpoint selection and bearer-token attachment; each operation is
//! stateless so callers can retry or skip steps (for example a cached
//! token path) without carrying session state between calls.
//!
//! ```text
//! ┌───────────┐        HTTPS          ┌─────────────────┐
//! │ spice-cli │◄─────────────────────►│  spice.ai cloud │
//! └───────────┘   (bearer token)      └─────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod types;
pub mod version;

pub use client::SpiceApiClient;
pub use error::ApiError;
pub use types::{AppInfo, AuthContext, OrgInfo, TokenExchange};
