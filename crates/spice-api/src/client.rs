//! HTTP client for the Spice.ai cloud service.
//!
//! # Example
//!
//! ```rust,no_run
//! use spice_api::SpiceApiClient;
//!
//! # async fn example() -> Result<(), spice_api::ApiError> {
//! let client = SpiceApiClient::new()?;
//! let exchange = client.exchange_code("one-time-code").await?;
//! # Ok(())
//! # }
//! ```

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::types::{AuthContext, TokenExchange};
use crate::version;

/// Production service endpoint.
const PROD_BASE_URL: &str = "https://spice.ai";

/// Service endpoint used by development builds.
const DEV_BASE_URL: &str = "https://dev.spice.xyz";

/// Environment variable overriding the service endpoint unconditionally.
const BASE_URL_ENV: &str = "SPICE_BASE_URL";

/// Cloud service client.
///
/// Holds the selected base URL and a connection pool; every operation is
/// otherwise stateless.
#[derive(Debug, Clone)]
pub struct SpiceApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl SpiceApiClient {
    /// Create a client against the configured service endpoint.
    ///
    /// `SPICE_BASE_URL` wins unconditionally when set; otherwise
    /// development builds (version [`version::DEV_VERSION`]) talk to the
    /// development endpoint and everything else to production.
    ///
    /// # Errors
    ///
    /// Returns an error only if `SPICE_BASE_URL` is set but not valid
    /// unicode.
    pub fn new() -> Result<Self> {
        let override_url = match std::env::var(BASE_URL_ENV) {
            Ok(url) => Some(url),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                return Err(ApiError::InvalidEnv { name: BASE_URL_ENV });
            }
        };
        Ok(Self::with_base_url(resolve_base_url(
            override_url,
            version::version(),
        )))
    }

    /// Create a client against an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// The selected service base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL the operator's browser should visit to complete a token
    /// exchange for `auth_code`. Pure composition, no network call.
    #[must_use]
    pub fn auth_url(&self, auth_code: &str) -> String {
        format!("{}/auth/token?code={}", self.base_url, auth_code)
    }

    /// Resolve the operator identity for the given organization and
    /// application names.
    ///
    /// Issues one authenticated GET; the names are forwarded as-is, any
    /// rejection is surfaced as whatever the service returns.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the request cannot be sent or
    /// the response cannot be read, [`ApiError::Decode`] if the body is
    /// not valid [`AuthContext`] JSON.
    pub async fn auth_context(
        &self,
        access_token: &str,
        org_name: &str,
        app_name: &str,
    ) -> Result<AuthContext> {
        let url = format!(
            "{}/api/spice-cli/auth?org_name={org_name}&app_name={app_name}",
            self.base_url
        );
        debug!(%url, "resolving auth context");

        let body = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?
            .bytes()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        decode(&url, &body)
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Neither the code nor the resulting token is logged or persisted;
    /// that is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Same failure taxonomy as [`Self::auth_context`].
    pub async fn exchange_code(&self, auth_code: &str) -> Result<TokenExchange> {
        let url = format!("{}/auth/token/exchange", self.base_url);
        debug!(%url, "exchanging authorization code");

        let body = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "code": auth_code }))
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?
            .bytes()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        decode(&url, &body)
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Select the service base URL from the environment override and the
/// reported build version. An explicit override always wins.
fn resolve_base_url(override_url: Option<String>, build_version: &str) -> String {
    if let Some(url) = override_url {
        return url;
    }
    if build_version == version::DEV_VERSION {
        DEV_BASE_URL.to_string()
    } else {
        PROD_BASE_URL.to_string()
    }
}
