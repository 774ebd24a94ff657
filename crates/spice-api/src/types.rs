//! Wire types for the cloud service API.
//!
//! This module defines:
//! - [`AuthContext`]: identity resolved for the current operator
//! - [`OrgInfo`] / [`AppInfo`]: organization and application membership
//! - [`TokenExchange`]: outcome of an authorization-code exchange

use serde::{Deserialize, Serialize};

/// Identity resolved for the current operator.
///
/// Every field is optional: the service omits fields depending on the
/// operator's enrollment state. A fresh value is fetched on every
/// resolution call and is never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Operator email, when enrolled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Operator username, when enrolled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Organization the operator resolved into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<OrgInfo>,
    /// Application the operator resolved into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<AppInfo>,
}

/// Organization membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgInfo {
    /// Numeric organization id.
    #[serde(default)]
    pub id: i64,
    /// Organization name.
    #[serde(default)]
    pub name: String,
}

/// Application membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    /// Numeric application id.
    #[serde(default)]
    pub id: i64,
    /// Application name.
    #[serde(default)]
    pub name: String,
    /// API key issued for the application.
    #[serde(default)]
    pub api_key: String,
}

/// Wire shape of a token-exchange response. Both fields are optional on
/// the wire; exactly one of them is meaningful per response.
#[derive(Debug, Deserialize)]
struct RawTokenResponse {
    #[serde(default)]
    access_denied: bool,
    #[serde(default)]
    access_token: Option<String>,
}

/// Outcome of an authorization-code exchange.
///
/// A response carrying neither an access token nor the denied flag is
/// malformed and fails at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTokenResponse")]
pub enum TokenExchange {
    /// The service granted an access token.
    Granted {
        /// Bearer credential for subsequent API calls.
        access_token: String,
    },
    /// The service denied the exchange.
    Denied,
}

impl TokenExchange {
    /// Returns the granted token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        match self {
            Self::Granted { access_token } => Some(access_token),
            Self::Denied => None,
        }
    }
}

impl TryFrom<RawTokenResponse> for TokenExchange {
    type Error = String;

    fn try_from(raw: RawTokenResponse) -> Result<Self, Self::Error> {
        if raw.access_denied {
            Ok(Self::Denied)
        } else if let Some(access_token) = raw.access_token {
            Ok(Self::Granted { access_token })
        } else {
            Err("token response carries neither access_token nor access_denied".into())
        }
    }
}
