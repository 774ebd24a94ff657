//! Cloud login command.
//!
//! Without an authorization code, generates one and prints the URL the
//! operator's browser should visit. With a code, exchanges it for an
//! access token and renders the resolved identity. Neither the code nor
//! the token is persisted.

use std::io::Write;

use rand::Rng;
use spice_api::{AuthContext, SpiceApiClient, TokenExchange};

use crate::cli::LoginArgs;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Login command executor.
pub struct LoginCommand {
    client: SpiceApiClient,
}

impl LoginCommand {
    /// Create a login command against the configured cloud endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint override cannot be read.
    pub fn new() -> Result<Self, CliError> {
        Ok(Self {
            client: SpiceApiClient::new()?,
        })
    }

    /// Create a login command with an explicit client.
    #[must_use]
    pub fn with_client(client: SpiceApiClient) -> Self {
        Self { client }
    }

    /// Execute the login command.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange or identity resolution fails, or
    /// if the service denies the code.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &LoginArgs,
    ) -> Result<(), CliError> {
        let Some(code) = args.code.as_deref() else {
            return self.start_flow(writer);
        };

        let exchange = self.client.exchange_code(code).await?;
        let access_token = match exchange {
            TokenExchange::Granted { access_token } => access_token,
            TokenExchange::Denied => {
                return Err(CliError::Command(
                    "access denied by the authorization service".into(),
                ));
            }
        };

        let ctx = self
            .client
            .auth_context(&access_token, &args.org, &args.app)
            .await?;
        render_identity(writer, format, self.client.base_url(), &ctx)
    }

    fn start_flow<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let code = generate_auth_code();
        writeln!(writer, "Visit this URL in your browser to authorize the CLI:")?;
        writeln!(writer)?;
        writeln!(writer, "  {}", self.client.auth_url(&code))?;
        writeln!(writer)?;
        writeln!(writer, "Then complete the login with: spice login {code}")?;
        Ok(())
    }
}

fn render_identity<W: Write>(
    writer: &mut W,
    format: &OutputFormat,
    base_url: &str,
    ctx: &AuthContext,
) -> Result<(), CliError> {
    if format.is_json() {
        serde_json::to_writer_pretty(&mut *writer, ctx)
            .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(writer, "✓ Logged in to {base_url}")?;
    if let Some(email) = &ctx.email {
        writeln!(writer, "  Email:    {email}")?;
    }
    if let Some(username) = &ctx.username {
        writeln!(writer, "  Username: {username}")?;
    }
    if let Some(org) = &ctx.org {
        writeln!(writer, "  Org:      {} (id {})", org.name, org.id)?;
    }
    if let Some(app) = &ctx.app {
        writeln!(writer, "  App:      {} (id {})", app.name, app.id)?;
        if !app.api_key.is_empty() {
            writeln!(writer, "  Api key:  {}", app.api_key)?;
        }
    }
    Ok(())
}

/// Generate a short one-time authorization code, `XXXX-XXXX`.
fn generate_auth_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    let mut rng = rand::thread_rng();
    let mut code: String = (0..8)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    code.insert(4, '-');
    code
}
