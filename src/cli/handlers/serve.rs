//! Serve command handler.

use std::io::Write;

use crate::client::{MPusherClient, MPusherError};
use crate::config::Settings;
use crate::logger::LogLevelHandle;
use crate::server::Server;
use crate::state::TOKEN_HEADER;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Starts the server, or only reports the configuration when `dry_run`.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(
        self,
        dry_run: bool,
        log_level: Option<LogLevelHandle>,
    ) -> anyhow::Result<()> {
        if dry_run {
            return self.validate_only(&mut std::io::stdout());
        }

        let mut server = Server::new(self.config);
        if let Some(handle) = log_level {
            server = server.with_log_level(handle);
        }
        server.run().await
    }

    /// Validates configuration and prints a summary without starting the server.
    pub fn validate_only<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        self.config.validate()?;

        let webhook = &self.config.webhook;
        writeln!(out, "✓ Configuration is valid")?;
        writeln!(out, "✓ Server would bind to: {}", self.config.server.address())?;
        writeln!(
            out,
            "✓ Webhook path: {} ({})",
            webhook.path,
            if webhook.auth_token.is_some() {
                "bearer auth"
            } else {
                "no auth"
            }
        )?;
        match MPusherClient::new(self.config.client.to_client_config()) {
            Ok(client) => writeln!(out, "✓ MPusher API: {}", client.base_url())?,
            Err(MPusherError::MissingToken) => writeln!(
                out,
                "! MPusher token missing, API routes need the {} header",
                TOKEN_HEADER
            )?,
            Err(err) => return Err(err.into()),
        }
        writeln!(out, "Dry run completed successfully")?;
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
