//! `callback set` handler.

use std::io::Write;

use super::print_json;
use crate::cli::parser::CallbackCommand;
use crate::client::{MPusherClient, MPusherError};
use crate::config::Settings;
use crate::models::CallbackConfig;

pub struct CallbackCommandHandler {
    client: MPusherClient,
}

impl CallbackCommandHandler {
    /// # Errors
    /// [`MPusherError::MissingToken`] when no token is configured.
    pub fn new(settings: &Settings) -> Result<Self, MPusherError> {
        Ok(Self::with_client(MPusherClient::new(
            settings.client.to_client_config(),
        )?))
    }

    pub fn with_client(client: MPusherClient) -> Self {
        Self { client }
    }

    pub async fn execute<W: Write>(&self, action: &CallbackCommand, out: &mut W) -> anyhow::Result<()> {
        match action {
            CallbackCommand::Set { url, auth_token } => {
                let mut config = CallbackConfig::new(url.as_str());
                if let Some(token) = auth_token.as_deref().filter(|t| !t.is_empty()) {
                    config = config.with_auth_token(token);
                }
                let response = self.client.set_callback(&config).await?;
                tracing::info!(callback_url = %config.callback_url, "Callback updated");
                print_json(out, &response)
            }
        }
    }
}
