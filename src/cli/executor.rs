//! Dispatches parsed commands to their handlers.

use super::handlers::{CallbackCommandHandler, ServeCommandHandler, SubscriptionCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::logger::LogLevelHandle;

/// Runs the command selected by `cli`; no subcommand means `serve`.
///
/// # Errors
/// Returns errors from command handlers; client commands fail on any
/// MPusher API error.
pub async fn execute_command(
    cli: &Cli,
    settings: Settings,
    log_level: Option<LogLevelHandle>,
) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings)
                .execute(*dry_run, log_level)
                .await
        }
        None => ServeCommandHandler::new(settings).execute(false, log_level).await,
        Some(Commands::Subscriptions { action }) => {
            SubscriptionCommandHandler::new(&settings)?
                .execute(action, &mut stdout)
                .await
        }
        Some(Commands::Callback { action }) => {
            CallbackCommandHandler::new(&settings)?
                .execute(action, &mut stdout)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MPusherError, TOKEN_ENV};
    use clap::Parser;

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["mpusher", "serve", "--dry-run"]).unwrap();
        let mut settings = Settings::default();
        settings.client.token = "t".to_string();
        assert!(execute_command(&cli, settings, None).await.is_ok());
    }

    #[tokio::test]
    async fn test_client_command_without_token() {
        if std::env::var_os(TOKEN_ENV).is_some() {
            return;
        }
        let cli = Cli::try_parse_from(["mpusher", "subscriptions", "list"]).unwrap();
        let err = execute_command(&cli, Settings::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MPusherError>(),
            Some(MPusherError::MissingToken)
        ));
    }
}
