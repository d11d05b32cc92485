//! Command-line interface definition.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use super::validation::{
    validate_config_file_path, validate_host_address, validate_http_url, validate_mp_id,
    validate_page, validate_page_size, validate_port,
};
use crate::build;

/// Manage MPusher subscriptions and receive article pushes
#[derive(Parser, Debug)]
#[command(name = "mpusher")]
#[command(about = "Manage MPusher subscriptions and receive article pushes")]
#[command(long_about = "
mpusher talks to the MPusher public API and hosts a webhook receiver for
article pushes from followed WeChat official accounts.

EXAMPLES:
    # Start the demo service (webhook + management API)
    mpusher serve --port 8080

    # List followed accounts
    mpusher --token $TOKEN subscriptions list --page-size 50

    # Follow the account that published an article
    mpusher subscriptions add https://mp.weixin.qq.com/s/xxxx

    # Stop following an account
    mpusher subscriptions remove 42

    # Point pushes at your webhook
    mpusher callback set https://example.com/webhook --auth-token s3cret

    # Check configuration without starting the server
    mpusher serve --dry-run
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Loads this single TOML file instead of the layered `config/` directory.
    #[arg(short, long, global = true, value_name = "FILE", value_parser = validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection (MPUSHER_APP_ENV)
    #[arg(short, long, global = true, value_enum)]
    pub env: Option<Environment>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// MPusher API token, overriding configuration and MPUSHER_TOKEN
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// MPusher API address, overriding configuration and MPUSHER_BASE_URL
    #[arg(long, global = true, value_name = "URL", value_parser = validate_http_url)]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the demo service (default)
    ///
    /// Serves the webhook receiver, the subscription management API and
    /// health checks.
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT", value_parser = validate_port)]
        port: Option<u16>,

        /// Log level override
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Manage followed official accounts
    Subscriptions {
        #[command(subcommand)]
        action: SubscriptionCommand,
    },
    /// Manage the push callback
    Callback {
        #[command(subcommand)]
        action: CallbackCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionCommand {
    /// List followed accounts
    List(ListArgs),
    /// Follow the account that published an article
    Add {
        /// Article URL, e.g. https://mp.weixin.qq.com/s/xxxx
        #[arg(value_name = "ARTICLE_URL", value_parser = validate_http_url)]
        url: String,
    },
    /// Stop following an account
    Remove {
        /// Official account ID
        #[arg(value_name = "MP_ID", value_parser = validate_mp_id)]
        mp_id: i64,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ListArgs {
    /// Page number, starting at 1
    #[arg(long, value_parser = validate_page)]
    pub page: Option<u32>,

    /// Items per page, 1 to 100
    #[arg(long, value_parser = validate_page_size)]
    pub page_size: Option<u32>,

    /// Filter by account name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CallbackCommand {
    /// Set the URL article pushes are delivered to
    Set {
        #[arg(value_name = "CALLBACK_URL", value_parser = validate_http_url)]
        url: String,

        /// Token MPusher sends as `Authorization: Bearer <token>`
        #[arg(long, value_name = "TOKEN")]
        auth_token: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Whether the default command (serve) runs.
    pub fn is_serve(&self) -> bool {
        matches!(self.command, None | Some(Commands::Serve { .. }))
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
