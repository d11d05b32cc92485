//! Layered configuration.
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml`
//! 2. `{environment}.toml`, selected by `MPUSHER_APP_ENV`
//! 3. `local.toml`, for uncommitted overrides
//! 4. `MPUSHER_*` environment variables, `__` separating nested keys
//! 5. command-line flags (applied by the CLI)

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::{CONFIG_DIR_ENV, CONFIG_FILE_ENV, ConfigLoader};
pub use settings::{
    ApplicationConfig, ClientSettings, ConsoleSettings, FileSettings, LoggerSettings,
    ServerConfig, Settings, WebhookSettings,
};
