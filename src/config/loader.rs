//! Layered configuration loading.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for the configuration directory
pub const CONFIG_DIR_ENV: &str = "MPUSHER_CONFIG_DIR";

/// Environment variable for a single configuration file
pub const CONFIG_FILE_ENV: &str = "MPUSHER_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix for configuration overrides, e.g. `MPUSHER_SERVER__PORT`
const ENV_PREFIX: &str = "MPUSHER";

/// Separator for nested keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Loads [`Settings`] from files and the environment.
///
/// Sources, lowest priority first:
/// 1. `default.toml`
/// 2. `{environment}.toml`
/// 3. `local.toml`
/// 4. `MPUSHER_*` environment variables
///
/// Every file is optional; with none present the built-in defaults apply.
/// When a single file is configured it replaces the three file layers.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Creates a loader from `MPUSHER_CONFIG_DIR`, `MPUSHER_CONFIG_FILE` and
    /// `MPUSHER_APP_ENV`.
    ///
    /// # Errors
    /// [`ConfigError::MutuallyExclusive`] when both `MPUSHER_CONFIG_DIR` and
    /// `MPUSHER_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok();

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::MutuallyExclusive(format!(
                "{CONFIG_DIR_ENV} and {CONFIG_FILE_ENV} cannot both be set; use \
                 {CONFIG_DIR_ENV} for layered configuration or {CONFIG_FILE_ENV} \
                 for a single file"
            )));
        }

        Ok(Self {
            config_dir: config_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file: config_file.map(PathBuf::from),
            environment: AppEnvironment::from_env(),
        })
    }

    /// Loads a single file instead of the layered directory.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Builds and validates the settings.
    ///
    /// # Errors
    /// - a configured single file does not exist
    /// - a file or variable cannot be parsed
    /// - the merged settings fail validation
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings: Settings = self
            .build_config()?
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        settings.validate()?;

        tracing::debug!(
            environment = %self.environment,
            config_dir = %self.config_dir.display(),
            config_file = ?self.config_file,
            "Configuration loaded"
        );

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = match &self.config_file {
            Some(file) => {
                if !file.is_file() {
                    return Err(ConfigError::FileNotFound(file.display().to_string()));
                }
                add_file_source(Config::builder(), file, true)
            }
            None => self.add_layered_sources(Config::builder()),
        };

        Ok(add_env_source(builder).build()?)
    }

    fn add_layered_sources(&self, builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        let layers = [
            "default.toml".to_string(),
            self.environment.file_name(),
            "local.toml".to_string(),
        ];

        layers.iter().fold(builder, |builder, name| {
            add_file_source(builder, &self.config_dir.join(name), false)
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: AppEnvironment::default(),
        }
    }
}

fn add_file_source(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(File::from(path).format(FileFormat::Toml).required(required))
}

/// `MPUSHER_SERVER__PORT` maps to `server.port`.
fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator(ENV_SEPARATOR)
            .ignore_empty(true)
            .try_parsing(true),
    )
}
