//! Logging built on `tracing-subscriber`.
//!
//! - console output on stderr with color control
//! - optional file output in full, compact or JSON format
//! - log level adjustable at runtime through [`LogLevelHandle`]

pub mod config;
pub mod error;

pub use config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
pub use error::LoggerError;

use std::fs::{self, File, OpenOptions};
use std::io::IsTerminal;
use std::sync::Mutex;

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::Layered, layer::SubscriberExt, reload,
    util::SubscriberInitExt,
};

type FilteredRegistry = Layered<reload::Layer<EnvFilter, Registry>, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Changes the active log filter after initialization.
#[derive(Clone)]
pub struct LogLevelHandle {
    inner: reload::Handle<EnvFilter, Registry>,
}

impl LogLevelHandle {
    /// Replaces the filter. Accepts a level (`debug`) or a full
    /// `EnvFilter` directive (`mpusher=debug,tower_http=info`).
    pub fn set_level(&self, directive: &str) -> Result<(), LoggerError> {
        let filter = EnvFilter::try_new(directive).map_err(|e| LoggerError::filter(directive, e))?;
        self.inner
            .reload(filter)
            .map_err(|e| LoggerError::filter(directive, e))?;
        tracing::info!(filter = directive, "Log filter updated");
        Ok(())
    }

    /// Current filter directive.
    pub fn current_level(&self) -> Option<String> {
        self.inner.with_current(|filter| filter.to_string()).ok()
    }
}

impl std::fmt::Debug for LogLevelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogLevelHandle")
            .field("current", &self.current_level())
            .finish()
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG`, when set, takes precedence over the configured level.
///
/// # Errors
/// Fails when the configuration is invalid, the log file cannot be opened,
/// or a global subscriber is already installed.
pub fn init_logger(config: &LoggerConfig) -> Result<LogLevelHandle, LoggerError> {
    config.validate()?;

    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directive) if !directive.trim().is_empty() => {
            EnvFilter::try_new(&directive).map_err(|e| LoggerError::filter(directive, e))?
        }
        _ => EnvFilter::try_new(config.level.trim())
            .map_err(|e| LoggerError::filter(&config.level, e))?,
    };
    let (filter_layer, handle) = reload::Layer::new(filter);

    // File layer goes first so ANSI settings of the console layer do not leak
    // into span fields written to the file.
    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.file.enabled {
        layers.push(file_layer(&config.file)?);
    }
    if config.console.enabled {
        layers.push(console_layer(&config.console));
    }

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(layers)
        .try_init()
        .map_err(|e| LoggerError::Init {
            message: e.to_string(),
        })?;

    Ok(LogLevelHandle { inner: handle })
}

/// Console output goes to stderr; stdout carries command results.
fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let use_ansi = config.colored && std::io::stderr().is_terminal();
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer(config: &FileConfig) -> Result<BoxedLayer, LoggerError> {
    let writer = Mutex::new(open_log_file(config)?);
    let layer = fmt::layer().with_ansi(false).with_target(true);

    Ok(match config.format {
        LogFormat::Full => layer.with_writer(writer).boxed(),
        LogFormat::Compact => layer.compact().with_writer(writer).boxed(),
        LogFormat::Json => layer.json().with_writer(writer).boxed(),
    })
}

fn open_log_file(config: &FileConfig) -> Result<File, LoggerError> {
    if let Some(parent) = config.path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if config.append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    Ok(options.open(&config.path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_level_handle_reloads_filter() {
        let (layer, handle) = reload::Layer::new(EnvFilter::new("info"));
        let subscriber = tracing_subscriber::registry().with(layer);
        let _default = tracing::subscriber::set_default(subscriber);

        let handle = LogLevelHandle { inner: handle };
        assert_eq!(handle.current_level().as_deref(), Some("info"));

        handle.set_level("debug").unwrap();
        assert_eq!(handle.current_level().as_deref(), Some("debug"));

        assert!(handle.set_level("mpusher=notalevel").is_err());
        assert_eq!(handle.current_level().as_deref(), Some("debug"));
    }

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let config = FileConfig {
            enabled: true,
            path: dir.path().join("nested/dir/mpusher.log"),
            ..Default::default()
        };

        open_log_file(&config).unwrap();
        assert!(config.path.exists());
    }

    #[test]
    fn test_open_log_file_truncates_without_append() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mpusher.log");
        fs::write(&path, "old contents").unwrap();

        let config = FileConfig {
            enabled: true,
            path: path.clone(),
            append: false,
            ..Default::default()
        };
        open_log_file(&config).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
