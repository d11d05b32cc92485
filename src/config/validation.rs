//! Range and format checks for loaded settings.

use crate::config::error::ConfigError;
use crate::config::settings::{
    ClientSettings, FileSettings, LoggerSettings, ServerConfig, Settings, WebhookSettings,
};

/// Valid log levels
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
pub const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation("server.host", "host must not be empty"));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "port must be between 1 and 65535",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "request timeout must be greater than 0 seconds",
            ));
        }

        Ok(())
    }
}

impl ClientSettings {
    /// - Base URL, when set, must be an http(s) URL
    /// - Timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.base_url
            && !(url.starts_with("https://") || url.starts_with("http://"))
        {
            return Err(ConfigError::validation(
                "client.base_url",
                format!("'{url}' is not an http(s) URL"),
            ));
        }

        if self.timeout == 0 {
            return Err(ConfigError::validation(
                "client.timeout",
                "timeout must be greater than 0 seconds",
            ));
        }

        Ok(())
    }
}

impl WebhookSettings {
    /// - Path must start with `/`
    /// - At least one article must be retained
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.path.starts_with('/') {
            return Err(ConfigError::validation(
                "webhook.path",
                format!("'{}' must start with '/'", self.path),
            ));
        }

        if self.max_articles == 0 {
            return Err(ConfigError::validation(
                "webhook.max_articles",
                "max_articles must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "path is required when file logging is enabled",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "invalid log format '{}', valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "invalid log level '{}', valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "at least one output (console or file) must be enabled",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validates every section, returning the first error found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.client.validate()?;
        self.webhook.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::ConsoleSettings;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_server_validation() {
        let mut server = ServerConfig::default();
        server.port = 0;
        assert_eq!(server.validate().unwrap_err().field(), Some("server.port"));

        let mut server = ServerConfig::default();
        server.request_timeout = 0;
        assert_eq!(
            server.validate().unwrap_err().field(),
            Some("server.request_timeout")
        );

        let mut server = ServerConfig::default();
        server.host = " ".to_string();
        assert_eq!(server.validate().unwrap_err().field(), Some("server.host"));
    }

    #[test]
    fn test_client_validation() {
        let mut client = ClientSettings::default();
        client.base_url = Some("ftp://example.com".to_string());
        assert_eq!(client.validate().unwrap_err().field(), Some("client.base_url"));

        client.base_url = Some("http://localhost:8080".to_string());
        assert!(client.validate().is_ok());

        client.timeout = 0;
        assert_eq!(client.validate().unwrap_err().field(), Some("client.timeout"));
    }

    #[test]
    fn test_webhook_validation() {
        let mut webhook = WebhookSettings::default();
        webhook.path = "webhook".to_string();
        assert_eq!(webhook.validate().unwrap_err().field(), Some("webhook.path"));

        let mut webhook = WebhookSettings::default();
        webhook.max_articles = 0;
        assert_eq!(
            webhook.validate().unwrap_err().field(),
            Some("webhook.max_articles")
        );
    }

    #[test]
    fn test_logger_validation() {
        let mut logger = LoggerSettings::default();
        logger.level = "verbose".to_string();
        assert_eq!(logger.validate().unwrap_err().field(), Some("logger.level"));

        let mut logger = LoggerSettings::default();
        logger.level = "DEBUG".to_string();
        assert!(logger.validate().is_ok());

        let mut logger = LoggerSettings::default();
        logger.file.format = "yaml".to_string();
        assert_eq!(
            logger.validate().unwrap_err().field(),
            Some("logger.file.format")
        );

        let mut logger = LoggerSettings::default();
        logger.file.enabled = true;
        logger.file.path = String::new();
        assert_eq!(logger.validate().unwrap_err().field(), Some("logger.file.path"));

        let mut logger = LoggerSettings::default();
        logger.console = ConsoleSettings {
            enabled: false,
            colored: false,
        };
        assert_eq!(logger.validate().unwrap_err().field(), Some("logger"));
    }
}
