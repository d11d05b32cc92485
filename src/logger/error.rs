//! Error types for the logger

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("invalid log level or filter '{filter}': {message}")]
    Filter { filter: String, message: String },

    #[error("failed to install logger: {message}")]
    Init { message: String },
}

impl LoggerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn filter(filter: impl Into<String>, message: impl ToString) -> Self {
        Self::Filter {
            filter: filter.into(),
            message: message.to_string(),
        }
    }
}
