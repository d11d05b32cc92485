use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use thiserror::Error;
use validator::ValidationErrors;

use crate::client::MPusherError;
use crate::config::ConfigError;
use crate::logger::LoggerError;

/// Errors surfaced by the demo service.
#[derive(Error, Debug)]
pub enum AppError {
    /// A request field failed validation
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// No API token was configured or supplied with the request
    #[error("MPUSHER_TOKEN is not configured")]
    ClientUnavailable,

    /// The MPusher API call failed
    #[error(transparent)]
    Upstream(#[from] MPusherError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logger(#[from] LoggerError),

    /// A feature the running process was started without
    #[error("{message}")]
    Unavailable { message: String },

    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// HTTP status the error is reported with.
    ///
    /// Upstream errors keep a remote 4xx/5xx status. Anything else, such as a
    /// transport failure (status 0) or an undecodable 2xx body, becomes 502.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Logger(LoggerError::Filter { .. }) => StatusCode::BAD_REQUEST,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream(err) => match StatusCode::from_u16(err.status()) {
                Ok(status) if status.is_client_error() || status.is_server_error() => status,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::ClientUnavailable | Self::Config(_) | Self::Logger(_) | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ValidationErrors> for AppError {
    /// Reports the first failing field, ordered by name.
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.first() {
            Some((field, errs)) => AppError::Validation {
                field: field.to_string(),
                reason: errs
                    .first()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .unwrap_or_else(|| "invalid value".to_string()),
            },
            None => AppError::bad_request(errors.to_string()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

/// Result alias for handlers and services.
pub type AppResult<T> = Result<T, AppError>;
