//! Error type returned by [`MPusherClient`](super::MPusherClient).

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Status reported for failures that never produced an HTTP response.
pub const NETWORK_ERROR_STATUS: u16 = 0;

/// Errors raised while talking to the MPusher API.
///
/// Every variant exposes an HTTP-like [`status`](MPusherError::status); failures
/// that happen before a response arrives report [`NETWORK_ERROR_STATUS`].
#[derive(Debug, Error)]
pub enum MPusherError {
    /// The service answered with a non-success status code
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        /// Parsed JSON error body, when the service sent one
        response: Option<Value>,
    },

    /// The request never completed (DNS, connect, TLS, timeout, body read)
    #[error("network request failed: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },

    /// A success response did not match the expected shape
    #[error("failed to decode response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Neither the caller nor `MPUSHER_TOKEN` supplied a token
    #[error("no token provided; pass one explicitly or set MPUSHER_TOKEN")]
    MissingToken,

    /// The client could not be constructed
    #[error("invalid client configuration: {message}")]
    Configuration { message: String },
}

impl MPusherError {
    pub(crate) fn api(status: StatusCode, message: impl Into<String>, response: Option<Value>) -> Self {
        Self::Api {
            status: status.as_u16(),
            message: message.into(),
            response,
        }
    }

    pub(crate) fn network(source: reqwest::Error) -> Self {
        Self::Network { source }
    }

    pub(crate) fn decode(status: StatusCode, body: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            status: status.as_u16(),
            body: body.into(),
            source,
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// HTTP status of the failure, `0` when no response was received.
    pub fn status(&self) -> u16 {
        match self {
            Self::Api { status, .. } | Self::Decode { status, .. } => *status,
            Self::Network { .. } | Self::MissingToken | Self::Configuration { .. } => {
                NETWORK_ERROR_STATUS
            }
        }
    }

    /// Parsed error body sent by the service, if any.
    pub fn response(&self) -> Option<&Value> {
        match self {
            Self::Api { response, .. } => response.as_ref(),
            _ => None,
        }
    }

    /// Whether the request failed before any response arrived.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
