//! JSON reply shared by every webhook adapter.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use super::parser::WebhookOutcome;

/// Message returned for accepted pushes.
pub const OK_MESSAGE: &str = "ok";

/// Body of every webhook reply: `{"message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponseBody {
    pub message: String,
}

impl WebhookResponseBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn ok() -> Self {
        Self::new(OK_MESSAGE)
    }
}

/// Status and body an adapter should write back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookReply {
    pub status: StatusCode,
    pub body: WebhookResponseBody,
}

impl WebhookReply {
    /// Serializes the body as a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::json!({ "message": self.body.message }).to_string()
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl From<WebhookOutcome> for WebhookReply {
    fn from(outcome: WebhookOutcome) -> Self {
        match outcome {
            Ok(()) => Self {
                status: StatusCode::OK,
                body: WebhookResponseBody::ok(),
            },
            Err(rejection) => Self {
                status: rejection.status(),
                body: WebhookResponseBody::new(rejection.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webhook::parser::WebhookRejection;

    #[test]
    fn test_ok_reply() {
        let reply = WebhookReply::from(Ok(()));
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.to_json(), r#"{"message":"ok"}"#);
        assert!(reply.is_success());
    }

    #[test]
    fn test_rejection_reply() {
        let reply = WebhookReply::from(Err(WebhookRejection::InvalidJson));
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.body.message, "Invalid JSON body");

        let reply = WebhookReply::from(Err(WebhookRejection::Handler("db down".into())));
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.to_json(), r#"{"message":"Handler error: db down"}"#);
    }
}
