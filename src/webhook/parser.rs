//! Framework-independent webhook validation.
//!
//! [`parse_webhook`] is the core every adapter builds on. It can also be used
//! directly to write an adapter for a host that is not covered here.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::body::Bytes;
use axum::http::StatusCode;
use futures::FutureExt;
use serde_json::Value;
use thiserror::Error;

use super::handler::ArticleHandler;
use crate::models::ArticlePushPayload;

/// Inbound request body, either raw or already parsed by the host.
#[derive(Debug, Clone)]
pub enum WebhookBody {
    /// Unparsed request bytes
    Raw(Bytes),
    /// JSON parsed by the host framework
    Json(Value),
}

impl From<Bytes> for WebhookBody {
    fn from(bytes: Bytes) -> Self {
        Self::Raw(bytes)
    }
}

impl From<Vec<u8>> for WebhookBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Raw(Bytes::from(bytes))
    }
}

impl From<String> for WebhookBody {
    fn from(text: String) -> Self {
        Self::Raw(Bytes::from(text))
    }
}

impl From<&str> for WebhookBody {
    fn from(text: &str) -> Self {
        Self::Raw(Bytes::copy_from_slice(text.as_bytes()))
    }
}

impl From<Value> for WebhookBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<ArticlePushPayload> for WebhookBody {
    fn from(payload: ArticlePushPayload) -> Self {
        Self::Json(serde_json::to_value(payload).unwrap_or(Value::Null))
    }
}

/// Why a webhook request was not accepted.
///
/// [`parse_webhook`] only produces `InvalidJson`, `InvalidPayload` and
/// `Handler`; the remaining variants come from adapter-level guards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookRejection {
    #[error("Invalid JSON body")]
    InvalidJson,

    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },

    #[error("Handler error: {0}")]
    Handler(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Unauthorized")]
    Unauthorized,
}

impl WebhookRejection {
    pub(crate) fn missing_article_id() -> Self {
        Self::InvalidPayload {
            reason: "missing articleId".to_string(),
        }
    }

    /// HTTP status the rejection maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson | Self::InvalidPayload { .. } => StatusCode::BAD_REQUEST,
            Self::Handler(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Result of processing one webhook request.
pub type WebhookOutcome = Result<(), WebhookRejection>;

/// Validates an inbound push and hands it to `handler`.
///
/// - raw body that is not JSON: [`WebhookRejection::InvalidJson`] (400)
/// - no usable `articleId` (absent, empty, zero or `null`), or a field whose
///   value cannot be read: [`WebhookRejection::InvalidPayload`] (400)
/// - handler returned an error or panicked: [`WebhookRejection::Handler`] (500)
///
/// The handler runs at most once and only for payloads that passed validation.
pub async fn parse_webhook<H>(handler: &H, body: impl Into<WebhookBody>) -> WebhookOutcome
where
    H: ArticleHandler + ?Sized,
{
    let payload = decode_payload(body.into())?;

    match AssertUnwindSafe(handler.on_article(payload))
        .catch_unwind()
        .await
    {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(WebhookRejection::Handler(err.to_string())),
        Err(panic) => Err(WebhookRejection::Handler(panic_message(panic.as_ref()))),
    }
}

/// Parses and validates the body without invoking any handler.
pub fn decode_payload(body: WebhookBody) -> Result<ArticlePushPayload, WebhookRejection> {
    let value = match body {
        WebhookBody::Raw(bytes) => {
            serde_json::from_slice::<Value>(&bytes).map_err(|_| WebhookRejection::InvalidJson)?
        }
        WebhookBody::Json(value) => value,
    };

    match value.get("articleId") {
        Some(Value::String(id)) if !id.is_empty() => {}
        Some(Value::Number(id)) if id.as_f64() != Some(0.0) => {}
        None | Some(Value::Null | Value::String(_) | Value::Number(_) | Value::Bool(false)) => {
            return Err(WebhookRejection::missing_article_id());
        }
        Some(_) => {
            return Err(WebhookRejection::InvalidPayload {
                reason: "articleId must be a string or number".to_string(),
            });
        }
    }

    serde_json::from_value(value).map_err(|e| WebhookRejection::InvalidPayload {
        reason: e.to_string(),
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "handler panicked".to_string()
    }
}
