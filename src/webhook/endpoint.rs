use std::sync::Arc;

use axum::http::HeaderMap;

use super::auth::verify_bearer;
use super::handler::ArticleHandler;
use super::parser::{WebhookBody, WebhookOutcome, WebhookRejection, parse_webhook};
use super::response::WebhookReply;

/// A configured webhook receiver shared by all adapters.
///
/// Cheap to clone; the handler is reference counted.
#[derive(Clone)]
pub struct WebhookEndpoint {
    handler: Arc<dyn ArticleHandler>,
    auth_token: Option<Arc<str>>,
}

impl WebhookEndpoint {
    pub fn new<H>(handler: H) -> Self
    where
        H: ArticleHandler + 'static,
    {
        Self::from_arc(Arc::new(handler))
    }

    pub fn from_arc(handler: Arc<dyn ArticleHandler>) -> Self {
        Self {
            handler,
            auth_token: None,
        }
    }

    /// Requires `Authorization: Bearer <token>` on every request.
    ///
    /// An empty token disables the check.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.auth_token = (!token.is_empty()).then(|| Arc::from(token));
        self
    }

    pub fn requires_auth(&self) -> bool {
        self.auth_token.is_some()
    }

    /// Runs the bearer check, validation and the handler.
    pub async fn process(&self, headers: &HeaderMap, body: impl Into<WebhookBody>) -> WebhookOutcome {
        verify_bearer(headers, self.auth_token.as_deref())?;
        parse_webhook(self.handler.as_ref(), body).await
    }

    /// Like [`process`](Self::process) but returns the reply to send, logging
    /// the outcome.
    pub async fn respond(&self, headers: &HeaderMap, body: impl Into<WebhookBody>) -> WebhookReply {
        let outcome = self.process(headers, body).await;
        log_outcome(&outcome);
        WebhookReply::from(outcome)
    }

    /// Reply for a body the host failed to parse as JSON.
    ///
    /// The bearer check still runs first, so unauthenticated callers get 401.
    pub fn respond_invalid_json(&self, headers: &HeaderMap) -> WebhookReply {
        let outcome = verify_bearer(headers, self.auth_token.as_deref())
            .and(Err(WebhookRejection::InvalidJson));
        log_outcome(&outcome);
        WebhookReply::from(outcome)
    }
}

impl std::fmt::Debug for WebhookEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookEndpoint")
            .field("requires_auth", &self.requires_auth())
            .finish_non_exhaustive()
    }
}

fn log_outcome(outcome: &WebhookOutcome) {
    match outcome {
        Ok(()) => tracing::debug!("Webhook push accepted"),
        Err(rejection @ WebhookRejection::Handler(_)) => {
            tracing::error!(error = %rejection, "Webhook handler failed")
        }
        Err(rejection) => {
            tracing::warn!(status = rejection.status().as_u16(), error = %rejection, "Webhook push rejected")
        }
    }
}
