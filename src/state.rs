//! Shared state for the demo service handlers.

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::client::{MPusherClient, MPusherError};
use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::logger::LogLevelHandle;
use crate::repositories::ArticleRepository;
use crate::webhook::WebhookEndpoint;

/// Header that supplies a per-request API token.
pub const TOKEN_HEADER: &str = "x-mpusher-token";

/// Cloning is cheap; every field is reference counted.
#[derive(Clone, Debug)]
pub struct AppState {
    pub settings: Arc<Settings>,
    /// `None` when no token is configured
    pub client: Option<MPusherClient>,
    pub articles: ArticleRepository,
    pub log_level: Option<LogLevelHandle>,
}

impl AppState {
    /// Builds state from settings.
    ///
    /// A missing token is not an error: the service still receives webhooks
    /// and API routes accept a token per request.
    ///
    /// # Errors
    /// Client construction failures other than a missing token.
    pub fn new(settings: Settings) -> AppResult<Self> {
        let client = match MPusherClient::new(settings.client.to_client_config()) {
            Ok(client) => Some(client),
            Err(MPusherError::MissingToken) => {
                tracing::warn!("No MPusher token configured; API routes need the {TOKEN_HEADER} header");
                None
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            articles: ArticleRepository::new(settings.webhook.max_articles),
            settings: Arc::new(settings),
            client,
            log_level: None,
        })
    }

    pub fn with_log_level(mut self, handle: LogLevelHandle) -> Self {
        self.log_level = Some(handle);
        self
    }

    /// Client for this request, honoring the token header.
    ///
    /// # Errors
    /// [`AppError::ClientUnavailable`] when neither the configuration nor the
    /// request supplies a token.
    pub fn client_for(&self, headers: &HeaderMap) -> AppResult<MPusherClient> {
        let header_token = headers
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|t| !t.is_empty());

        match (&self.client, header_token) {
            (Some(client), Some(token)) => Ok(client.with_token_override(token)),
            (Some(client), None) => Ok(client.clone()),
            (None, Some(token)) => {
                let config = self.settings.client.to_client_config().token(token);
                Ok(MPusherClient::new(config)?)
            }
            (None, None) => Err(AppError::ClientUnavailable),
        }
    }

    /// Webhook endpoint recording every accepted article.
    pub fn webhook_endpoint(&self) -> WebhookEndpoint {
        let endpoint = WebhookEndpoint::new(self.articles.clone());
        match &self.settings.webhook.auth_token {
            Some(token) => endpoint.with_auth_token(token.clone()),
            None => endpoint,
        }
    }
}
