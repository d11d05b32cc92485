//! MPusher REST API client.
//!
//! Wraps the four public endpoints behind one private request helper that adds
//! Bearer authentication, serializes JSON bodies and maps non-success responses
//! to [`MPusherError`].

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::error::MPusherError;
use super::http::build_http_client;
use crate::models::{
    CallbackConfig, CallbackConfigResponse, SubscribeByArticleResponse, SubscriptionListParams,
    SubscriptionListResponse,
};

/// Default API base address.
pub const DEFAULT_BASE_URL: &str = "https://mpusher.bugcode.dev";

/// Path prefix of every public endpoint.
pub const API_PREFIX: &str = "/public-api";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "MPUSHER_TOKEN";

/// Environment variable overriding the base address.
pub const BASE_URL_ENV: &str = "MPUSHER_BASE_URL";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client construction options.
///
/// Unset fields fall back to `MPUSHER_TOKEN` / `MPUSHER_BASE_URL` and then to
/// the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct MPusherConfig {
    pub token: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl MPusherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Async client for the MPusher public API.
///
/// Cloning is cheap; clones share the underlying connection pool.
///
/// # Example
/// ```no_run
/// use mpusher::{MPusherClient, MPusherConfig};
///
/// # async fn run() -> Result<(), mpusher::MPusherError> {
/// let client = MPusherClient::new(MPusherConfig::new().token("your-api-token"))?;
/// let page = client.get_subscriptions(None).await?;
/// for sub in page.items {
///     println!("{} ({})", sub.mp_name, sub.mp_id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MPusherClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl MPusherClient {
    /// Creates a client from explicit options, falling back to the environment.
    ///
    /// # Errors
    /// [`MPusherError::MissingToken`] when no token is available, and
    /// [`MPusherError::Configuration`] when the base URL is not an absolute
    /// http(s) URL or the HTTP client cannot be built.
    pub fn new(config: MPusherConfig) -> Result<Self, MPusherError> {
        let token = config
            .token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| read_env(TOKEN_ENV))
            .ok_or(MPusherError::MissingToken)?;

        let base_url = config
            .base_url
            .filter(|u| !u.trim().is_empty())
            .or_else(|| read_env(BASE_URL_ENV))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();

        let parsed = Url::parse(&base_url).map_err(|e| {
            MPusherError::configuration(format!("invalid base URL '{}': {}", base_url, e))
        })?;
        if parsed.scheme() != "https" && parsed.scheme() != "http" {
            return Err(MPusherError::configuration(format!(
                "base URL '{}' must use http or https",
                base_url
            )));
        }

        let timeout = config
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let http = build_http_client(timeout).map_err(|e| {
            MPusherError::configuration(format!("failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            base_url,
            token,
            http,
        })
    }

    /// Creates a client configured entirely from `MPUSHER_TOKEN` and `MPUSHER_BASE_URL`.
    pub fn from_env() -> Result<Self, MPusherError> {
        Self::new(MPusherConfig::default())
    }

    /// Creates a client with the given token and the default base address.
    pub fn with_token(token: impl Into<String>) -> Result<Self, MPusherError> {
        Self::new(MPusherConfig::new().token(token))
    }

    /// Base address without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Same endpoint and connection pool, different token.
    ///
    /// Blank tokens leave the current one in place.
    pub fn with_token_override(&self, token: &str) -> Self {
        let token = token.trim();
        let mut client = self.clone();
        if !token.is_empty() {
            client.token = token.to_string();
        }
        client
    }

    /// Lists followed official accounts.
    ///
    /// # Errors
    /// [`MPusherError`] when the request fails.
    pub async fn get_subscriptions(
        &self,
        params: Option<&SubscriptionListParams>,
    ) -> Result<SubscriptionListResponse, MPusherError> {
        let query = params.map(|p| p.query_pairs()).unwrap_or_default();
        self.request::<_, ()>(Method::GET, "/subscriptions", &query, None)
            .await
    }

    /// Follows the official account that published `article_url`.
    ///
    /// # Errors
    /// [`MPusherError`] when the request fails (400: malformed URL,
    /// 404: article not found, 409: already subscribed).
    pub async fn subscribe_by_article_url(
        &self,
        article_url: &str,
    ) -> Result<SubscribeByArticleResponse, MPusherError> {
        let body = json!({ "articleUrl": article_url });
        self.request(Method::POST, "/subscriptions/by-article-url", &[], Some(&body))
            .await
    }

    /// Stops following an official account.
    ///
    /// # Errors
    /// [`MPusherError`] when the request fails (400: bad parameter,
    /// 404: not subscribed).
    pub async fn unsubscribe(&self, mp_id: i64) -> Result<(), MPusherError> {
        let body = json!({ "mpId": mp_id });
        // Any success body is accepted and discarded
        self.request::<Value, _>(Method::DELETE, "/subscriptions", &[], Some(&body))
            .await
            .map(|_| ())
    }

    /// Sets the URL (and optional token) MPusher pushes articles to.
    ///
    /// # Errors
    /// [`MPusherError`] when the request fails (400: malformed URL).
    pub async fn set_callback(
        &self,
        config: &CallbackConfig,
    ) -> Result<CallbackConfigResponse, MPusherError> {
        self.request(Method::PUT, "/config/callback", &[], Some(config))
            .await
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, MPusherError> {
        let raw = format!("{}{}{}", self.base_url, API_PREFIX, path);
        let mut url = Url::parse(&raw)
            .map_err(|e| MPusherError::configuration(format!("invalid URL '{}': {}", raw, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, MPusherError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path, query)?;
        tracing::debug!(method = %method, path = %path, "Sending MPusher request");

        let mut request = self
            .http
            .request(method.clone(), url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(body) = body
            && method != Method::GET
        {
            let payload = serde_json::to_vec(body).map_err(|e| {
                MPusherError::configuration(format!("failed to serialize request body: {}", e))
            })?;
            request = request.body(payload);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(method = %method, path = %path, error = %e, "MPusher request failed");
            MPusherError::network(e)
        })?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return decode_empty(status);
        }

        let bytes = response.bytes().await.map_err(MPusherError::network)?;
        let result = interpret_response(status, &bytes);

        match &result {
            Ok(_) => tracing::debug!(method = %method, path = %path, status = status.as_u16(), "MPusher request succeeded"),
            Err(e) => tracing::warn!(method = %method, path = %path, status = e.status(), error = %e, "MPusher API error"),
        }

        result
    }
}

/// Maps a received response body to the typed result.
fn interpret_response<T: DeserializeOwned>(
    status: StatusCode,
    bytes: &[u8],
) -> Result<T, MPusherError> {
    let data: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(_) if status.is_success() => return decode_empty(status),
        Err(_) => return Err(MPusherError::api(status, fallback_message(status), None)),
    };

    if !status.is_success() {
        let message = data
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| fallback_message(status));
        return Err(MPusherError::api(status, message, Some(data)));
    }

    serde_json::from_value(data.clone())
        .map_err(|e| MPusherError::decode(status, data.to_string(), e))
}

/// Decodes an empty success body, which only unit-like targets accept.
fn decode_empty<T: DeserializeOwned>(status: StatusCode) -> Result<T, MPusherError> {
    serde_json::from_value(Value::Null).map_err(|e| MPusherError::decode(status, "", e))
}

fn fallback_message(status: StatusCode) -> String {
    format!("request failed (HTTP {})", status.as_u16())
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
