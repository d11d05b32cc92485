//! Router configuration for the demo service.

use std::time::Duration;

use axum::{Router, http::StatusCode, middleware};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer};

use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;
use crate::webhook::adapters::axum::webhook_router;

/// Creates the application router.
///
/// # Routes
/// - `GET /health`
/// - `/api/subscriptions` - list, follow, unfollow
/// - `PUT /api/callback`
/// - `GET /api/articles` - articles received by the webhook
/// - `GET|PUT /api/log-level`
/// - `POST <webhook.path>` - MPusher article pushes
///
/// Layers added last run first: request ID, then logging, then timeout.
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.settings.server.request_timeout);
    let webhook = webhook_router(&state.settings.webhook.path, state.webhook_endpoint());

    let api_routes = Router::new()
        .nest("/subscriptions", handlers::subscriptions::subscription_routes())
        .nest("/callback", handlers::callback::callback_routes())
        .nest("/articles", handlers::articles::article_routes())
        .nest("/log-level", handlers::log_level::log_level_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(handlers::health::health_routes())
        .with_state(state)
        .merge(webhook)
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::middleware::REQUEST_ID_HEADER;
    use crate::config::Settings;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn state() -> AppState {
        let mut settings = Settings::default();
        settings.client.token = "test-token".to_string();
        settings.client.base_url = Some("http://127.0.0.1:9".to_string());
        AppState::new(settings).unwrap()
    }

    fn tokenless_state() -> AppState {
        let mut state = state();
        state.client = None;
        state
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, value)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = create_router(state()).oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));

        let (_, body) = send(create_router(tokenless_state()), get("/health")).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["client_configured"], false);
    }

    #[tokio::test]
    async fn test_missing_token_is_server_error() {
        let (status, body) = send(create_router(tokenless_state()), get("/api/subscriptions")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "MPUSHER_TOKEN is not configured" }));
    }

    #[tokio::test]
    async fn test_query_validation() {
        let (status, body) = send(
            create_router(state()),
            get("/api/subscriptions?pageSize=1000"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "pageSize must be between 1 and 100");
    }

    #[tokio::test]
    async fn test_body_validation() {
        let (status, body) = send(
            create_router(state()),
            json_request(Method::DELETE, "/api/subscriptions", json!({ "mpId": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "mp_id");

        let (status, _) = send(
            create_router(state()),
            json_request(Method::PUT, "/api/callback", json!({ "callbackUrl": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unreachable_remote_is_bad_gateway() {
        let (status, body) = send(
            create_router(state()),
            json_request(
                Method::POST,
                "/api/subscriptions",
                json!({ "articleUrl": "https://mp.weixin.qq.com/s/abc" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_remote_success_is_bad_gateway() {
        let remote = Router::new().route(
            "/public-api/subscriptions",
            axum::routing::get(|| async { axum::Json(json!({ "unexpected": true })) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, remote).await.unwrap() });

        let mut settings = Settings::default();
        settings.client.token = "test-token".to_string();
        settings.client.base_url = Some(format!("http://{addr}"));
        let app = create_router(AppState::new(settings).unwrap());

        let (status, body) = send(app, get("/api/subscriptions")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("HTTP 200"));
    }

    #[tokio::test]
    async fn test_webhook_records_articles() {
        let state = state();
        let app = create_router(state.clone());

        let (status, body) = send(
            app.clone(),
            json_request(
                Method::POST,
                "/webhook",
                json!({ "articleId": "a1", "title": "Hello", "mpName": "Rust Weekly" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "ok" }));

        let (status, body) = send(app, get("/api/articles")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["items"][0]["articleId"], "a1");
    }

    #[tokio::test]
    async fn test_webhook_custom_path_and_auth() {
        let mut settings = Settings::default();
        settings.client.token = "test-token".to_string();
        settings.webhook.path = "/hooks/mpusher".to_string();
        settings.webhook.auth_token = Some("hook-secret".to_string());
        let app = create_router(AppState::new(settings).unwrap());

        let payload = json!({ "articleId": "a1" });
        let (status, _) = send(
            app.clone(),
            json_request(Method::POST, "/hooks/mpusher", payload.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let mut request = json_request(Method::POST, "/hooks/mpusher", payload);
        request.headers_mut().insert(
            header::AUTHORIZATION,
            "Bearer hook-secret".parse().unwrap(),
        );
        let (status, _) = send(app.clone(), request).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(app, json_request(Method::POST, "/webhook", json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_log_level_without_handle() {
        let (status, body) = send(create_router(state()), get("/api/log-level")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "log level control is not enabled");
    }
}
