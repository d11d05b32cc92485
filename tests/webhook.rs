//! Webhook parsing and the adapters, exercised through the public API.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, Bytes, to_bytes},
    http::{HeaderMap, HeaderValue, Method, Request, StatusCode, header},
};
use mpusher::webhook::adapters::{axum::webhook_router, json::handle_value, web::handle_request};
use mpusher::{ArticleHandler, ArticlePushPayload, WebhookEndpoint, WebhookRejection, parse_webhook};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tower::ServiceExt;

/// Collects articles; fails for the title "fail".
#[derive(Clone, Default)]
struct Collector {
    articles: Arc<Mutex<Vec<ArticlePushPayload>>>,
}

#[async_trait]
impl ArticleHandler for Collector {
    async fn on_article(&self, article: ArticlePushPayload) -> anyhow::Result<()> {
        if article.title == "fail" {
            return Err(anyhow::anyhow!("storage offline"));
        }
        self.articles.lock().await.push(article);
        Ok(())
    }
}

fn push(article_id: &str, title: &str) -> Value {
    json!({
        "articleId": article_id,
        "mpId": 3001,
        "mpName": "Rust Weekly",
        "title": title,
        "url": "https://mp.weixin.qq.com/s/abc",
        "publishedAt": 1_700_000_000
    })
}

#[tokio::test]
async fn parse_accepts_text_bytes_and_values() {
    let collector = Collector::default();
    let text = push("a1", "First").to_string();

    parse_webhook(&collector, text.as_str()).await.unwrap();
    parse_webhook(&collector, Bytes::from(push("a2", "Second").to_string()))
        .await
        .unwrap();
    parse_webhook(&collector, push("a3", "Third")).await.unwrap();

    let articles = collector.articles.lock().await;
    let ids: Vec<_> = articles.iter().map(|a| a.article_id.as_str()).collect();
    assert_eq!(ids, ["a1", "a2", "a3"]);
    assert_eq!(articles[0].mp_name, "Rust Weekly");
    assert_eq!(articles[0].mp_id, 3001);
}

#[tokio::test]
async fn parse_classifies_failures() {
    let collector = Collector::default();

    let err = parse_webhook(&collector, "{not json").await.unwrap_err();
    assert!(matches!(err, WebhookRejection::InvalidJson));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = parse_webhook(&collector, json!({ "title": "no id" })).await.unwrap_err();
    assert!(matches!(err, WebhookRejection::InvalidPayload { .. }));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = parse_webhook(&collector, push("a1", "fail")).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.to_string(), "Handler error: storage offline");

    assert!(collector.articles.lock().await.is_empty());
}

async fn via_axum(endpoint: &WebhookEndpoint, headers: &HeaderMap, body: &str) -> (StatusCode, Value) {
    let app: Router = webhook_router("/webhook", endpoint.clone());
    let mut request = Request::builder()
        .method(Method::POST)
        .uri("/webhook")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    request.headers_mut().extend(headers.clone());

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn via_web(endpoint: &WebhookEndpoint, headers: &HeaderMap, body: &str) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method(Method::POST)
        .uri("https://example.com/webhook")
        .body(Bytes::from(body.to_string()))
        .unwrap();
    request.headers_mut().extend(headers.clone());

    let response = handle_request(endpoint, request).await;
    (response.status(), serde_json::from_str(response.body()).unwrap())
}

#[tokio::test]
async fn adapters_agree_on_outcomes() {
    let collector = Collector::default();
    let endpoint = WebhookEndpoint::new(collector.clone());
    let headers = HeaderMap::new();

    let cases = [
        (push("a1", "ok").to_string(), StatusCode::OK, "ok"),
        ("{broken".to_string(), StatusCode::BAD_REQUEST, "Invalid JSON body"),
        (
            push("a2", "fail").to_string(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "Handler error: storage offline",
        ),
    ];

    for (body, status, message) in &cases {
        let expected = (*status, json!({ "message": message }));
        assert_eq!(via_axum(&endpoint, &headers, body).await, expected, "axum: {body}");
        assert_eq!(via_web(&endpoint, &headers, body).await, expected, "web: {body}");

        if let Ok(value) = serde_json::from_str::<Value>(body) {
            let (json_status, json_body) = handle_value(&endpoint, &headers, value).await;
            assert_eq!(json_status, *status, "json: {body}");
            assert_eq!(json_body.message, *message);
        }
    }

    let (status, body) = via_axum(&endpoint, &headers, r#"{"title":"x"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid payload"));

    // One accepted push per adapter
    assert_eq!(collector.articles.lock().await.len(), 3);
}

#[tokio::test]
async fn bearer_token_is_enforced_by_every_adapter() {
    let collector = Collector::default();
    let endpoint = WebhookEndpoint::new(collector.clone()).with_auth_token("hook-secret");
    let body = push("a1", "secured").to_string();

    let mut wrong = HeaderMap::new();
    wrong.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer nope"));
    let mut right = HeaderMap::new();
    right.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer hook-secret"));

    for headers in [HeaderMap::new(), wrong] {
        assert_eq!(via_axum(&endpoint, &headers, &body).await.0, StatusCode::UNAUTHORIZED);
        assert_eq!(via_web(&endpoint, &headers, &body).await.0, StatusCode::UNAUTHORIZED);
    }
    assert!(collector.articles.lock().await.is_empty());

    assert_eq!(via_axum(&endpoint, &right, &body).await.0, StatusCode::OK);
    assert_eq!(via_web(&endpoint, &right, &body).await.0, StatusCode::OK);
    assert_eq!(collector.articles.lock().await.len(), 2);
}

#[tokio::test]
async fn web_adapter_rejects_other_methods() {
    let endpoint = WebhookEndpoint::new(Collector::default());
    let request = Request::builder()
        .method(Method::GET)
        .uri("https://example.com/webhook")
        .body(Bytes::new())
        .unwrap();

    let response = handle_request(&endpoint, request).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[header::ALLOW], "POST");
}
