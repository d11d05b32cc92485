use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::post,
};

use crate::webhook::{WebhookEndpoint, WebhookReply};

impl IntoResponse for WebhookReply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Axum handler for `POST <webhook path>`.
///
/// Reads the raw body so malformed JSON is answered with
/// `{"message":"Invalid JSON body"}` instead of axum's own rejection.
pub async fn webhook_handler(
    State(endpoint): State<WebhookEndpoint>,
    headers: HeaderMap,
    body: Bytes,
) -> WebhookReply {
    endpoint.respond(&headers, body).await
}

/// Router serving the webhook at `path`, ready to be merged into an app.
///
/// # Example
/// ```ignore
/// let app = Router::new()
///     .merge(webhook_router("/webhook", endpoint))
///     .route("/health", get(health));
/// ```
pub fn webhook_router<S>(path: &str, endpoint: WebhookEndpoint) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(path, post(webhook_handler))
        .with_state(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webhook::handler_fn;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header::CONTENT_TYPE},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        webhook_router(
            "/webhook",
            WebhookEndpoint::new(handler_fn(|article| async move {
                if article.title == "fail" {
                    Err(anyhow::anyhow!("rejected title"))
                } else {
                    Ok(())
                }
            })),
        )
    }

    async fn post_body(app: Router, body: &str) -> (StatusCode, Value, Option<String>) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/webhook")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap(), content_type)
    }

    #[tokio::test]
    async fn test_accepts_valid_push() {
        let (status, body, content_type) =
            post_body(app(), r#"{"articleId":"1","title":"hello"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "ok"}));
        assert_eq!(content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let (status, body, _) = post_body(app(), "{oops").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "Invalid JSON body"}));
    }

    #[tokio::test]
    async fn test_missing_article_id() {
        let (status, body, _) = post_body(app(), r#"{"title":"x"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "Invalid payload: missing articleId"}));
    }

    #[tokio::test]
    async fn test_handler_error() {
        let (status, body, _) = post_body(app(), r#"{"articleId":"1","title":"fail"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": "Handler error: rejected title"}));
    }

    #[tokio::test]
    async fn test_get_is_not_routed() {
        let response = app()
            .oneshot(Request::get("/webhook").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
