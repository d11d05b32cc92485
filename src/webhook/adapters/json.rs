//! Binding for hosts whose body parser already produced JSON.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use serde_json::Value;

use crate::webhook::{WebhookEndpoint, WebhookReply, WebhookResponseBody};

/// Processes an already-parsed body and returns the status and JSON body.
pub async fn handle_value(
    endpoint: &WebhookEndpoint,
    headers: &HeaderMap,
    value: Value,
) -> (StatusCode, WebhookResponseBody) {
    let WebhookReply { status, body } = endpoint.respond(headers, value).await;
    (status, body)
}

/// Axum handler that lets the [`Json`] extractor parse the body.
///
/// Any extractor rejection (malformed JSON, missing `Content-Type`) is
/// answered with 400 `{"message":"Invalid JSON body"}`.
pub async fn json_webhook_handler(
    State(endpoint): State<WebhookEndpoint>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<WebhookResponseBody>) {
    let (status, body) = match payload {
        Ok(Json(value)) => handle_value(&endpoint, &headers, value).await,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Webhook body is not JSON");
            let WebhookReply { status, body } = endpoint.respond_invalid_json(&headers);
            (status, body)
        }
    };
    (status, Json(body))
}
