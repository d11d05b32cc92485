//! Binding for plain `http` request/response pairs.
//!
//! Suits serverless runtimes and hand-rolled servers that expose the request
//! as [`http::Request`](axum::http::Request) with a buffered body.

use axum::{
    body::Bytes,
    http::{
        HeaderValue, Method, Request, Response,
        header::{ALLOW, CONTENT_TYPE},
    },
};

use crate::webhook::{WebhookEndpoint, WebhookRejection, WebhookReply};

/// Handles one request, answering 405 for anything but `POST`.
pub async fn handle_request(endpoint: &WebhookEndpoint, request: Request<Bytes>) -> Response<String> {
    let (parts, body) = request.into_parts();

    let reply = if parts.method == Method::POST {
        endpoint.respond(&parts.headers, body).await
    } else {
        tracing::debug!(method = %parts.method, "Webhook called with unsupported method");
        WebhookReply::from(Err(WebhookRejection::MethodNotAllowed))
    };

    into_http_response(reply)
}

/// Converts a reply into a JSON `http::Response`.
pub fn into_http_response(reply: WebhookReply) -> Response<String> {
    let mut response = Response::new(reply.to_json());
    *response.status_mut() = reply.status;

    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if reply.status == WebhookRejection::MethodNotAllowed.status() {
        headers.insert(ALLOW, HeaderValue::from_static("POST"));
    }

    response
}
