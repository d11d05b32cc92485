//! Host bindings for [`WebhookEndpoint`](super::WebhookEndpoint).
//!
//! - [`axum`]: handler and router reading the raw request body
//! - [`json`]: for hosts that already parsed the body into JSON
//! - [`web`]: plain `http::Request` to `http::Response`, for serverless
//!   runtimes and custom servers

pub mod axum;
pub mod json;
pub mod web;
