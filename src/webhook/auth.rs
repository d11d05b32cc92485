//! Bearer token check for inbound pushes.
//!
//! MPusher sends the token configured with the callback URL as
//! `Authorization: Bearer <token>`.

use axum::http::{HeaderMap, header::AUTHORIZATION};

use super::parser::WebhookRejection;

/// Verifies the `Authorization` header against `expected`.
///
/// No expected token means every request is accepted.
///
/// # Errors
/// Returns [`WebhookRejection::Unauthorized`] when the header is missing,
/// uses another scheme, or carries a different token.
pub fn verify_bearer(headers: &HeaderMap, expected: Option<&str>) -> Result<(), WebhookRejection> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let provided = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);

    match provided {
        Some(token) if constant_time_eq(token.as_bytes(), expected.as_bytes()) => Ok(()),
        _ => Err(WebhookRejection::Unauthorized),
    }
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim())
        .filter(|t| !t.is_empty())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
