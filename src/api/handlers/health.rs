//! Health check endpoint.

use axum::{Json, Router, extract::State, routing::get};

use crate::api::dto::HealthResponse;
use crate::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
///
/// Always 200 while the process is serving; `client_configured` reports
/// whether API routes can run without a per-request token.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.client.is_some()))
}
