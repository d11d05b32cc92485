use axum::{Json, Router, extract::State, http::HeaderMap, routing::put};

use crate::api::dto::SetCallbackRequest;
use crate::error::AppError;
use crate::models::{CallbackConfig, CallbackConfigResponse};
use crate::state::AppState;
use crate::utils::ValidatedJson;

pub fn callback_routes() -> Router<AppState> {
    Router::new().route("/", put(set_callback))
}

/// PUT /api/callback - Point MPusher pushes at a new URL
async fn set_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<SetCallbackRequest>,
) -> Result<Json<CallbackConfigResponse>, AppError> {
    let client = state.client_for(&headers)?;
    let config = CallbackConfig::from(payload);
    let response = client.set_callback(&config).await?;
    tracing::info!(callback_url = %config.callback_url, "Callback updated");
    Ok(Json(response))
}
