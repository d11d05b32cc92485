//! Subscription management handlers.
//!
//! Each call is forwarded to the MPusher API with the configured token or
//! the one supplied in the `x-mpusher-token` header.

use axum::{Json, Router, extract::State, http::HeaderMap, http::StatusCode, routing::get};

use crate::api::dto::{SubscribeRequest, SubscriptionQuery, UnsubscribeRequest};
use crate::error::AppError;
use crate::models::{SubscribeByArticleResponse, SubscriptionListParams, SubscriptionListResponse};
use crate::state::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};

/// Routes:
/// - GET /    - List followed accounts
/// - POST /   - Follow the account behind an article URL
/// - DELETE / - Stop following an account
pub fn subscription_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(list_subscriptions).post(subscribe).delete(unsubscribe),
    )
}

/// GET /api/subscriptions?page=&pageSize=&mpName=
async fn list_subscriptions(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedQuery(query): ValidatedQuery<SubscriptionQuery>,
) -> Result<Json<SubscriptionListResponse>, AppError> {
    let client = state.client_for(&headers)?;
    let params = SubscriptionListParams::from(query);
    let subscriptions = client.get_subscriptions(Some(&params)).await?;
    Ok(Json(subscriptions))
}

/// POST /api/subscriptions
///
/// Returns 201 Created with the followed account.
async fn subscribe(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<SubscribeRequest>,
) -> Result<(StatusCode, Json<SubscribeByArticleResponse>), AppError> {
    let client = state.client_for(&headers)?;
    let subscribed = client
        .subscribe_by_article_url(payload.article_url.trim())
        .await?;
    tracing::info!(
        mp_id = subscribed.data.mp_id,
        mp_name = %subscribed.data.mp_name,
        "Subscribed"
    );
    Ok((StatusCode::CREATED, Json(subscribed)))
}

/// DELETE /api/subscriptions
///
/// Returns 204 No Content.
async fn unsubscribe(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<UnsubscribeRequest>,
) -> Result<StatusCode, AppError> {
    let client = state.client_for(&headers)?;
    client.unsubscribe(payload.mp_id).await?;
    tracing::info!(mp_id = payload.mp_id, "Unsubscribed");
    Ok(StatusCode::NO_CONTENT)
}
