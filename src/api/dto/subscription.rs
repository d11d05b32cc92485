//! Subscription management DTOs.

use serde::Deserialize;
use validator::Validate;

use crate::models::SubscriptionListParams;

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

/// Query of `GET /api/subscriptions`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: u32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "pageSize must be between 1 and 100"))]
    pub page_size: u32,

    /// Case-insensitive name filter
    #[serde(default)]
    pub mp_name: Option<String>,
}

impl From<SubscriptionQuery> for SubscriptionListParams {
    fn from(query: SubscriptionQuery) -> Self {
        let params = SubscriptionListParams::new()
            .page(query.page)
            .page_size(query.page_size);
        match query.mp_name {
            Some(name) if !name.trim().is_empty() => params.mp_name(name.trim()),
            _ => params,
        }
    }
}

/// Body of `POST /api/subscriptions`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    #[validate(length(min = 1, message = "articleUrl is required"))]
    pub article_url: String,
}

/// Body of `DELETE /api/subscriptions`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeRequest {
    #[validate(range(min = 1, message = "mpId must be a positive integer"))]
    pub mp_id: i64,
}
