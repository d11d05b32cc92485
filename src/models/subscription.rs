//! Subscription models for the MPusher public API.

use serde::{Deserialize, Serialize};

/// A followed official account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Official account ID
    pub mp_id: i64,
    /// Official account display name
    pub mp_name: String,
}

/// Query parameters for listing subscriptions.
///
/// Every field is optional; absent fields are left out of the query string
/// and the remote service applies its own defaults (page 1, 10 per page).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionListParams {
    /// Page number, 1-based
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size, at most 100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Filter by account name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp_name: Option<String>,
}

impl SubscriptionListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn mp_name(mut self, mp_name: impl Into<String>) -> Self {
        self.mp_name = Some(mp_name.into());
        self
    }

    /// Returns the query pairs in wire order, skipping unset fields.
    ///
    /// An empty `mp_name` counts as unset.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize", page_size.to_string()));
        }
        if let Some(name) = self.mp_name.as_deref().filter(|n| !n.is_empty()) {
            pairs.push(("mpName", name.to_string()));
        }
        pairs
    }
}

/// One page of subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionListResponse {
    pub items: Vec<Subscription>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Response of subscribing through an article URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeByArticleResponse {
    /// The account that is now followed
    pub data: Subscription,
    /// Status message from the service
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_uses_camel_case() {
        let sub = Subscription {
            mp_id: 123,
            mp_name: "test".to_string(),
        };
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json, serde_json::json!({"mpId": 123, "mpName": "test"}));
    }

    #[test]
    fn test_query_pairs_full() {
        let params = SubscriptionListParams::new()
            .page(1)
            .page_size(10)
            .mp_name("测试");
        assert_eq!(
            params.query_pairs(),
            vec![
                ("page", "1".to_string()),
                ("pageSize", "10".to_string()),
                ("mpName", "测试".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_skip_unset_and_empty_name() {
        let params = SubscriptionListParams::new().page_size(50).mp_name("");
        assert_eq!(params.query_pairs(), vec![("pageSize", "50".to_string())]);
        assert!(SubscriptionListParams::default().query_pairs().is_empty());
    }

    #[test]
    fn test_list_response_deserialize() {
        let json = r#"{"items":[{"mpId":1,"mpName":"a"}],"total":1,"page":1,"pageSize":10}"#;
        let resp: SubscriptionListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.items.len(), 1);
        assert_eq!(resp.page_size, 10);
    }
}
