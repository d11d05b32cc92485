use serde::Serialize;

use crate::models::ArticlePushPayload;

/// Body of `GET /api/articles`, newest first.
#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub items: Vec<ArticlePushPayload>,
    pub total: usize,
}

impl From<Vec<ArticlePushPayload>> for ArticleListResponse {
    fn from(items: Vec<ArticlePushPayload>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}
