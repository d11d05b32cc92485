//! In-memory log of received article pushes.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::ArticlePushPayload;
use crate::webhook::ArticleHandler;

/// Bounded, newest-first article log.
///
/// Cloning is cheap; clones share the same log.
#[derive(Debug, Clone)]
pub struct ArticleRepository {
    articles: Arc<RwLock<VecDeque<ArticlePushPayload>>>,
    capacity: usize,
}

impl ArticleRepository {
    /// Creates an empty log keeping at most `capacity` articles (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            articles: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Adds an article at the front, dropping the oldest beyond capacity.
    pub async fn record(&self, article: ArticlePushPayload) {
        let mut articles = self.articles.write().await;
        articles.push_front(article);
        articles.truncate(self.capacity);
    }

    /// Snapshot of the log, newest first.
    pub async fn list(&self) -> Vec<ArticlePushPayload> {
        self.articles.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }
}

#[async_trait]
impl ArticleHandler for ArticleRepository {
    async fn on_article(&self, article: ArticlePushPayload) -> anyhow::Result<()> {
        tracing::info!(
            article_id = %article.article_id,
            mp_name = %article.mp_name,
            title = %article.title,
            url = %article.url,
            "Article received"
        );
        self.record(article).await;
        Ok(())
    }
}
