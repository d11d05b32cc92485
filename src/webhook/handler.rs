//! User callback invoked for every accepted article push.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::models::ArticlePushPayload;

/// Receives validated article pushes.
///
/// Implement this trait directly, or wrap an async closure with
/// [`handler_fn`]. Returning an error makes the webhook answer 500 with
/// `Handler error: <message>`.
///
/// # Example
/// ```ignore
/// struct Printer;
///
/// #[async_trait]
/// impl ArticleHandler for Printer {
///     async fn on_article(&self, article: ArticlePushPayload) -> anyhow::Result<()> {
///         println!("{}", article.title);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait ArticleHandler: Send + Sync {
    async fn on_article(&self, article: ArticlePushPayload) -> anyhow::Result<()>;
}

#[async_trait]
impl<H> ArticleHandler for Arc<H>
where
    H: ArticleHandler + ?Sized,
{
    async fn on_article(&self, article: ArticlePushPayload) -> anyhow::Result<()> {
        (**self).on_article(article).await
    }
}

/// Adapter turning an async closure into an [`ArticleHandler`].
#[derive(Clone)]
pub struct HandlerFn<F> {
    f: F,
}

/// Wraps an async closure as an [`ArticleHandler`].
///
/// ```ignore
/// let handler = handler_fn(|article: ArticlePushPayload| async move {
///     tracing::info!(title = %article.title, "article received");
///     Ok(())
/// });
/// ```
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(ArticlePushPayload) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send,
{
    HandlerFn { f }
}

#[async_trait]
impl<F, Fut> ArticleHandler for HandlerFn<F>
where
    F: Fn(ArticlePushPayload) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send,
{
    async fn on_article(&self, article: ArticlePushPayload) -> anyhow::Result<()> {
        (self.f)(article).await
    }
}
