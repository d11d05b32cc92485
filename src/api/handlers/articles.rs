use axum::{Json, Router, extract::State, routing::get};

use crate::api::dto::ArticleListResponse;
use crate::state::AppState;

pub fn article_routes() -> Router<AppState> {
    Router::new().route("/", get(list_articles))
}

/// GET /api/articles - Articles received by the webhook, newest first
async fn list_articles(State(state): State<AppState>) -> Json<ArticleListResponse> {
    Json(state.articles.list().await.into())
}
