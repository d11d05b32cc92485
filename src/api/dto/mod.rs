//! Request and response bodies of the demo API.

mod article;
mod callback;
mod error;
mod health;
mod log_level;
mod subscription;

pub use article::ArticleListResponse;
pub use callback::SetCallbackRequest;
pub use error::ErrorResponse;
pub use health::HealthResponse;
pub use log_level::{LogLevelRequest, LogLevelResponse};
pub use subscription::{SubscribeRequest, SubscriptionQuery, UnsubscribeRequest};
