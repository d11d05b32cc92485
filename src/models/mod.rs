mod article;
mod callback;
mod subscription;

pub use article::ArticlePushPayload;
pub use callback::{CallbackConfig, CallbackConfigResponse, MPusherErrorResponse};
pub use subscription::{
    SubscribeByArticleResponse, Subscription, SubscriptionListParams, SubscriptionListResponse,
};
