//! MPusher client SDK and webhook toolkit.
//!
//! - [`client`]: typed client for the MPusher public API
//! - [`webhook`]: article push parsing, handlers and framework adapters
//! - [`api`], [`server`], [`cli`]: the demo service and command-line tool

use shadow_rs::shadow;
shadow!(build);

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod server;
pub mod state;
pub mod utils;
pub mod webhook;

pub use client::{MPusherClient, MPusherConfig, MPusherError};
pub use models::{
    ArticlePushPayload, CallbackConfig, CallbackConfigResponse, SubscribeByArticleResponse,
    Subscription, SubscriptionListParams, SubscriptionListResponse,
};
pub use state::AppState;
pub use webhook::{
    ArticleHandler, WebhookBody, WebhookEndpoint, WebhookOutcome, WebhookRejection, WebhookReply,
    handler_fn, parse_webhook,
};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
