//! HTTP request handlers, one module per resource.

pub mod articles;
pub mod callback;
pub mod health;
pub mod log_level;
pub mod subscriptions;
