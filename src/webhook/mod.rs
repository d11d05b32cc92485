//! Receiving MPusher article pushes.
//!
//! [`parse_webhook`] validates a request body and invokes an
//! [`ArticleHandler`]. [`WebhookEndpoint`] adds the optional bearer check and
//! builds the JSON reply, and [`adapters`] bind it to concrete hosts.

pub mod adapters;
mod auth;
mod endpoint;
mod handler;
mod parser;
mod response;

pub use auth::verify_bearer;
pub use endpoint::WebhookEndpoint;
pub use handler::{ArticleHandler, HandlerFn, handler_fn};
pub use parser::{WebhookBody, WebhookOutcome, WebhookRejection, decode_payload, parse_webhook};
pub use response::{OK_MESSAGE, WebhookReply, WebhookResponseBody};
