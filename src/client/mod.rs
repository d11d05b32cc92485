//! MPusher API client.

mod error;
mod http;
mod mpusher;

pub use error::{MPusherError, NETWORK_ERROR_STATUS};
pub use http::{USER_AGENT, build_http_client};
pub use mpusher::{
    API_PREFIX, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, MPusherClient,
    MPusherConfig, TOKEN_ENV,
};
