//! Health check DTOs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" while the process serves requests
    pub status: String,
    pub version: String,
    /// RFC 3339 time of the check
    pub timestamp: String,
    /// Whether an API token is configured
    pub client_configured: bool,
}

impl HealthResponse {
    pub fn ok(client_configured: bool) -> Self {
        Self {
            status: "ok".to_string(),
            version: crate::pkg_version().to_string(),
            timestamp: jiff::Timestamp::now().to_string(),
            client_configured,
        }
    }
}
