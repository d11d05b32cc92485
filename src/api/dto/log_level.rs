use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `PUT /api/log-level`.
#[derive(Debug, Deserialize, Validate)]
pub struct LogLevelRequest {
    /// Level or `EnvFilter` directive
    #[validate(length(min = 1, max = 256, message = "level must not be empty"))]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogLevelResponse {
    pub level: String,
}
