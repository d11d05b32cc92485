use serde::Deserialize;
use validator::Validate;

use crate::models::CallbackConfig;

/// Body of `PUT /api/callback`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetCallbackRequest {
    #[validate(url(message = "callbackUrl must be a valid URL"))]
    pub callback_url: String,

    #[serde(default)]
    pub auth_token: Option<String>,
}

impl From<SetCallbackRequest> for CallbackConfig {
    fn from(request: SetCallbackRequest) -> Self {
        let config = CallbackConfig::new(request.callback_url);
        match request.auth_token {
            Some(token) if !token.is_empty() => config.with_auth_token(token),
            _ => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_callback_config() {
        let request: SetCallbackRequest = serde_json::from_str(
            r#"{"callbackUrl": "https://example.com/webhook", "authToken": "s3cret"}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());

        let config = CallbackConfig::from(request);
        assert_eq!(config.callback_url, "https://example.com/webhook");
        assert_eq!(config.auth_token.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_rejects_invalid_url() {
        let request: SetCallbackRequest =
            serde_json::from_str(r#"{"callbackUrl": "not a url"}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
