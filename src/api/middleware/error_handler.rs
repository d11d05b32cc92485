//! `AppError` to HTTP response conversion.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Renders `{"error": ..., "details": ...}` with [`AppError::status`].
    ///
    /// Remote errors carry the remote body as `details`; internal errors are
    /// logged and reported with a generic message.
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Validation { field, reason } => {
                ErrorResponse::new(reason.clone()).with_details(json!({ "field": field }))
            }
            AppError::BadRequest { message } => ErrorResponse::new(message.clone()),
            AppError::Upstream(err) => {
                let body = ErrorResponse::new(err.to_string());
                match err.response() {
                    Some(details) => body.with_details(details.clone()),
                    None => body,
                }
            }
            AppError::ClientUnavailable | AppError::Unavailable { .. } => {
                ErrorResponse::new(self.to_string())
            }
            AppError::Config(err) => ErrorResponse::new(err.to_string()),
            AppError::Logger(err) => ErrorResponse::new(err.to_string()),
            AppError::Internal { .. } => ErrorResponse::new("An internal error occurred"),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = ?self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}
