//! Runtime log level control.

use axum::{Json, Router, extract::State, routing::get};

use crate::api::dto::{LogLevelRequest, LogLevelResponse};
use crate::error::{AppError, AppResult};
use crate::logger::LogLevelHandle;
use crate::state::AppState;
use crate::utils::ValidatedJson;

pub fn log_level_routes() -> Router<AppState> {
    Router::new().route("/", get(get_log_level).put(set_log_level))
}

fn handle(state: &AppState) -> AppResult<&LogLevelHandle> {
    state
        .log_level
        .as_ref()
        .ok_or_else(|| AppError::unavailable("log level control is not enabled"))
}

/// GET /api/log-level
async fn get_log_level(State(state): State<AppState>) -> AppResult<Json<LogLevelResponse>> {
    let level = handle(&state)?
        .current_level()
        .ok_or_else(|| AppError::unavailable("logger is no longer active"))?;
    Ok(Json(LogLevelResponse { level }))
}

/// PUT /api/log-level
///
/// Accepts a level (`debug`) or a filter directive (`mpusher=trace,info`).
async fn set_log_level(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LogLevelRequest>,
) -> AppResult<Json<LogLevelResponse>> {
    let handle = handle(&state)?;
    let level = payload.level.trim();
    handle.set_level(level)?;
    Ok(Json(LogLevelResponse {
        level: handle.current_level().unwrap_or_else(|| level.to_string()),
    }))
}
