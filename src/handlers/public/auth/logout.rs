// handlers/public/auth/logout.rs - POST /api/v1/auth/logout handler

use axum::{extract::State, Json};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/v1/auth/logout - Clear the refresh token of `{ "sno": "uuid" }`.
///
/// A missing or malformed `sno` cannot match a user and is reported as 404.
pub async fn logout_post(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> ApiResult<()> {
    let user_id = payload
        .as_ref()
        .and_then(|Json(body)| body.get("sno"))
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    state.auth.logout(user_id).await?;

    Ok(ApiResponse::message("Logged out successfully"))
}
