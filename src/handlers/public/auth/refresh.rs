// handlers/public/auth/refresh.rs - POST /api/v1/auth/refresh handler

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/v1/auth/refresh - Exchange `{ "refreshToken": "..." }` for a
/// new `authToken`. The refresh token must be the one currently stored for
/// its user; it is not rotated.
pub async fn refresh_post(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> ApiResult<Value> {
    let token = payload
        .as_ref()
        .and_then(|Json(body)| body.get("refreshToken"))
        .and_then(Value::as_str);

    let auth_token = state.auth.refresh(token).await?;

    Ok(ApiResponse::fields(json!({ "authToken": auth_token })))
}
