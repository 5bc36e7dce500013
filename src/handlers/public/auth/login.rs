// handlers/public/auth/login.rs - POST /api/v1/auth/login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};

use crate::database::models::PublicUser;
use crate::handlers::json_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::validate_credentials;

/**
 * POST /api/v1/auth/login - Authenticate and receive a token pair
 *
 * Expected Output (Success):
 * ```json
 * {
 *   "success": true,
 *   "message": "User logged in successfully",
 *   "user": { "sno": "uuid", "userName": "admin01" },
 *   "authToken": "eyJhbGciOiJIUzI1NiI...",
 *   "refreshToken": "eyJhbGciOiJIUzI1NiI..."
 * }
 * ```
 *
 * Unknown user → 404, wrong password → 400. The refresh token replaces any
 * previous one, so older sessions can no longer refresh.
 */
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let body = json_body(payload)?;
    let credentials = validate_credentials(&body)?;

    let session = state.auth.login(credentials).await?;

    Ok(ApiResponse::fields(json!({
        "user": PublicUser::from(&session.user),
        "authToken": session.auth_token,
        "refreshToken": session.refresh_token,
    }))
    .with_message("User logged in successfully"))
}
