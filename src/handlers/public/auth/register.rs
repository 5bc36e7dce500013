// handlers/public/auth/register.rs - POST /api/v1/auth/register handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};

use crate::database::models::PublicUser;
use crate::handlers::json_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::validate_credentials;

/**
 * POST /api/v1/auth/register - Create a user account
 *
 * Input: `{ "userName": "admin01", "pwd": "Secret#123" }`
 *
 * Output (201):
 * ```json
 * {
 *   "success": true,
 *   "message": "User created successfully",
 *   "user": { "sno": "uuid", "userName": "admin01" }
 * }
 * ```
 *
 * A taken userName is reported by the store's unique index as 400 DUPLICATE.
 */
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let body = json_body(payload)?;
    let credentials = validate_credentials(&body)?;

    let user = state.auth.register(credentials).await?;

    Ok(ApiResponse::fields(json!({ "user": PublicUser::from(&user) }))
        .with_message("User created successfully")
        .created())
}
