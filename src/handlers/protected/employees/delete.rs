use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;

use super::NOT_FOUND;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::EmployeeError;
use crate::state::AppState;

/// DELETE /api/v1/employees/:id with `{ "public_id": "..." }` naming the
/// image to remove alongside the record. Without it nothing is touched.
pub async fn employee_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthUser>,
    payload: Option<Json<Value>>,
) -> ApiResult<()> {
    let public_id = payload
        .as_ref()
        .and_then(|Json(body)| body.get("public_id"))
        .and_then(Value::as_str);

    // A missing public_id is a 400 even when the id is garbage
    if public_id.map_or(true, str::is_empty) {
        return Err(EmployeeError::MissingPublicId.into());
    }
    let id = parse_id(&id, NOT_FOUND)?;

    state.employees.delete(id, public_id).await?;
    tracing::info!("User {} deleted employee {}", user.user_id, id);

    Ok(ApiResponse::message("Employee deleted successfully"))
}
