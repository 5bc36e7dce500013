use axum::{
    extract::{Path, State},
    Extension,
};

use super::payload::EmployeePayload;
use super::NOT_FOUND;
use crate::database::models::Employee;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation::{validate_employee_update, validate_optional_image};

/// PUT /api/v1/employees/:id - partial update from multipart or JSON.
///
/// With a new `image` attached, `public_id` names the asset being replaced;
/// it is deleted only once the upload has succeeded.
pub async fn employee_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthUser>,
    payload: EmployeePayload,
) -> ApiResult<Employee> {
    let update = validate_employee_update(&payload.body)?;
    validate_optional_image(payload.image.as_ref())?;

    let id = parse_id(&id, NOT_FOUND)?;
    let employee = state.employees.update(id, update, payload.image).await?;
    tracing::info!("User {} updated employee {}", user.user_id, employee.id);

    Ok(ApiResponse::success(employee).with_message("Employee updated successfully"))
}
