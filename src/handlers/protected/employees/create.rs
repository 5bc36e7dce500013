use axum::{extract::State, Extension};

use super::payload::EmployeePayload;
use crate::database::models::Employee;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation::{validate_new_employee, validate_required_image};

/// POST /api/v1/employees - multipart form with the six employee fields and
/// an `image` file (JPEG or PNG, at most 5MB).
///
/// Fields are validated before the file, and both before anything is
/// uploaded or stored.
pub async fn employee_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: EmployeePayload,
) -> ApiResult<Employee> {
    let fields = validate_new_employee(&payload.body)?;
    let image = validate_required_image(payload.image)?;

    let employee = state.employees.create(fields, image).await?;
    tracing::info!("User {} created employee {}", user.user_id, employee.id);

    Ok(ApiResponse::success(employee)
        .with_message("Employee created successfully")
        .created())
}
