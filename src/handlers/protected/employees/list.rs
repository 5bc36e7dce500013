use axum::{extract::State, Extension};

use crate::database::models::Employee;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /api/v1/employees - every record, newest first
pub async fn employee_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<Employee>> {
    let employees = state.employees.list().await?;
    tracing::debug!("User {} listed {} employees", user.user_id, employees.len());

    Ok(ApiResponse::success(employees).with_message("Employees retrieved successfully"))
}
