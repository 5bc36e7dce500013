use axum::extract::{Path, State};

use super::NOT_FOUND;
use crate::database::models::Employee;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/v1/employees/:id
pub async fn employee_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Employee> {
    let id = parse_id(&id, NOT_FOUND)?;
    let employee = state.employees.get(id).await?;

    Ok(ApiResponse::success(employee).with_message("Employee retrieved successfully"))
}
