pub mod auth_service;
pub mod employee_service;

pub use auth_service::{AuthError, AuthService, Session};
pub use employee_service::{EmployeeError, EmployeeService};
