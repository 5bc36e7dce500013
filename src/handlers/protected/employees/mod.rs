// handlers/protected/employees/mod.rs - Employee directory CRUD
//
// Every route here sits behind the bearer guard, so handlers can rely on an
// `AuthUser` extension being present.

pub mod create;  // POST   /api/v1/employees
pub mod delete;  // DELETE /api/v1/employees/:id
pub mod list;    // GET    /api/v1/employees
pub mod payload; // multipart-or-JSON body extractor
pub mod show;    // GET    /api/v1/employees/:id
pub mod update;  // PUT    /api/v1/employees/:id

pub use create::employee_create;
pub use delete::employee_delete;
pub use list::employee_list;
pub use show::employee_show;
pub use update::employee_update;

pub(crate) const NOT_FOUND: &str = "Employee not found";
