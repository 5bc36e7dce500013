pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryEmployeeStore, MemoryUserStore};
pub use postgres::{PgEmployeeRepository, PgUserRepository};
pub use repository::{EmployeeStore, UserStore};
