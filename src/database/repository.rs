use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Employee, EmployeePatch, NewEmployee, NewUser, User};

/// Credential store. `user_name` is unique at the storage level; inserts
/// that collide fail with [`DatabaseError::UniqueViolation`].
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>, DatabaseError>;

    /// Overwrites (or clears) the stored refresh token. Returns `false` when
    /// no user has that id.
    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<bool, DatabaseError>;
}

/// Employee store. `email` is unique at the storage level.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn insert(&self, employee: NewEmployee) -> Result<Employee, DatabaseError>;

    /// All records, newest first
    async fn list(&self) -> Result<Vec<Employee>, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DatabaseError>;

    /// Merges the patch and bumps `updated_at`. `None` when the id is unknown.
    async fn update(&self, id: Uuid, patch: EmployeePatch) -> Result<Option<Employee>, DatabaseError>;

    /// Removes the record and returns what was deleted
    async fn delete(&self, id: Uuid) -> Result<Option<Employee>, DatabaseError>;
}
