use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Employee, EmployeePatch, NewEmployee, NewUser, User};
use crate::database::repository::{EmployeeStore, UserStore};

/// Process-local credential store. Enforces the same unique index as the
/// `users` table.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.lock().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut users = self.users.lock().await;
        if users.values().any(|u| u.user_name == user.user_name) {
            return Err(DatabaseError::UniqueViolation("users_user_name_key".to_string()));
        }
        let now = Utc::now();
        let stored = User {
            id: Uuid::new_v4(),
            user_name: user.user_name,
            password_hash: user.password_hash,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.lock().await.get(&id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, DatabaseError> {
        let users = self.users.lock().await;
        Ok(users.values().find(|u| u.user_name == user_name).cloned())
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>, DatabaseError> {
        let users = self.users.lock().await;
        Ok(users
            .values()
            .find(|u| u.refresh_token.as_deref() == Some(token))
            .cloned())
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<bool, DatabaseError> {
        let mut users = self.users.lock().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.refresh_token = token.map(str::to_string);
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Process-local employee store with the `employees.email` unique index
#[derive(Default)]
pub struct MemoryEmployeeStore {
    employees: Mutex<Vec<Employee>>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.employees.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.employees.lock().await.is_empty()
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn insert(&self, employee: NewEmployee) -> Result<Employee, DatabaseError> {
        let mut employees = self.employees.lock().await;
        if employees.iter().any(|e| e.email == employee.fields.email) {
            return Err(DatabaseError::UniqueViolation("employees_email_key".to_string()));
        }
        let now = Utc::now();
        let fields = employee.fields;
        let stored = Employee {
            id: Uuid::new_v4(),
            name: fields.name,
            email: fields.email,
            mobile: fields.mobile,
            designation: fields.designation,
            gender: fields.gender,
            course: fields.course,
            image: employee.image,
            created_at: now,
            updated_at: now,
        };
        employees.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Employee>, DatabaseError> {
        let employees = self.employees.lock().await;
        Ok(employees.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, DatabaseError> {
        let employees = self.employees.lock().await;
        Ok(employees.iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DatabaseError> {
        let employees = self.employees.lock().await;
        Ok(employees.iter().find(|e| e.email == email).cloned())
    }

    async fn update(&self, id: Uuid, patch: EmployeePatch) -> Result<Option<Employee>, DatabaseError> {
        let mut employees = self.employees.lock().await;
        if let Some(email) = &patch.email {
            if employees.iter().any(|e| e.id != id && &e.email == email) {
                return Err(DatabaseError::UniqueViolation("employees_email_key".to_string()));
            }
        }
        let Some(employee) = employees.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        patch.apply(employee);
        employee.updated_at = Utc::now();
        Ok(Some(employee.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Employee>, DatabaseError> {
        let mut employees = self.employees.lock().await;
        let position = employees.iter().position(|e| e.id == id);
        Ok(position.map(|i| employees.remove(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Course, Designation, EmployeeFields, EmployeeImage, Gender};

    fn new_employee(email: &str) -> NewEmployee {
        NewEmployee {
            fields: EmployeeFields {
                name: "Ravi Kumar".to_string(),
                email: email.to_string(),
                mobile: "9876543210".to_string(),
                designation: Designation::Sales,
                gender: Gender::M,
                course: Course::Bca,
            },
            image: EmployeeImage {
                url: "https://img.example/x.png".to_string(),
                public_id: "assignment/x".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn user_name_is_unique() {
        let store = MemoryUserStore::new();
        let user = NewUser {
            user_name: "alice".to_string(),
            password_hash: "hash".to_string(),
        };
        store.insert(user.clone()).await.unwrap();
        let err = store.insert(user).await.unwrap_err();
        assert!(matches!(err, DatabaseError::UniqueViolation(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn refresh_token_lookup_follows_updates() {
        let store = MemoryUserStore::new();
        let user = store
            .insert(NewUser {
                user_name: "bob".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();

        assert!(store.set_refresh_token(user.id, Some("t1")).await.unwrap());
        assert!(store.find_by_refresh_token("t1").await.unwrap().is_some());

        store.set_refresh_token(user.id, None).await.unwrap();
        assert!(store.find_by_refresh_token("t1").await.unwrap().is_none());
        assert!(!store.set_refresh_token(Uuid::new_v4(), None).await.unwrap());
    }

    #[tokio::test]
    async fn employee_email_is_unique_and_list_is_newest_first() {
        let store = MemoryEmployeeStore::new();
        let first = store.insert(new_employee("a@b.com")).await.unwrap();
        let second = store.insert(new_employee("c@d.com")).await.unwrap();
        assert!(store.insert(new_employee("a@b.com")).await.is_err());

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn delete_returns_removed_record() {
        let store = MemoryEmployeeStore::new();
        let created = store.insert(new_employee("a@b.com")).await.unwrap();
        let removed = store.delete(created.id).await.unwrap().unwrap();
        assert_eq!(removed.id, created.id);
        assert!(store.delete(created.id).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }
}
