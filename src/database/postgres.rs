use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Employee, EmployeePatch, EmployeeRow, NewEmployee, NewUser, User};
use crate::database::repository::{EmployeeStore, UserStore};

const USER_COLUMNS: &str = "id, user_name, password_hash, refresh_token, created_at, updated_at";

const EMPLOYEE_COLUMNS: &str = "id, name, email, mobile, designation, gender, course, \
     image_url, image_public_id, created_at, updated_at";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_where(&self, column: &str, value: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, column);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (id, user_name, password_hash) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.user_name)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, DatabaseError> {
        self.find_where("user_name", user_name).await
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>, DatabaseError> {
        self.find_where("refresh_token", token).await
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE users SET refresh_token = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_employee(row: Option<EmployeeRow>) -> Result<Option<Employee>, DatabaseError> {
    row.map(Employee::try_from).transpose()
}

#[async_trait]
impl EmployeeStore for PgEmployeeRepository {
    async fn insert(&self, employee: NewEmployee) -> Result<Employee, DatabaseError> {
        let sql = format!(
            "INSERT INTO employees \
             (id, name, email, mobile, designation, gender, course, image_url, image_public_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
            EMPLOYEE_COLUMNS
        );
        let fields = employee.fields;
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&fields.name)
            .bind(&fields.email)
            .bind(&fields.mobile)
            .bind(fields.designation.as_str())
            .bind(fields.gender.as_str())
            .bind(fields.course.as_str())
            .bind(&employee.image.url)
            .bind(&employee.image.public_id)
            .fetch_one(&self.pool)
            .await?;
        Employee::try_from(row)
    }

    async fn list(&self) -> Result<Vec<Employee>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM employees ORDER BY created_at DESC",
            EMPLOYEE_COLUMNS
        );
        sqlx::query_as::<_, EmployeeRow>(&sql)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Employee::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, DatabaseError> {
        let sql = format!("SELECT {} FROM employees WHERE id = $1", EMPLOYEE_COLUMNS);
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        into_employee(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DatabaseError> {
        let sql = format!("SELECT {} FROM employees WHERE email = $1", EMPLOYEE_COLUMNS);
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        into_employee(row)
    }

    async fn update(&self, id: Uuid, patch: EmployeePatch) -> Result<Option<Employee>, DatabaseError> {
        // NULL parameters keep the current column value
        let sql = format!(
            "UPDATE employees SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                mobile = COALESCE($4, mobile), \
                designation = COALESCE($5, designation), \
                gender = COALESCE($6, gender), \
                course = COALESCE($7, course), \
                image_url = COALESCE($8, image_url), \
                image_public_id = COALESCE($9, image_public_id), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            EMPLOYEE_COLUMNS
        );
        let (image_url, image_public_id) = match patch.image {
            Some(image) => (Some(image.url), Some(image.public_id)),
            None => (None, None),
        };
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.email)
            .bind(patch.mobile)
            .bind(patch.designation.map(|d| d.as_str()))
            .bind(patch.gender.map(|g| g.as_str()))
            .bind(patch.course.map(|c| c.as_str()))
            .bind(image_url)
            .bind(image_public_id)
            .fetch_optional(&self.pool)
            .await?;
        into_employee(row)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Employee>, DatabaseError> {
        let sql = format!(
            "DELETE FROM employees WHERE id = $1 RETURNING {}",
            EMPLOYEE_COLUMNS
        );
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        into_employee(row)
    }
}
