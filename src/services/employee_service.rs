use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Employee, EmployeeFields, NewEmployee};
use crate::database::repository::EmployeeStore;
use crate::storage::{ImageStore, ImageStoreError};
use crate::validation::{EmployeeUpdate, UploadedFile};

#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("Employee already exists")]
    AlreadyExists,

    #[error("Employee email already exists")]
    DuplicateEmail,

    #[error("Employee not found")]
    NotFound,

    #[error("public_id is required")]
    MissingPublicId,

    #[error(transparent)]
    Database(DatabaseError),

    #[error(transparent)]
    Image(#[from] ImageStoreError),
}

impl From<DatabaseError> for EmployeeError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::UniqueViolation(_) => EmployeeError::AlreadyExists,
            other => EmployeeError::Database(other),
        }
    }
}

/// CRUD over employee records and the images they own
#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeStore>,
    images: Arc<dyn ImageStore>,
}

impl EmployeeService {
    pub fn new(employees: Arc<dyn EmployeeStore>, images: Arc<dyn ImageStore>) -> Self {
        Self { employees, images }
    }

    pub async fn create(&self, fields: EmployeeFields, file: UploadedFile) -> Result<Employee, EmployeeError> {
        if self.employees.find_by_email(&fields.email).await?.is_some() {
            return Err(EmployeeError::AlreadyExists);
        }

        let image = self.images.upload(file.bytes, &file.content_type).await?;
        let public_id = image.public_id.clone();

        match self.employees.insert(NewEmployee { fields, image }).await {
            Ok(employee) => {
                tracing::info!("Created employee {}", employee.id);
                Ok(employee)
            }
            Err(err) => {
                // Lost a race on the email index, or the insert failed outright
                self.discard_upload(&public_id, &err).await;
                Err(err.into())
            }
        }
    }

    /// Best-effort removal of an asset whose record was never written
    async fn discard_upload(&self, public_id: &str, cause: &(dyn std::fmt::Display + Sync)) {
        tracing::warn!("Discarding upload {} after failure: {}", public_id, cause);
        if let Err(cleanup) = self.images.delete(public_id).await {
            tracing::warn!("Could not remove orphaned image {}: {}", public_id, cleanup);
        }
    }

    /// Newest first
    pub async fn list(&self) -> Result<Vec<Employee>, EmployeeError> {
        Ok(self.employees.list().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Employee, EmployeeError> {
        self.employees.find_by_id(id).await?.ok_or(EmployeeError::NotFound)
    }

    /// Applies a partial update. A new image is uploaded before the old one
    /// (`update.public_id`) is deleted, so a failed upload leaves both the
    /// record and the old asset in place.
    pub async fn update(
        &self,
        id: Uuid,
        update: EmployeeUpdate,
        file: Option<UploadedFile>,
    ) -> Result<Employee, EmployeeError> {
        let EmployeeUpdate { mut patch, public_id } = update;

        if self.employees.find_by_id(id).await?.is_none() {
            return Err(EmployeeError::NotFound);
        }

        // Any holder counts, the record being updated included
        if let Some(email) = &patch.email {
            if self.employees.find_by_email(email).await?.is_some() {
                return Err(EmployeeError::DuplicateEmail);
            }
        }

        let mut uploaded = None;
        if let Some(file) = file {
            let image = self.images.upload(file.bytes, &file.content_type).await?;
            if let Some(old) = public_id.as_deref() {
                if let Err(err) = self.images.delete(old).await {
                    self.discard_upload(&image.public_id, &err).await;
                    return Err(err.into());
                }
            }
            uploaded = Some(image.public_id.clone());
            patch.image = Some(image);
        }

        let result = match self.employees.update(id, patch).await {
            Ok(Some(employee)) => Ok(employee),
            Ok(None) => Err(EmployeeError::NotFound),
            Err(DatabaseError::UniqueViolation(_)) => Err(EmployeeError::DuplicateEmail),
            Err(other) => Err(EmployeeError::Database(other)),
        };

        match result {
            Ok(employee) => {
                tracing::info!("Updated employee {}", employee.id);
                Ok(employee)
            }
            Err(err) => {
                if let Some(new_id) = uploaded.as_deref() {
                    self.discard_upload(new_id, &err).await;
                }
                Err(err)
            }
        }
    }

    /// Removes the record, then its image. A crash between the two leaves
    /// an orphaned asset.
    pub async fn delete(&self, id: Uuid, public_id: Option<&str>) -> Result<(), EmployeeError> {
        let public_id = public_id
            .filter(|p| !p.is_empty())
            .ok_or(EmployeeError::MissingPublicId)?;

        let employee = self
            .employees
            .delete(id)
            .await?
            .ok_or(EmployeeError::NotFound)?;

        self.images.delete(public_id).await?;
        tracing::info!("Deleted employee {}", employee.id);
        Ok(())
    }
}
