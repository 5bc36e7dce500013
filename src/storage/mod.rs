//! External image storage.
//!
//! Employee photos live with a hosted provider; the service only keeps the
//! returned `{url, public_id}` pair. Both operations are network calls and
//! can fail independently of the database.

pub mod cloudinary;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::EmployeeImage;

pub use cloudinary::CloudinaryImageStore;
pub use memory::MemoryImageStore;

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("Image store is not configured: missing {0}")]
    NotConfigured(&'static str),

    #[error("Image store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Image store rejected the request: {0}")]
    Rejected(String),
}

/// Upload/delete contract for the asset host
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `bytes` and return the public URL plus the key needed to delete it
    async fn upload(&self, bytes: Vec<u8>, content_type: &str) -> Result<EmployeeImage, ImageStoreError>;

    async fn delete(&self, public_id: &str) -> Result<(), ImageStoreError>;
}
