use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Mutex;

use super::{ImageStore, ImageStoreError};
use crate::database::models::EmployeeImage;

/// Entries kept per log; older ones are dropped first
const LOG_CAPACITY: usize = 1024;

/// In-process asset host. Keeps a bounded log of recent uploads and deletes
/// and can be switched into a failing mode to exercise upstream errors.
#[derive(Default)]
pub struct MemoryImageStore {
    folder: String,
    counter: AtomicU64,
    fail_uploads: AtomicBool,
    uploaded: Mutex<VecDeque<String>>,
    deleted: Mutex<VecDeque<String>>,
}

async fn record(log: &Mutex<VecDeque<String>>, public_id: String) {
    let mut log = log.lock().await;
    if log.len() == LOG_CAPACITY {
        log.pop_front();
    }
    log.push_back(public_id);
}

impl MemoryImageStore {
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            ..Self::default()
        }
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Most recent public_ids handed out, oldest first
    pub async fn uploaded(&self) -> Vec<String> {
        self.uploaded.lock().await.iter().cloned().collect()
    }

    pub async fn deleted(&self) -> Vec<String> {
        self.deleted.lock().await.iter().cloned().collect()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn upload(&self, bytes: Vec<u8>, content_type: &str) -> Result<EmployeeImage, ImageStoreError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(ImageStoreError::Rejected("upload disabled".to_string()));
        }

        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let extension = if content_type == "image/png" { "png" } else { "jpg" };
        let public_id = if self.folder.is_empty() {
            format!("img{}", n)
        } else {
            format!("{}/img{}", self.folder, n)
        };

        tracing::debug!("Stored {} bytes as {}", bytes.len(), public_id);
        record(&self.uploaded, public_id.clone()).await;

        Ok(EmployeeImage {
            url: format!("memory://{}.{}", public_id, extension),
            public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), ImageStoreError> {
        record(&self.deleted, public_id.to_string()).await;
        Ok(())
    }
}
