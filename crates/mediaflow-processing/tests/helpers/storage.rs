//! In-memory storage for tests

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mediaflow_storage::{Storage, StorageBackend, StorageError, StorageResult};
use uuid::Uuid;

/// Mock storage that keeps uploaded bytes in memory
#[derive(Clone, Default)]
pub struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    attempts: Arc<Mutex<Vec<String>>>,
    fail_on: Option<String>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every upload whose filename contains `pattern`.
    pub fn failing_on(pattern: &str) -> Self {
        Self {
            fail_on: Some(pattern.to_string()),
            ..Self::default()
        }
    }

    /// Filenames of every upload attempted, successful or not.
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn upload_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.files.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn size_of(&self, key: &str) -> Option<usize> {
        self.files.lock().unwrap().get(key).map(Vec::len)
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn upload_file(
        &self,
        folder_id: Option<Uuid>,
        filename: &str,
        _content_type: &str,
        source: &Path,
    ) -> StorageResult<(String, String)> {
        self.attempts.lock().unwrap().push(filename.to_string());

        if let Some(pattern) = &self.fail_on {
            if filename.contains(pattern.as_str()) {
                return Err(StorageError::UploadFailed(format!(
                    "mock failure for {}",
                    filename
                )));
            }
        }

        let data = tokio::fs::read(source).await?;
        let key = match folder_id {
            Some(folder) => format!("{}/{}", folder, filename),
            None => filename.to_string(),
        };
        self.files.lock().unwrap().insert(key.clone(), data);

        let url = format!("mock://{}", key);
        Ok((key, url))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
