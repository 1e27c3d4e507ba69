//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use mediaflow_core::AppError;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConfigError(msg) => AppError::Configuration(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Storage abstraction trait
///
/// "Persist this file somewhere reachable by URL." Implemented by the local
/// filesystem and S3 backends.
///
/// **Key format:** `{folder_id}/{filename}` or `{filename}`. See the crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist the file at `source` and return (storage_key, storage_url)
    ///
    /// The storage_key is an internal identifier used to reference the file.
    /// The storage_url is the public URL of the stored object.
    async fn upload_file(
        &self,
        folder_id: Option<Uuid>,
        filename: &str,
        content_type: &str,
        source: &Path,
    ) -> StorageResult<(String, String)>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
