#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::{s3::S3Settings, S3Storage};
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use mediaflow_core::Config;
use std::sync::Arc;

fn required(value: Option<&str>, name: &str) -> StorageResult<String> {
    value
        .map(String::from)
        .ok_or_else(|| StorageError::ConfigError(format!("{} not configured", name)))
}

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let storage = S3Storage::new(S3Settings {
                bucket: required(config.aws_bucket_name(), "AWS_BUCKET_NAME")?,
                region: required(config.aws_region(), "AWS_REGION")?,
                access_key_id: required(config.aws_access_key(), "AWS_ACCESS_KEY")?,
                secret_access_key: required(
                    config.aws_secret_access_key(),
                    "AWS_SECRET_ACCESS_KEY",
                )?,
                endpoint_url: config.s3_endpoint().map(String::from),
            })?;

            tracing::info!(
                bucket = ?config.aws_bucket_name(),
                region = ?config.aws_region(),
                "Using S3 storage backend"
            );
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = required(config.local_upload_path(), "UPLOAD_PATH")?;
            let storage =
                LocalStorage::new(base_path, config.public_static_path().to_string()).await?;

            tracing::info!(
                path = %storage.base_path().display(),
                "Using local storage backend"
            );
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
