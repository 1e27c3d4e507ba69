//! Configuration module
//!
//! Configuration is read from the environment (optionally seeded from a `.env`
//! file). Storage settings are validated when the configuration is loaded, so a
//! misconfigured backend fails at startup instead of on the first upload.

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_IMAGE_OPTIMIZE_QUALITY, DEFAULT_MAX_FILES_PER_REQUEST, DEFAULT_MAX_FILE_SIZE_BYTES,
    DEFAULT_PUBLIC_STATIC_PATH,
};
use crate::storage_types::StorageBackend;

const DB_MAX_CONNECTIONS: u32 = 10;
const DB_TIMEOUT_SECS: u64 = 30;

/// Storage provider settings
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub local_upload_path: Option<String>,
    pub public_static_path: String,
    pub aws_access_key: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_region: Option<String>,
    pub aws_bucket_name: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
}

/// Full mediaflow configuration
#[derive(Clone, Debug)]
pub struct MediaflowConfig {
    pub environment: String,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub storage: StorageConfig,
    // Upload pipeline configuration
    pub max_files_per_request: usize,
    pub max_file_size_bytes: u64,
    pub image_optimize_quality: u8,
    pub upload_tmp_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<MediaflowConfig>);

impl Config {
    fn inner(&self) -> &MediaflowConfig {
        &self.0
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup (environment, test maps).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = MediaflowConfig::from_lookup(lookup)?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn is_production(&self) -> bool {
        matches!(
            self.inner().environment.to_lowercase().as_str(),
            "production" | "prod"
        )
    }

    pub fn environment(&self) -> &str {
        &self.inner().environment
    }

    pub fn database_url(&self) -> Option<&str> {
        self.inner().database_url.as_deref()
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().db_timeout_seconds
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.inner().storage
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage.backend
    }

    pub fn local_upload_path(&self) -> Option<&str> {
        self.inner().storage.local_upload_path.as_deref()
    }

    pub fn public_static_path(&self) -> &str {
        &self.inner().storage.public_static_path
    }

    pub fn aws_access_key(&self) -> Option<&str> {
        self.inner().storage.aws_access_key.as_deref()
    }

    pub fn aws_secret_access_key(&self) -> Option<&str> {
        self.inner().storage.aws_secret_access_key.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.inner().storage.aws_region.as_deref()
    }

    pub fn aws_bucket_name(&self) -> Option<&str> {
        self.inner().storage.aws_bucket_name.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().storage.s3_endpoint.as_deref()
    }

    pub fn max_files_per_request(&self) -> usize {
        self.inner().max_files_per_request
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.inner().max_file_size_bytes
    }

    pub fn image_optimize_quality(&self) -> u8 {
        self.inner().image_optimize_quality
    }

    pub fn upload_tmp_dir(&self) -> PathBuf {
        self.inner()
            .upload_tmp_dir
            .clone()
            .unwrap_or_else(env::temp_dir)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse `key` when set, otherwise use `default`. A value that does not parse is an error.
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup(key)) {
        Some(value) => value
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a number, got {:?}", key, value)),
        None => Ok(default),
    }
}

impl MediaflowConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match non_empty(lookup("UPLOAD_PROVIDER")) {
            Some(provider) => provider.parse()?,
            None => StorageBackend::Local,
        };

        let config = MediaflowConfig {
            environment: non_empty(lookup("ENVIRONMENT"))
                .unwrap_or_else(|| "development".to_string()),
            database_url: non_empty(lookup("DATABASE_URL")),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DB_MAX_CONNECTIONS)?,
            db_timeout_seconds: parse_or(&lookup, "DB_TIMEOUT_SECONDS", DB_TIMEOUT_SECS)?,
            storage: StorageConfig {
                backend,
                local_upload_path: non_empty(lookup("UPLOAD_PATH")),
                public_static_path: non_empty(lookup("PUBLIC_STATIC_PATH"))
                    .unwrap_or_else(|| DEFAULT_PUBLIC_STATIC_PATH.to_string()),
                aws_access_key: non_empty(lookup("AWS_ACCESS_KEY")),
                aws_secret_access_key: non_empty(lookup("AWS_SECRET_ACCESS_KEY")),
                aws_region: non_empty(lookup("AWS_REGION")),
                aws_bucket_name: non_empty(lookup("AWS_BUCKET_NAME")),
                s3_endpoint: non_empty(lookup("S3_ENDPOINT")),
            },
            max_files_per_request: parse_or(
                &lookup,
                "MAX_FILES_PER_REQUEST",
                DEFAULT_MAX_FILES_PER_REQUEST,
            )?,
            max_file_size_bytes: parse_or(
                &lookup,
                "MAX_FILE_SIZE_BYTES",
                DEFAULT_MAX_FILE_SIZE_BYTES,
            )?,
            image_optimize_quality: parse_or(
                &lookup,
                "IMAGE_OPTIMIZE_QUALITY",
                DEFAULT_IMAGE_OPTIMIZE_QUALITY,
            )?,
            upload_tmp_dir: non_empty(lookup("UPLOAD_TMP_DIR")).map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if let Some(url) = &self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
        }

        if self.max_files_per_request == 0 {
            return Err(anyhow::anyhow!("MAX_FILES_PER_REQUEST must be at least 1"));
        }

        if !(1..=100).contains(&self.image_optimize_quality) {
            return Err(anyhow::anyhow!(
                "IMAGE_OPTIMIZE_QUALITY must be between 1 and 100"
            ));
        }

        // Validate storage backend configuration
        match self.storage.backend {
            StorageBackend::Local => {
                if self.storage.local_upload_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "UPLOAD_PATH must be set when using local storage backend"
                    ));
                }
            }
            StorageBackend::S3 => {
                let required = [
                    ("AWS_ACCESS_KEY", &self.storage.aws_access_key),
                    ("AWS_SECRET_ACCESS_KEY", &self.storage.aws_secret_access_key),
                    ("AWS_REGION", &self.storage.aws_region),
                    ("AWS_BUCKET_NAME", &self.storage.aws_bucket_name),
                ];
                for (name, value) in required {
                    if value.is_none() {
                        return Err(anyhow::anyhow!(
                            "{} must be set when using remote storage backend",
                            name
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}
