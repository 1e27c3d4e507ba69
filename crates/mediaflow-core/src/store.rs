//! Metadata store boundary
//!
//! The pipeline persists its assembled records through this trait without
//! depending on a database. `mediaflow-db` provides the Postgres implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUploadRecord, UploadRecord};

#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Persist a record, assigning its id and audit timestamps.
    async fn create_record(&self, record: NewUploadRecord) -> Result<UploadRecord, AppError>;

    /// Fetch a record by id. `Ok(None)` when it does not exist.
    async fn get_record(&self, id: Uuid) -> Result<Option<UploadRecord>, AppError>;
}
