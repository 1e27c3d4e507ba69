//! In-memory metadata store for tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use mediaflow_core::{AppError, MetadataStore, NewUploadRecord, UploadRecord};
use uuid::Uuid;

#[derive(Default)]
pub struct MockMetadataStore {
    records: Mutex<HashMap<Uuid, UploadRecord>>,
}

impl MockMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl MetadataStore for MockMetadataStore {
    async fn create_record(&self, record: NewUploadRecord) -> Result<UploadRecord, AppError> {
        let record = UploadRecord::from_new(Uuid::new_v4(), record, Utc::now());
        self.records
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_record(&self, id: Uuid) -> Result<Option<UploadRecord>, AppError> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }
}
