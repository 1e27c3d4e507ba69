//! Test helpers: in-memory storage and metadata store, fixture files and a
//! pipeline builder for integration tests.
//!
//! Run with: `cargo test -p mediaflow-processing --test pipeline_test`

#![allow(dead_code)]

pub mod fixtures;
pub mod storage;
pub mod store;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mediaflow_core::MetadataStore;
use mediaflow_processing::{UploadConfig, UploadOrchestrator};
use mediaflow_storage::Storage;
use tempfile::TempDir;

pub use storage::MockStorage;
pub use store::MockMetadataStore;

/// Upload limits for tests; scratch directories go under `scratch_root`.
pub struct TestUploadConfig {
    pub max_files: usize,
    pub max_file_size: u64,
    pub quality: u8,
    pub scratch_root: PathBuf,
}

impl TestUploadConfig {
    pub fn new(scratch_root: &Path) -> Self {
        Self {
            max_files: 3,
            max_file_size: 100_000_000,
            quality: 80,
            scratch_root: scratch_root.to_path_buf(),
        }
    }
}

impl UploadConfig for TestUploadConfig {
    fn max_files_per_request(&self) -> usize {
        self.max_files
    }

    fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    fn optimize_quality(&self) -> u8 {
        self.quality
    }

    fn scratch_root(&self) -> PathBuf {
        self.scratch_root.clone()
    }
}

/// Pipeline with its collaborators and owned temp directories.
pub struct TestPipeline {
    pub orchestrator: UploadOrchestrator,
    pub store: Arc<MockMetadataStore>,
    /// Where the test writes incoming files
    pub inbox: TempDir,
    pub scratch: TempDir,
}

impl TestPipeline {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_config(storage, |_| {})
    }

    pub fn with_config(storage: Arc<dyn Storage>, tweak: impl FnOnce(&mut TestUploadConfig)) -> Self {
        let inbox = tempfile::tempdir().expect("Failed to create inbox directory");
        let scratch = tempfile::tempdir().expect("Failed to create scratch directory");
        let mut config = TestUploadConfig::new(scratch.path());
        tweak(&mut config);

        let store = Arc::new(MockMetadataStore::new());
        let orchestrator = UploadOrchestrator::with_default_codec(
            &config,
            storage,
            store.clone() as Arc<dyn MetadataStore>,
        );

        Self {
            orchestrator,
            store,
            inbox,
            scratch,
        }
    }

    /// Scratch directories still present under the scratch root.
    pub fn leftover_scratch_dirs(&self) -> usize {
        std::fs::read_dir(self.scratch.path())
            .expect("Failed to read scratch root")
            .count()
    }
}
