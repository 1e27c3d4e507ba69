//! Traits for the upload pipeline.

use std::path::PathBuf;

use mediaflow_core::Config;

/// Limits and tuning the upload pipeline reads from configuration.
pub trait UploadConfig: Send + Sync {
    fn max_files_per_request(&self) -> usize;
    fn max_file_size(&self) -> u64;
    fn optimize_quality(&self) -> u8;
    /// Directory under which per-file scratch directories are created.
    fn scratch_root(&self) -> PathBuf;
}

impl UploadConfig for Config {
    fn max_files_per_request(&self) -> usize {
        Config::max_files_per_request(self)
    }

    fn max_file_size(&self) -> u64 {
        self.max_file_size_bytes()
    }

    fn optimize_quality(&self) -> u8 {
        self.image_optimize_quality()
    }

    fn scratch_root(&self) -> PathBuf {
        self.upload_tmp_dir()
    }
}
