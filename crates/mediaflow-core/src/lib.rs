//! Mediaflow Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! metadata store boundary shared by all mediaflow components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod store;

// Re-export commonly used types
pub use config::{Config, MediaflowConfig, StorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{FormatEntry, Formats, NewUploadRecord, UploadRecord};
pub use storage_types::StorageBackend;
pub use store::MetadataStore;
