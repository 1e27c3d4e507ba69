//! Mediaflow Storage Library
//!
//! Storage abstraction and its two providers: local filesystem and S3-compatible
//! object storage. The provider is chosen once from configuration and used for
//! the master file and every derived variant.
//!
//! # Storage key format
//!
//! - **Owned uploads**: `{folder_id}/{filename}`
//! - **Unscoped uploads**: `{filename}`
//!
//! Keys must not contain `..` or a leading `/`. Key generation lives in the
//! `keys` module so all backends stay consistent.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use mediaflow_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
