//! Database repositories and setup
//!
//! `UploadRepository` is the Postgres implementation of the metadata store.
//! Migrations live in the crate's `migrations/` directory and are embedded at
//! compile time.

pub mod setup;
pub mod upload;

pub use setup::{connect, run_migrations};
pub use upload::UploadRepository;
