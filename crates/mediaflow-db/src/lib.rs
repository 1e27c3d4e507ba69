//! Mediaflow Database Library
//!
//! Postgres persistence for upload records.

pub mod db;

pub use db::{connect, run_migrations, UploadRepository};
