//! Test helpers for unit tests
//!
//! Fixture images are generated with the `image` crate and written into the
//! caller's temp directory.

pub mod fixtures;
