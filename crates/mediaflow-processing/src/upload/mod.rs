//! Upload pipeline: staging, variant generation and orchestration.

pub mod naming;
pub mod orchestrator;
pub mod traits;
pub mod types;
pub mod variants;

pub use orchestrator::UploadOrchestrator;
pub use traits::UploadConfig;
pub use types::{IncomingFile, StagedFile, VariantSet};
pub use variants::{Breakpoint, VariantGenerator, VariantSettings};
