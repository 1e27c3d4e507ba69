//! Mediaflow Processing Library
//!
//! The media transformation pipeline: image inspection behind a codec
//! capability, optimized master and variant generation, and the upload
//! orchestrator that stores everything and records the result.

pub mod compression;
pub mod error;
pub mod image;
pub mod metadata;
pub mod upload;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use compression::ImageCompressor;
pub use error::{CodecError, InspectError};
pub use image::{ImageCodec, ImageInspector, ImageOrientation, ImageResize, ImageRsCodec};
pub use metadata::{ImageFormatKind, ImageMetadata};
pub use upload::{
    Breakpoint, IncomingFile, StagedFile, UploadConfig, UploadOrchestrator, VariantGenerator,
    VariantSet, VariantSettings,
};
pub use validator::{MediaValidator, ValidationError};
