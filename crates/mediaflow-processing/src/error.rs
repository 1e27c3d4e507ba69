//! Processing errors
//!
//! `InspectError` is returned by classification and is expected for
//! non-images. `CodecError` covers decode/encode failures of the codec.

use mediaflow_core::AppError;

#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    /// The codec does not recognize the content. Not a failure: the file is
    /// handled as a non-image.
    #[error("Unsupported format")]
    UnsupportedFormat,

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Inspection task failed: {0}")]
    Task(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Decode failed: {0}")]
    Decode(String),

    #[error("Encode failed: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Codec task failed: {0}")]
    Task(String),
}

impl From<InspectError> for AppError {
    fn from(err: InspectError) -> Self {
        AppError::ImageProcessing(err.to_string())
    }
}

impl From<CodecError> for AppError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Io(e) => AppError::Internal(format!("IO error: {}", e)),
            other => AppError::ImageProcessing(other.to_string()),
        }
    }
}
