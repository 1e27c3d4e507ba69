use mediaflow_core::AppError;

use crate::upload::IncomingFile;

/// Batch validation errors, raised before any processing starts
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Files are empty")]
    EmptyBatch,

    #[error("Too many files: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("File too large: {name} is {size} bytes (max: {max} bytes)")]
    FileTooLarge { name: String, size: u64, max: u64 },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyBatch => AppError::EmptyBatch,
            ValidationError::TooManyFiles { count, max } => AppError::TooManyFiles { count, max },
            ValidationError::FileTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            ValidationError::InvalidFilename(_) => AppError::InvalidInput(err.to_string()),
        }
    }
}

/// Upload batch validator
pub struct MediaValidator {
    max_files: usize,
    max_file_size: u64,
}

impl MediaValidator {
    pub fn new(max_files: usize, max_file_size: u64) -> Self {
        Self {
            max_files,
            max_file_size,
        }
    }

    pub fn validate_batch_size(&self, count: usize) -> Result<(), ValidationError> {
        if count == 0 {
            return Err(ValidationError::EmptyBatch);
        }
        if count > self.max_files {
            return Err(ValidationError::TooManyFiles {
                count,
                max: self.max_files,
            });
        }
        Ok(())
    }

    pub fn validate_file(&self, file: &IncomingFile) -> Result<(), ValidationError> {
        if file.original_name.trim().is_empty() {
            return Err(ValidationError::InvalidFilename(
                "filename must not be empty".to_string(),
            ));
        }
        if file.size_bytes > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                name: file.original_name.clone(),
                size: file.size_bytes,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Validate the whole batch: count first, then every file.
    pub fn validate_all(&self, files: &[IncomingFile]) -> Result<(), ValidationError> {
        self.validate_batch_size(files.len())?;
        files.iter().try_for_each(|file| self.validate_file(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(name: &str, size_bytes: u64) -> IncomingFile {
        IncomingFile {
            original_name: name.to_string(),
            content_type: "image/png".to_string(),
            path: PathBuf::from("/tmp/x"),
            size_bytes,
        }
    }

    #[test]
    fn test_empty_batch() {
        let validator = MediaValidator::new(3, 100);
        assert!(matches!(
            validator.validate_all(&[]),
            Err(ValidationError::EmptyBatch)
        ));
    }

    #[test]
    fn test_too_many_files() {
        let validator = MediaValidator::new(3, 100);
        let files: Vec<_> = (0..4).map(|i| file(&format!("{}.png", i), 1)).collect();
        let err = validator.validate_all(&files).unwrap_err();
        assert!(matches!(err, ValidationError::TooManyFiles { count: 4, max: 3 }));
        assert!(matches!(
            AppError::from(err),
            AppError::TooManyFiles { count: 4, max: 3 }
        ));
    }

    #[test]
    fn test_file_too_large() {
        let validator = MediaValidator::new(3, 100);
        let err = validator
            .validate_all(&[file("ok.png", 100), file("big.png", 101)])
            .unwrap_err();
        assert!(err.to_string().contains("big.png"));
        assert!(matches!(AppError::from(err), AppError::PayloadTooLarge(_)));
    }

    #[test]
    fn test_blank_filename_rejected() {
        let validator = MediaValidator::new(3, 100);
        assert!(matches!(
            validator.validate_file(&file("  ", 1)),
            Err(ValidationError::InvalidFilename(_))
        ));
    }

    #[test]
    fn test_valid_batch() {
        let validator = MediaValidator::new(3, 100);
        assert!(validator
            .validate_all(&[file("a.png", 1), file("b.txt", 0)])
            .is_ok());
    }
}
