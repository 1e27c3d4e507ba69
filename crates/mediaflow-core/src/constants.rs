//! Defaults shared by configuration and the upload pipeline.

/// URL prefix under which locally stored files are served.
pub const DEFAULT_PUBLIC_STATIC_PATH: &str = "files";

/// Maximum number of files accepted in a single upload batch.
pub const DEFAULT_MAX_FILES_PER_REQUEST: usize = 3;

/// Maximum size of a single uploaded file, in bytes.
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 100_000_000;

/// Quality factor used when re-encoding an optimized master.
pub const DEFAULT_IMAGE_OPTIMIZE_QUALITY: u8 = 80;

/// Prefix of per-upload scratch directories.
pub const SCRATCH_DIR_PREFIX: &str = "mediaflow-upload-";
