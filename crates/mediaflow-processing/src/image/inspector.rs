//! Image Inspector
//!
//! Async front for the codec: classification and corruption checks run on the
//! blocking pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::codec::ImageCodec;
use crate::error::InspectError;
use crate::metadata::ImageMetadata;

#[derive(Clone)]
pub struct ImageInspector {
    codec: Arc<dyn ImageCodec>,
}

impl ImageInspector {
    pub fn new(codec: Arc<dyn ImageCodec>) -> Self {
        Self { codec }
    }

    /// Header-only classification. `InspectError::UnsupportedFormat` is the
    /// expected outcome for non-images.
    pub async fn classify(&self, path: &Path) -> Result<ImageMetadata, InspectError> {
        let codec = Arc::clone(&self.codec);
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || codec.inspect(&path))
            .await
            .map_err(|e| InspectError::Task(e.to_string()))?
    }

    /// Decode the full stream with a re-orientation pass. Any failure means faulty.
    pub async fn is_faulty(&self, path: &Path) -> bool {
        let codec = Arc::clone(&self.codec);
        let owned = path.to_path_buf();
        let result = tokio::task::spawn_blocking(move || codec.probe(&owned)).await;

        match result {
            Ok(Ok(())) => false,
            Ok(Err(e)) => {
                tracing::debug!(path = %path.display(), error = %e, "Image failed decode probe");
                true
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Decode probe task failed");
                true
            }
        }
    }

    pub fn is_image(meta: &ImageMetadata) -> bool {
        meta.format.is_processable()
    }

    pub fn is_resizable(meta: &ImageMetadata) -> bool {
        meta.format.is_resizable()
    }

    pub fn is_optimizable(meta: &ImageMetadata) -> bool {
        meta.format.is_optimizable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageRsCodec;
    use crate::metadata::ImageFormatKind;
    use crate::test_helpers::fixtures;
    use tempfile::tempdir;

    fn inspector() -> ImageInspector {
        ImageInspector::new(Arc::new(ImageRsCodec))
    }

    #[tokio::test]
    async fn test_classify_gif_is_resizable_not_optimizable() {
        let dir = tempdir().unwrap();
        let path = fixtures::write_image(
            dir.path(),
            "anim.gif",
            40,
            30,
            image::ImageFormat::Gif,
        );

        let meta = inspector().classify(&path).await.unwrap();
        assert_eq!(meta.format, ImageFormatKind::Gif);
        assert!(ImageInspector::is_image(&meta));
        assert!(ImageInspector::is_resizable(&meta));
        assert!(!ImageInspector::is_optimizable(&meta));
    }

    #[tokio::test]
    async fn test_classify_pdf_is_unsupported() {
        let dir = tempdir().unwrap();
        let path = fixtures::write_bytes(dir.path(), "doc.pdf", b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n");
        assert!(matches!(
            inspector().classify(&path).await,
            Err(InspectError::UnsupportedFormat)
        ));
    }

    #[tokio::test]
    async fn test_is_faulty() {
        let dir = tempdir().unwrap();
        let good = fixtures::write_png(dir.path(), "good.png", 32, 32);
        let bad = fixtures::write_truncated_jpeg(dir.path(), "bad.jpg", 128, 128);

        assert!(!inspector().is_faulty(&good).await);
        assert!(inspector().is_faulty(&bad).await);
    }
}
