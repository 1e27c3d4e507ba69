//! Variant Generator
//!
//! Produces the optimized master, the thumbnail and the responsive breakpoint
//! variants of a staged image. Every output is a new file in the scratch
//! directory of its source; the source is never modified.

use std::path::Path;
use std::sync::Arc;

use futures::future::join_all;

use super::naming::{bytes_to_kbytes, variant_identifier};
use super::types::{StagedFile, VariantSet};
use crate::error::CodecError;
use crate::image::{ImageCodec, ImageInspector};
use crate::metadata::ImageMetadata;
use mediaflow_core::constants::DEFAULT_IMAGE_OPTIMIZE_QUALITY;

pub const THUMBNAIL_KEY: &str = "thumbnail";
pub const THUMBNAIL_MAX_WIDTH: u32 = 245;
pub const THUMBNAIL_MAX_HEIGHT: u32 = 156;

/// A responsive breakpoint: a square fit-inside box named after its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoint {
    pub name: String,
    pub size: u32,
}

impl Breakpoint {
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Only breakpoints strictly smaller than the source in one dimension apply.
    pub fn applies_to(&self, width: u32, height: u32) -> bool {
        self.size < width || self.size < height
    }
}

pub fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint::new("xlarge", 1920),
        Breakpoint::new("large", 1000),
        Breakpoint::new("medium", 750),
        Breakpoint::new("small", 500),
        Breakpoint::new("xsmall", 64),
    ]
}

#[derive(Debug, Clone)]
pub struct VariantSettings {
    pub thumbnail: (u32, u32),
    pub breakpoints: Vec<Breakpoint>,
    pub quality: u8,
}

impl Default for VariantSettings {
    fn default() -> Self {
        Self {
            thumbnail: (THUMBNAIL_MAX_WIDTH, THUMBNAIL_MAX_HEIGHT),
            breakpoints: default_breakpoints(),
            quality: DEFAULT_IMAGE_OPTIMIZE_QUALITY,
        }
    }
}

#[derive(Clone)]
pub struct VariantGenerator {
    codec: Arc<dyn ImageCodec>,
    inspector: ImageInspector,
    settings: VariantSettings,
}

impl VariantGenerator {
    pub fn new(codec: Arc<dyn ImageCodec>, settings: VariantSettings) -> Self {
        Self {
            inspector: ImageInspector::new(Arc::clone(&codec)),
            codec,
            settings,
        }
    }

    pub fn settings(&self) -> &VariantSettings {
        &self.settings
    }

    async fn run_codec<T, F>(&self, op: F) -> Result<T, CodecError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn ImageCodec) -> Result<T, CodecError> + Send + 'static,
    {
        let codec = Arc::clone(&self.codec);
        tokio::task::spawn_blocking(move || op(codec.as_ref()))
            .await
            .map_err(|e| CodecError::Task(e.to_string()))?
    }

    async fn inspect_output(&self, path: &Path) -> Result<ImageMetadata, CodecError> {
        self.inspector
            .classify(path)
            .await
            .map_err(|e| CodecError::Decode(format!("{}: {}", path.display(), e)))
    }

    /// Re-encode at the configured quality with EXIF re-orientation into
    /// `optimized-{hash}`. Returns `file` unchanged when the output is not smaller.
    pub async fn optimize(&self, file: &StagedFile) -> Result<StagedFile, CodecError> {
        let src = file.path.clone();
        let dst = file.scratch_dir.join(format!("optimized-{}", file.hash));
        let quality = self.settings.quality;

        let start = std::time::Instant::now();
        {
            let (src, dst) = (src.clone(), dst.clone());
            self.run_codec(move |codec| codec.optimize(&src, &dst, quality))
                .await?;
        }

        let old_size = tokio::fs::metadata(&src).await?.len();
        let new_size = tokio::fs::metadata(&dst).await?.len();

        if new_size >= old_size {
            tracing::debug!(
                hash = %file.hash,
                old_size_bytes = old_size,
                new_size_bytes = new_size,
                "Optimization did not reduce size, keeping original"
            );
            return Ok(file.clone());
        }

        let meta = self.inspect_output(&dst).await?;

        tracing::debug!(
            hash = %file.hash,
            old_size_bytes = old_size,
            new_size_bytes = new_size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Image optimized"
        );

        Ok(StagedFile {
            path: dst,
            size: bytes_to_kbytes(new_size),
            width: Some(meta.width),
            height: Some(meta.height),
            ..file.clone()
        })
    }

    /// Fit-inside resize into `{variant}_{hash}` next to the source.
    pub async fn resize_to(
        &self,
        file: &StagedFile,
        max_width: u32,
        max_height: u32,
        variant: &str,
    ) -> Result<StagedFile, CodecError> {
        let hash = variant_identifier(variant, &file.hash);
        let src = file.path.clone();
        let dst = file.scratch_dir.join(&hash);
        let quality = self.settings.quality;

        {
            let (src, dst) = (src, dst.clone());
            self.run_codec(move |codec| {
                codec.resize_inside(&src, &dst, max_width, max_height, quality)
            })
            .await?;
        }

        let meta = self.inspect_output(&dst).await?;

        Ok(StagedFile {
            name: variant_identifier(variant, &file.name),
            hash,
            path: dst,
            size: bytes_to_kbytes(meta.size_bytes),
            width: Some(meta.width),
            height: Some(meta.height),
            ..file.clone()
        })
    }

    /// Thumbnail only when the source exceeds the thumbnail box in either dimension.
    pub async fn thumbnail(&self, file: &StagedFile) -> Result<Option<StagedFile>, CodecError> {
        let (max_width, max_height) = self.settings.thumbnail;
        let (Some(width), Some(height)) = (file.width, file.height) else {
            return Ok(None);
        };

        if width <= max_width && height <= max_height {
            return Ok(None);
        }

        self.resize_to(file, max_width, max_height, THUMBNAIL_KEY)
            .await
            .map(Some)
    }

    /// Every applicable breakpoint, generated concurrently.
    pub async fn responsive_formats(&self, file: &StagedFile) -> Result<VariantSet, CodecError> {
        let (Some(width), Some(height)) = (file.width, file.height) else {
            return Ok(VariantSet::new());
        };

        let targets: Vec<&Breakpoint> = self
            .settings
            .breakpoints
            .iter()
            .filter(|bp| bp.applies_to(width, height))
            .collect();

        let results = join_all(targets.iter().map(|bp| async move {
            self.resize_to(file, bp.size, bp.size, &bp.name)
                .await
                .map(|variant| (bp.name.clone(), variant))
        }))
        .await;

        results.into_iter().collect()
    }

    /// Thumbnail and breakpoints together, keyed by variant name.
    pub async fn generate(&self, file: &StagedFile) -> Result<VariantSet, CodecError> {
        let (thumbnail, formats) = tokio::join!(self.thumbnail(file), self.responsive_formats(file));

        let mut variants = formats?;
        if let Some(thumbnail) = thumbnail? {
            variants.insert(THUMBNAIL_KEY, thumbnail);
        }
        Ok(variants)
    }
}
