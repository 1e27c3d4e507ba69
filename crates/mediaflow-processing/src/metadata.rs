//! Image metadata types

use image::ImageFormat;
use serde::{Deserialize, Serialize};

/// Formats the pipeline knows how to treat as images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormatKind {
    Jpeg,
    Png,
    Webp,
    Tiff,
    Gif,
    Svg,
    Avif,
}

impl ImageFormatKind {
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(ImageFormatKind::Jpeg),
            ImageFormat::Png => Some(ImageFormatKind::Png),
            ImageFormat::WebP => Some(ImageFormatKind::Webp),
            ImageFormat::Tiff => Some(ImageFormatKind::Tiff),
            ImageFormat::Gif => Some(ImageFormatKind::Gif),
            ImageFormat::Avif => Some(ImageFormatKind::Avif),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormatKind::Jpeg => "jpeg",
            ImageFormatKind::Png => "png",
            ImageFormatKind::Webp => "webp",
            ImageFormatKind::Tiff => "tiff",
            ImageFormatKind::Gif => "gif",
            ImageFormatKind::Svg => "svg",
            ImageFormatKind::Avif => "avif",
        }
    }

    /// Every known format is processed as an image.
    pub fn is_processable(self) -> bool {
        true
    }

    pub fn is_resizable(self) -> bool {
        matches!(
            self,
            ImageFormatKind::Jpeg
                | ImageFormatKind::Png
                | ImageFormatKind::Webp
                | ImageFormatKind::Tiff
                | ImageFormatKind::Gif
        )
    }

    pub fn is_optimizable(self) -> bool {
        matches!(
            self,
            ImageFormatKind::Jpeg
                | ImageFormatKind::Png
                | ImageFormatKind::Webp
                | ImageFormatKind::Tiff
                | ImageFormatKind::Avif
        )
    }
}

/// Header-level image metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub format: ImageFormatKind,
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tiers() {
        assert!(ImageFormatKind::Gif.is_resizable());
        assert!(!ImageFormatKind::Gif.is_optimizable());
        assert!(ImageFormatKind::Avif.is_optimizable());
        assert!(!ImageFormatKind::Avif.is_resizable());
        assert!(!ImageFormatKind::Svg.is_resizable());
        assert!(!ImageFormatKind::Svg.is_optimizable());
        assert!(ImageFormatKind::Svg.is_processable());
    }

    #[test]
    fn test_from_image_format() {
        assert_eq!(
            ImageFormatKind::from_image_format(ImageFormat::WebP),
            Some(ImageFormatKind::Webp)
        );
        assert_eq!(ImageFormatKind::from_image_format(ImageFormat::Bmp), None);
    }

    #[test]
    fn test_image_metadata_serialization() {
        let metadata = ImageMetadata {
            format: ImageFormatKind::Jpeg,
            width: 1920,
            height: 1080,
            size_bytes: 1_024_000,
        };

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["format"], "jpeg");
        assert_eq!(json["width"], 1920);
    }
}
