//! Image codec capability
//!
//! The pipeline never touches pixels directly. Everything it needs from a codec
//! (header inspection, full decode probe, re-encode, fit-inside resize) goes
//! through [`ImageCodec`]. Implementations are synchronous and path based; async
//! callers run them on the blocking pool.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, ImageReader};

use super::orientation::ImageOrientation;
use super::resize::ImageResize;
use crate::compression::ImageCompressor;
use crate::error::{CodecError, InspectError};
use crate::metadata::{ImageFormatKind, ImageMetadata};

pub trait ImageCodec: Send + Sync {
    /// Read format, dimensions and byte size from the header only.
    fn inspect(&self, path: &Path) -> Result<ImageMetadata, InspectError>;

    /// Decode the whole stream and apply re-orientation, discarding the output.
    fn probe(&self, path: &Path) -> Result<(), CodecError>;

    /// Auto-orient and re-encode `src` in its own format at `quality` into `dst`.
    fn optimize(&self, src: &Path, dst: &Path, quality: u8) -> Result<(), CodecError>;

    /// Auto-orient and fit `src` inside `max_width` x `max_height` into `dst`.
    /// Returns the written dimensions.
    fn resize_inside(
        &self,
        src: &Path,
        dst: &Path,
        max_width: u32,
        max_height: u32,
        quality: u8,
    ) -> Result<(u32, u32), CodecError>;
}

/// [`ImageCodec`] backed by the `image` crate, mozjpeg and libwebp.
///
/// Decodes JPEG, PNG, WebP, TIFF and GIF. AVIF and SVG are not decoded and
/// therefore classified as unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRsCodec;

struct Decoded {
    image: DynamicImage,
    format: ImageFormatKind,
}

impl ImageRsCodec {
    fn decode(data: &[u8]) -> Result<Decoded, CodecError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(CodecError::Io)?;
        let format = reader
            .format()
            .and_then(ImageFormatKind::from_image_format)
            .ok_or_else(|| CodecError::UnsupportedFormat("unrecognized image data".to_string()))?;

        let image = reader
            .decode()
            .map_err(|e| CodecError::Decode(e.to_string()))?;

        if format == ImageFormatKind::Jpeg && !jpeg_scan_is_terminated(data) {
            return Err(CodecError::Decode(
                "JPEG stream ends before the end-of-image marker".to_string(),
            ));
        }

        let image = ImageOrientation::apply_exif_orientation(image, data);
        Ok(Decoded { image, format })
    }
}

/// Offset of the first start-of-scan marker, found by walking the header segments.
///
/// Segment payloads are skipped by their length field, so markers embedded in
/// EXIF thumbnails are never mistaken for the main stream.
fn jpeg_scan_start(data: &[u8]) -> Option<usize> {
    if data.get(..2) != Some(&[0xFF, 0xD8]) {
        return None;
    }

    let mut pos = 2;
    loop {
        if *data.get(pos)? != 0xFF {
            return None;
        }
        // fill bytes
        while *data.get(pos + 1)? == 0xFF {
            pos += 1;
        }
        match data[pos + 1] {
            0xDA => return Some(pos),
            0x01 | 0xD0..=0xD7 => pos += 2,
            _ => {
                let len = u16::from_be_bytes([*data.get(pos + 2)?, *data.get(pos + 3)?]);
                pos += 2 + len as usize;
            }
        }
    }
}

/// A complete JPEG has an EOI marker (FF D9) somewhere after its first scan.
/// Bytes after EOI (motion photo trailers, vendor blocks) are allowed.
fn jpeg_scan_is_terminated(data: &[u8]) -> bool {
    jpeg_scan_start(data)
        .map(|start| data[start..].windows(2).any(|w| w == [0xFF, 0xD9]))
        .unwrap_or(false)
}

/// Read every frame of a GIF; `ImageReader::decode` stops after the first one.
fn decode_gif_frames(data: &[u8]) -> Result<(), CodecError> {
    GifDecoder::new(Cursor::new(data))
        .and_then(|decoder| decoder.into_frames().collect_frames())
        .map(|_| ())
        .map_err(|e| CodecError::Decode(e.to_string()))
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> InspectError + '_ {
    move |source| InspectError::Io {
        path: path.display().to_string(),
        source,
    }
}

impl ImageCodec for ImageRsCodec {
    fn inspect(&self, path: &Path) -> Result<ImageMetadata, InspectError> {
        let size_bytes = fs::metadata(path).map_err(io_error(path))?.len();

        let reader = ImageReader::open(path)
            .map_err(io_error(path))?
            .with_guessed_format()
            .map_err(io_error(path))?;

        let format = reader
            .format()
            .and_then(ImageFormatKind::from_image_format)
            .ok_or(InspectError::UnsupportedFormat)?;

        let (width, height) = reader
            .into_dimensions()
            .map_err(|_| InspectError::UnsupportedFormat)?;

        Ok(ImageMetadata {
            format,
            width,
            height,
            size_bytes,
        })
    }

    fn probe(&self, path: &Path) -> Result<(), CodecError> {
        let data = fs::read(path)?;
        let decoded = Self::decode(&data)?;
        if decoded.format == ImageFormatKind::Gif {
            decode_gif_frames(&data)?;
        }
        Ok(())
    }

    fn optimize(&self, src: &Path, dst: &Path, quality: u8) -> Result<(), CodecError> {
        let data = fs::read(src)?;
        let decoded = Self::decode(&data)?;
        let encoded = ImageCompressor::encode(&decoded.image, decoded.format, quality)?;
        fs::write(dst, encoded)?;
        Ok(())
    }

    fn resize_inside(
        &self,
        src: &Path,
        dst: &Path,
        max_width: u32,
        max_height: u32,
        quality: u8,
    ) -> Result<(u32, u32), CodecError> {
        let data = fs::read(src)?;
        let decoded = Self::decode(&data)?;
        let resized = ImageResize::resize_inside(decoded.image, max_width, max_height);
        let dimensions = (resized.width(), resized.height());
        let encoded = ImageCompressor::encode(&resized, decoded.format, quality)?;
        fs::write(dst, encoded)?;
        Ok(dimensions)
    }
}
