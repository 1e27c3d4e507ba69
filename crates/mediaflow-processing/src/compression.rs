use crate::error::CodecError;
use crate::metadata::ImageFormatKind;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;

/// Re-encodes decoded images in their source format.
pub struct ImageCompressor;

impl ImageCompressor {
    /// Encode `img` as `format`. `quality` (1-100) applies to lossy formats.
    pub fn encode(
        img: &DynamicImage,
        format: ImageFormatKind,
        quality: u8,
    ) -> Result<Vec<u8>, CodecError> {
        match format {
            ImageFormatKind::Jpeg => Self::compress_jpeg(img, quality),
            ImageFormatKind::Png => Self::compress_png(img),
            ImageFormatKind::Webp => Ok(Self::compress_webp(img, quality)),
            ImageFormatKind::Tiff => Self::write_rgba(img, ImageFormat::Tiff),
            ImageFormatKind::Gif => Self::write_rgba(img, ImageFormat::Gif),
            ImageFormatKind::Svg | ImageFormatKind::Avif => Err(CodecError::UnsupportedFormat(
                format!("no {} encoder available", format.as_str()),
            )),
        }
    }

    /// Compress to JPEG using mozjpeg
    fn compress_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, CodecError> {
        let rgb_img = img.to_rgb8();
        let (width, height) = rgb_img.dimensions();

        let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
        comp.set_size(width as usize, height as usize);
        comp.set_quality(quality as f32);
        comp.set_progressive_mode();
        comp.set_optimize_coding(true);

        let mut comp = comp.start_compress(Vec::new())?;
        comp.write_scanlines(&rgb_img)?;
        let jpeg_data = comp.finish()?;

        Ok(jpeg_data)
    }

    /// Lossless PNG at maximum deflate effort
    fn compress_png(img: &DynamicImage) -> Result<Vec<u8>, CodecError> {
        let mut buffer = Vec::new();
        let encoder =
            PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, PngFilterType::Adaptive);
        img.write_with_encoder(encoder)
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(buffer)
    }

    fn compress_webp(img: &DynamicImage, quality: u8) -> Vec<u8> {
        let (width, height) = img.dimensions();
        let rgba_img = img.to_rgba8();

        let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
        encoder.encode(quality as f32).to_vec()
    }

    fn write_rgba(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, CodecError> {
        let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
        let mut buffer = Vec::new();
        rgba.write_to(&mut Cursor::new(&mut buffer), format)
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(buffer)
    }
}
