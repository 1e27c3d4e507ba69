use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Frame, ImageFormat, Rgba, RgbaImage};

/// Gradient so encoders cannot collapse the image to a trivial stream.
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    }))
}

pub fn write_bytes(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}

pub fn write_image(dir: &Path, name: &str, width: u32, height: u32, format: ImageFormat) -> PathBuf {
    let mut buffer = Vec::new();
    gradient(width, height)
        .write_to(&mut Cursor::new(&mut buffer), format)
        .unwrap();
    write_bytes(dir, name, &buffer)
}

pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    write_image(dir, name, width, height, ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    let rgb = gradient(width, height).to_rgb8();
    JpegEncoder::new_with_quality(&mut buffer, 95)
        .encode_image(&rgb)
        .unwrap();
    buffer
}

pub fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    write_bytes(dir, name, &jpeg_bytes(width, height))
}

/// A JPEG cut off after two thirds of its bytes: header intact, scan data incomplete.
pub fn write_truncated_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let data = jpeg_bytes(width, height);
    write_bytes(dir, name, &data[..data.len() * 2 / 3])
}

/// Two-frame GIF; the second frame is the first one mirrored.
pub fn animated_gif_bytes(width: u32, height: u32) -> Vec<u8> {
    let first = gradient(width, height).to_rgba8();
    let second = image::imageops::flip_horizontal(&first);

    let mut buffer = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buffer);
        encoder
            .encode_frames(vec![Frame::new(first), Frame::new(second)])
            .unwrap();
    }
    buffer
}
