//! Test fixtures: generated images and plain files written as incoming uploads.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use mediaflow_processing::IncomingFile;

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 200, 255])
    }))
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    gradient(width, height)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("Failed to encode PNG");
    buffer
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, 95)
        .encode_image(&gradient(width, height).to_rgb8())
        .expect("Failed to encode JPEG");
    buffer
}

/// Minimal PDF, not decodable as an image.
pub fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.4
1 0 obj
<< /Type /Catalog /Pages 2 0 R >>
endobj
2 0 obj
<< /Type /Pages /Kids [] /Count 0 >>
endobj
trailer
<< /Root 1 0 R >>
%%EOF
"
    .to_vec()
}

/// Write `data` into `dir` and describe it as an incoming upload.
pub fn incoming(dir: &Path, name: &str, content_type: &str, data: &[u8]) -> IncomingFile {
    let path = dir.join(format!("upload-{}", name));
    std::fs::write(&path, data).expect("Failed to write incoming file");
    IncomingFile {
        original_name: name.to_string(),
        content_type: content_type.to_string(),
        path,
        size_bytes: data.len() as u64,
    }
}
