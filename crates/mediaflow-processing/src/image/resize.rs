use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Largest size with the source aspect ratio that fits inside `max_width` x `max_height`.
    ///
    /// Never upscales: a source already inside the box keeps its dimensions.
    pub fn fit_inside(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
        if width <= max_width && height <= max_height {
            return (width, height);
        }

        let ratio = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
        let new_width = ((width as f64 * ratio).round() as u32).clamp(1, max_width);
        let new_height = ((height as f64 * ratio).round() as u32).clamp(1, max_height);
        (new_width, new_height)
    }

    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            FilterType::Triangle
        } else if max_ratio > 1.5 {
            FilterType::CatmullRom
        } else {
            FilterType::Lanczos3
        }
    }

    /// Fit-inside resize. Returns the image untouched when it already fits.
    pub fn resize_inside(img: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let (width, height) = Self::fit_inside(orig_width, orig_height, max_width, max_height);
        if (width, height) == (orig_width, orig_height) {
            return img;
        }

        let filter = Self::select_filter(orig_width, orig_height, width, height);
        img.resize_exact(width, height, filter)
    }
}
