//! Identifier and naming rules for staged files.

use std::path::Path;

/// Bytes to kilobytes, rounded to 2 decimals.
pub fn bytes_to_kbytes(bytes: u64) -> f64 {
    (bytes as f64 / 1000.0 * 100.0).round() / 100.0
}

/// 5 random bytes, hex encoded.
pub fn random_suffix() -> String {
    hex::encode(rand::random::<[u8; 5]>())
}

/// Lowercase ASCII slug: alphanumerics kept, every other run collapsed into one `-`.
pub fn name_to_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "file".to_string()
    } else {
        slug.to_string()
    }
}

/// Master identifier: `{slug(basename)}_{random}{ext}`.
pub fn generate_file_name(basename: &str, ext: &str) -> String {
    let mut filename = format!("{}_{}", name_to_slug(basename), random_suffix());
    if !filename.ends_with(ext) {
        filename.push_str(ext);
    }
    filename
}

/// Identifier of a derived variant: `{variant}_{master}`.
pub fn variant_identifier(variant: &str, master: &str) -> String {
    format!("{}_{}", variant, master)
}

/// Extension (with leading dot) from the original filename, falling back to the MIME type.
pub fn resolve_extension(original_name: &str, content_type: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e))
        .or_else(|| extension_for_mime(content_type).map(|e| format!(".{}", e)))
        .unwrap_or_default()
}

/// File name without directories and without `ext`.
pub fn basename(name: &str, ext: &str) -> String {
    let file_name = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name);
    file_name
        .strip_suffix(ext)
        .filter(|_| !ext.is_empty())
        .unwrap_or(file_name)
        .to_string()
}

pub fn extension_for_mime(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    let ext = match essence.as_str() {
        "image/jpeg" | "image/jpg" => "jpeg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/tiff" => "tif",
        "image/gif" => "gif",
        "image/svg+xml" => "svg",
        "image/avif" => "avif",
        "image/bmp" => "bmp",
        "application/pdf" => "pdf",
        "text/plain" => "txt",
        "text/csv" => "csv",
        "application/json" => "json",
        "application/zip" => "zip",
        "video/mp4" => "mp4",
        "audio/mpeg" => "mp3",
        _ => return None,
    };
    Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_kbytes() {
        assert_eq!(bytes_to_kbytes(10), 0.01);
        assert_eq!(bytes_to_kbytes(1234), 1.23);
        assert_eq!(bytes_to_kbytes(0), 0.0);
    }

    #[test]
    fn test_name_to_slug() {
        assert_eq!(name_to_slug("My Holiday Photo"), "my-holiday-photo");
        assert_eq!(name_to_slug("  __x__  "), "x");
        assert_eq!(name_to_slug("日本"), "file");
    }

    #[test]
    fn test_generate_file_name() {
        let name = generate_file_name("My Photo", ".png");
        assert!(name.starts_with("my-photo_"));
        assert!(name.ends_with(".png"));
        // slug + '_' + 10 hex chars + ext
        assert_eq!(name.len(), "my-photo_".len() + 10 + ".png".len());
    }

    #[test]
    fn test_generate_file_name_is_unique() {
        assert_ne!(generate_file_name("a", ".txt"), generate_file_name("a", ".txt"));
    }

    #[test]
    fn test_resolve_extension() {
        assert_eq!(resolve_extension("photo.JPG", "image/jpeg"), ".JPG");
        assert_eq!(resolve_extension("photo", "image/png"), ".png");
        assert_eq!(resolve_extension("blob", "application/x-unknown"), "");
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("dir/photo.png", ".png"), "photo");
        assert_eq!(basename("photo", ""), "photo");
    }

    #[test]
    fn test_variant_identifier() {
        assert_eq!(variant_identifier("small", "cat_0a1b2c3d4e.png"), "small_cat_0a1b2c3d4e.png");
    }
}
