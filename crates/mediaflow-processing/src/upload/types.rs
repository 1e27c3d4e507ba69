//! Types for the upload pipeline.

use std::collections::btree_map::{self, BTreeMap};
use std::path::{Path, PathBuf};

use mediaflow_core::FormatEntry;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use super::naming::{basename, bytes_to_kbytes, generate_file_name, resolve_extension};

/// A file handed over by the ingestion boundary, already materialized on disk.
#[derive(Clone, Debug)]
pub struct IncomingFile {
    pub original_name: String,
    pub content_type: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// A file moving through the pipeline.
///
/// Stages never mutate a `StagedFile`; optimization and resizing return new values.
#[derive(Clone, Debug, PartialEq)]
pub struct StagedFile {
    pub name: String,
    /// Content identifier, also the stored object name
    pub hash: String,
    pub ext: String,
    pub mime: String,
    /// Size in kilobytes, rounded to 2 decimals
    pub size: f64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub path: PathBuf,
    pub scratch_dir: PathBuf,
    pub folder_id: Option<Uuid>,
}

impl StagedFile {
    pub fn from_incoming(file: &IncomingFile, scratch_dir: &Path, folder_id: Option<Uuid>) -> Self {
        let ext = resolve_extension(&file.original_name, &file.content_type);
        // NFC so visually identical names compare and slug the same
        let name: String = file.original_name.trim().nfc().collect();
        let hash = generate_file_name(&basename(&name, &ext), &ext);

        Self {
            name,
            hash,
            ext,
            mime: file.content_type.clone(),
            size: bytes_to_kbytes(file.size_bytes),
            width: None,
            height: None,
            path: file.path.clone(),
            scratch_dir: scratch_dir.to_path_buf(),
            folder_id,
        }
    }

    pub fn with_dimensions(&self, width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..self.clone()
        }
    }

    pub fn to_format_entry(&self, url: String) -> FormatEntry {
        FormatEntry {
            name: self.name.clone(),
            hash: self.hash.clone(),
            ext: self.ext.clone(),
            mime: self.mime.clone(),
            width: self.width,
            height: self.height,
            size: self.size,
            url,
        }
    }
}

/// Responsive variants keyed by breakpoint name.
#[derive(Clone, Debug, Default)]
pub struct VariantSet(BTreeMap<String, StagedFile>);

impl VariantSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, file: StagedFile) {
        self.0.insert(key.into(), file);
    }

    pub fn get(&self, key: &str) -> Option<&StagedFile> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, StagedFile> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a VariantSet {
    type Item = (&'a String, &'a StagedFile);
    type IntoIter = btree_map::Iter<'a, String, StagedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, StagedFile)> for VariantSet {
    fn from_iter<I: IntoIterator<Item = (String, StagedFile)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incoming(name: &str, content_type: &str) -> IncomingFile {
        IncomingFile {
            original_name: name.to_string(),
            content_type: content_type.to_string(),
            path: PathBuf::from("/tmp/upload-0001"),
            size_bytes: 2_500,
        }
    }

    #[test]
    fn test_from_incoming() {
        let folder = Uuid::new_v4();
        let staged = StagedFile::from_incoming(
            &incoming("Summer Trip.png", "image/png"),
            Path::new("/tmp/scratch"),
            Some(folder),
        );

        assert_eq!(staged.name, "Summer Trip.png");
        assert_eq!(staged.ext, ".png");
        assert!(staged.hash.starts_with("summer-trip_"));
        assert!(staged.hash.ends_with(".png"));
        assert_eq!(staged.size, 2.5);
        assert_eq!(staged.path, PathBuf::from("/tmp/upload-0001"));
        assert_eq!(staged.folder_id, Some(folder));
        assert_eq!(staged.width, None);
    }

    #[test]
    fn test_display_name_is_nfc_normalized() {
        let staged = StagedFile::from_incoming(
            &incoming("  Cafe\u{301} Menu.png ", "image/png"),
            Path::new("/tmp"),
            None,
        );
        assert_eq!(staged.name, "Caf\u{e9} Menu.png");
    }

    #[test]
    fn test_extension_from_mime_when_missing() {
        let staged =
            StagedFile::from_incoming(&incoming("scan", "application/pdf"), Path::new("/tmp"), None);
        assert_eq!(staged.ext, ".pdf");
        assert!(staged.hash.starts_with("scan_"));
    }

    #[test]
    fn test_with_dimensions_returns_new_value() {
        let staged = StagedFile::from_incoming(&incoming("a.png", "image/png"), Path::new("/tmp"), None);
        let sized = staged.with_dimensions(10, 20);
        assert_eq!(staged.width, None);
        assert_eq!((sized.width, sized.height), (Some(10), Some(20)));
        assert_eq!(sized.hash, staged.hash);
    }

    #[test]
    fn test_variant_set_keys_are_sorted() {
        let base = StagedFile::from_incoming(&incoming("a.png", "image/png"), Path::new("/tmp"), None);
        let set: VariantSet = ["small", "large", "medium"]
            .into_iter()
            .map(|k| (k.to_string(), base.clone()))
            .collect();
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["large", "medium", "small"]);
        assert_eq!(set.len(), 3);
    }
}
