use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted derived variant (thumbnail or responsive breakpoint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatEntry {
    pub name: String,
    pub hash: String,
    pub ext: String,
    pub mime: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Size in kilobytes, rounded to 2 decimals
    pub size: f64,
    pub url: String,
}

/// Variant key (`thumbnail`, `xlarge`, ...) to persisted variant.
pub type Formats = BTreeMap<String, FormatEntry>;

/// Record assembled by the pipeline, before the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUploadRecord {
    pub filename: String,
    /// Size in kilobytes, rounded to 2 decimals
    pub size: f64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Present only for resizable images
    pub formats: Option<Formats>,
    pub ext: String,
    pub mime: String,
    pub url: String,
    pub user_id: Option<Uuid>,
}

/// Durable upload record returned by the metadata store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: Uuid,
    pub filename: String,
    pub size: f64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub formats: Option<Formats>,
    pub ext: String,
    pub mime: String,
    pub url: String,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UploadRecord {
    /// Materialize a new record with the given id and a single timestamp for both audit fields.
    pub fn from_new(id: Uuid, record: NewUploadRecord, now: DateTime<Utc>) -> Self {
        Self {
            id,
            filename: record.filename,
            size: record.size,
            width: record.width,
            height: record.height,
            formats: record.formats,
            ext: record.ext,
            mime: record.mime,
            url: record.url,
            user_id: record.user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Variant keys present on this record, sorted.
    pub fn format_names(&self) -> Vec<&str> {
        self.formats
            .as_ref()
            .map(|formats| formats.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_record(formats: Option<Formats>) -> NewUploadRecord {
        NewUploadRecord {
            filename: "holiday.png".to_string(),
            size: 12.5,
            width: Some(800),
            height: Some(600),
            formats,
            ext: ".png".to_string(),
            mime: "image/png".to_string(),
            url: "files/folder/holiday_0a1b2c3d4e.png".to_string(),
            user_id: None,
        }
    }

    #[test]
    fn test_from_new_sets_matching_timestamps() {
        let now = Utc::now();
        let record = UploadRecord::from_new(Uuid::new_v4(), new_record(None), now);
        assert_eq!(record.created_at, record.updated_at);
        assert_eq!(record.filename, "holiday.png");
        assert!(record.format_names().is_empty());
    }

    #[test]
    fn test_formats_serialize_as_object() {
        let mut formats = Formats::new();
        formats.insert(
            "thumbnail".to_string(),
            FormatEntry {
                name: "thumbnail_holiday.png".to_string(),
                hash: "thumbnail_holiday_0a1b2c3d4e".to_string(),
                ext: ".png".to_string(),
                mime: "image/png".to_string(),
                width: Some(208),
                height: Some(156),
                size: 4.2,
                url: "files/folder/thumbnail_holiday_0a1b2c3d4e.png".to_string(),
            },
        );
        let json = serde_json::to_value(new_record(Some(formats))).unwrap();
        assert_eq!(json["formats"]["thumbnail"]["width"], 208);
    }
}
