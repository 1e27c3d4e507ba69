use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mediaflow_core::{AppError, Formats, MetadataStore, NewUploadRecord, UploadRecord};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const UPLOAD_COLUMNS: &str =
    "id, filename, size, width, height, formats, ext, mime, url, user_id, created_at, updated_at";

/// Row shape of the `uploads` table
#[derive(Debug, sqlx::FromRow)]
struct UploadRow {
    id: Uuid,
    filename: String,
    size: f64,
    width: Option<i32>,
    height: Option<i32>,
    formats: Option<Json<Formats>>,
    ext: String,
    mime: String,
    url: String,
    user_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UploadRow> for UploadRecord {
    fn from(row: UploadRow) -> Self {
        UploadRecord {
            id: row.id,
            filename: row.filename,
            size: row.size,
            width: row.width.map(|w| w as u32),
            height: row.height.map(|h| h as u32),
            formats: row.formats.map(|Json(formats)| formats),
            ext: row.ext,
            mime: row.mime,
            url: row.url,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for upload records
#[derive(Clone)]
pub struct UploadRepository {
    pool: PgPool,
}

impl UploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a record; id and audit timestamps are assigned by the database.
    #[tracing::instrument(skip(self, record), fields(db.table = "uploads", db.operation = "insert"))]
    pub async fn create_upload(&self, record: NewUploadRecord) -> Result<UploadRecord, AppError> {
        let row = sqlx::query_as::<Postgres, UploadRow>(&format!(
            r#"
            INSERT INTO uploads (filename, size, width, height, formats, ext, mime, url, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            UPLOAD_COLUMNS
        ))
        .bind(&record.filename)
        .bind(record.size)
        .bind(record.width.map(|w| w as i32))
        .bind(record.height.map(|h| h as i32))
        .bind(record.formats.map(Json))
        .bind(&record.ext)
        .bind(&record.mime)
        .bind(&record.url)
        .bind(record.user_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(upload_id = %row.id, "Upload record created");
        Ok(row.into())
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploads", db.operation = "select", db.record_id = %id))]
    pub async fn get_upload(&self, id: Uuid) -> Result<Option<UploadRecord>, AppError> {
        let row = sqlx::query_as::<Postgres, UploadRow>(&format!(
            "SELECT {} FROM uploads WHERE id = $1",
            UPLOAD_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UploadRecord::from))
    }
}

#[async_trait]
impl MetadataStore for UploadRepository {
    async fn create_record(&self, record: NewUploadRecord) -> Result<UploadRecord, AppError> {
        self.create_upload(record).await
    }

    async fn get_record(&self, id: Uuid) -> Result<Option<UploadRecord>, AppError> {
        self.get_upload(id).await
    }
}
