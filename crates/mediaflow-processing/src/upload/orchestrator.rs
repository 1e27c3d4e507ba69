//! Upload orchestrator: validate → classify → optimize → generate variants → store → record.
//!
//! Each file runs in its own scratch directory, which is removed once the file
//! is either stored or failed. A batch succeeds only when every file does.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use futures::stream::{FuturesUnordered, StreamExt};
use uuid::Uuid;

use mediaflow_core::constants::SCRATCH_DIR_PREFIX;
use mediaflow_core::{AppError, Formats, MetadataStore, NewUploadRecord, UploadRecord};
use mediaflow_storage::Storage;

use super::traits::UploadConfig;
use super::types::{IncomingFile, StagedFile, VariantSet};
use super::variants::{VariantGenerator, VariantSettings};
use crate::image::{ImageCodec, ImageInspector, ImageRsCodec};
use crate::validator::MediaValidator;

pub struct UploadOrchestrator {
    storage: Arc<dyn Storage>,
    store: Arc<dyn MetadataStore>,
    inspector: ImageInspector,
    generator: VariantGenerator,
    validator: MediaValidator,
    scratch_root: PathBuf,
}

impl UploadOrchestrator {
    pub fn new(
        config: &dyn UploadConfig,
        storage: Arc<dyn Storage>,
        store: Arc<dyn MetadataStore>,
        codec: Arc<dyn ImageCodec>,
    ) -> Self {
        let settings = VariantSettings {
            quality: config.optimize_quality(),
            ..VariantSettings::default()
        };

        Self {
            storage,
            store,
            inspector: ImageInspector::new(Arc::clone(&codec)),
            generator: VariantGenerator::new(codec, settings),
            validator: MediaValidator::new(config.max_files_per_request(), config.max_file_size()),
            scratch_root: config.scratch_root(),
        }
    }

    /// Orchestrator backed by [`ImageRsCodec`].
    pub fn with_default_codec(
        config: &dyn UploadConfig,
        storage: Arc<dyn Storage>,
        store: Arc<dyn MetadataStore>,
    ) -> Self {
        Self::new(config, storage, store, Arc::new(ImageRsCodec))
    }

    /// Upload a batch. Records come back in completion order.
    ///
    /// Limits are checked before anything touches disk. Every file is driven to
    /// completion; if any of them failed the whole batch fails with `UploadFailed`.
    #[tracing::instrument(skip(self, files), fields(file_count = files.len(), user_id = ?user_id))]
    pub async fn upload_files(
        &self,
        files: Vec<IncomingFile>,
        user_id: Option<Uuid>,
    ) -> Result<Vec<UploadRecord>, AppError> {
        self.validator.validate_all(&files)?;

        let start = std::time::Instant::now();
        let mut tasks: FuturesUnordered<_> = files
            .iter()
            .map(|file| self.upload_file(file, user_id))
            .collect();

        let mut records = Vec::with_capacity(files.len());
        let mut first_error: Option<AppError> = None;
        while let Some(result) = tasks.next().await {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::error!(error = %e, "File upload failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_error {
            return Err(AppError::UploadFailed(e.to_string()));
        }

        tracing::info!(
            record_count = records.len(),
            backend = ?self.storage.backend_type(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload batch completed"
        );
        Ok(records)
    }

    /// Run one file through the pipeline inside a private scratch directory.
    pub async fn upload_file(
        &self,
        file: &IncomingFile,
        user_id: Option<Uuid>,
    ) -> Result<UploadRecord, AppError> {
        tokio::fs::create_dir_all(&self.scratch_root).await?;
        let scratch = tempfile::Builder::new()
            .prefix(SCRATCH_DIR_PREFIX)
            .tempdir_in(&self.scratch_root)?;

        // anonymous uploads each get their own folder
        let folder_id = user_id.unwrap_or_else(Uuid::new_v4);
        let result = self.process(file, scratch.path(), folder_id, user_id).await;

        let scratch_path = scratch.path().to_path_buf();
        if let Err(e) = scratch.close() {
            tracing::warn!(
                path = %scratch_path.display(),
                error = %e,
                "Failed to remove scratch directory"
            );
        }

        result
    }

    async fn process(
        &self,
        file: &IncomingFile,
        scratch: &Path,
        folder_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<UploadRecord, AppError> {
        let staged = StagedFile::from_incoming(file, scratch, Some(folder_id));

        let meta = match self.inspector.classify(&staged.path).await {
            Ok(meta) if ImageInspector::is_image(&meta) => meta,
            Ok(_) => return self.store_and_record(staged, VariantSet::new(), user_id).await,
            Err(e) => {
                tracing::debug!(
                    file = %staged.name,
                    reason = %e,
                    "Not an image, storing unchanged"
                );
                return self.store_and_record(staged, VariantSet::new(), user_id).await;
            }
        };

        if self.inspector.is_faulty(&staged.path).await {
            return Err(AppError::InvalidImage(format!(
                "{} could not be decoded",
                staged.name
            )));
        }

        let mut master = staged.with_dimensions(meta.width, meta.height);

        if ImageInspector::is_optimizable(&meta) {
            master = self.generator.optimize(&master).await?;
        }

        let variants = if ImageInspector::is_resizable(&meta) {
            self.generator.generate(&master).await?
        } else {
            VariantSet::new()
        };

        tracing::debug!(
            file = %master.name,
            format = meta.format.as_str(),
            width = meta.width,
            height = meta.height,
            variants = variants.len(),
            "Image processed"
        );

        self.store_and_record(master, variants, user_id).await
    }

    /// Store master and variants concurrently, then persist the record.
    ///
    /// All writes run to completion; the first failure is reported afterwards.
    async fn store_and_record(
        &self,
        master: StagedFile,
        variants: VariantSet,
        user_id: Option<Uuid>,
    ) -> Result<UploadRecord, AppError> {
        let targets: Vec<(Option<&str>, &StagedFile)> = std::iter::once((None, &master))
            .chain(variants.iter().map(|(key, file)| (Some(key.as_str()), file)))
            .collect();

        let results = join_all(targets.iter().map(|(_, file)| {
            self.storage
                .upload_file(file.folder_id, &file.hash, &file.mime, &file.path)
        }))
        .await;

        let mut master_url = None;
        let mut formats = Formats::new();
        for ((key, file), result) in targets.into_iter().zip(results) {
            let (_, url) = result?;
            match key {
                None => master_url = Some(url),
                Some(key) => {
                    formats.insert(key.to_string(), file.to_format_entry(url));
                }
            }
        }

        let url = master_url
            .ok_or_else(|| AppError::Internal("master upload produced no URL".to_string()))?;

        let record = NewUploadRecord {
            filename: master.name,
            size: master.size,
            width: master.width,
            height: master.height,
            formats: (!formats.is_empty()).then_some(formats),
            ext: master.ext,
            mime: master.mime,
            url,
            user_id,
        };

        self.store.create_record(record).await
    }
}
