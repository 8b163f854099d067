use crate::backend::StorageBackend;
use crate::local::LocalBackend;
#[cfg(feature = "s3")]
use crate::s3::S3Backend;
use crate::StorageError;
use depot_config::{BackendKind, StorageConfig, StorageOverrides};
use depot_record::{FileRecord, UploadDescriptor};
use std::path::Path;
use std::sync::Arc;

/// Routes stores to the configured backend behind one uniform surface.
///
/// Every call builds and returns its own owned [`FileRecord`]; the
/// dispatcher keeps no per-call state, so a `Storage` value can be shared
/// across tasks freely.
pub struct Storage {
    backend: Arc<dyn StorageBackend>,
    config: StorageConfig,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Storage {
    /// Wrap an explicit backend. Lets embedders plug in backends beyond
    /// the two built-in ones without touching dispatch logic.
    pub fn new(backend: Arc<dyn StorageBackend>, config: StorageConfig) -> Self {
        Self { backend, config }
    }

    /// Select the backend from the config's `backend` field.
    pub async fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let backend: Arc<dyn StorageBackend> = match config.backend {
            BackendKind::Local => Arc::new(LocalBackend::new()),
            #[cfg(feature = "s3")]
            BackendKind::Remote => Arc::new(S3Backend::new(&config.s3).await?),
            #[cfg(not(feature = "s3"))]
            BackendKind::Remote => {
                return Err(StorageError::ConfigError(
                    "remote backend requested but built without the 's3' feature".to_string(),
                ))
            }
        };

        tracing::debug!(
            "Storage dispatcher initialized ({} backend)",
            if backend.is_remote() { "remote" } else { "local" }
        );

        Ok(Self { backend, config })
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Merge per-dispatcher overrides into the config, key by key.
    pub fn merge_config(&mut self, overrides: StorageOverrides) {
        self.config.merge(overrides);
    }

    pub fn is_remote(&self) -> bool {
        self.backend.is_remote()
    }

    /// Store a browser upload. With `custom_name` set, the destination
    /// name/key is overridden; the record's generated name is untouched.
    pub async fn put(
        &self,
        upload: &UploadDescriptor,
        custom_name: Option<&str>,
    ) -> Result<FileRecord, StorageError> {
        let mut record = FileRecord::from_upload(upload);
        record.custom_name = custom_name.map(str::to_string);
        self.finalize(record).await
    }

    /// Store an existing file from disk.
    pub async fn put_file<P: AsRef<Path>>(
        &self,
        path: P,
        custom_name: Option<&str>,
    ) -> Result<FileRecord, StorageError> {
        let mut record = FileRecord::from_path(path)?;
        record.custom_name = custom_name.map(str::to_string);
        self.finalize(record).await
    }

    /// Hand the record to the backend; only a successful store rewrites
    /// `path`/`full_path` to the destination.
    async fn finalize(&self, mut record: FileRecord) -> Result<FileRecord, StorageError> {
        let location = self.backend.store(&record, &self.config).await?;
        record.path = location.path;
        record.full_path = location.full_path;
        Ok(record)
    }
}
