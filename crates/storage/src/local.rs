use crate::backend::{StorageBackend, StoredLocation};
use crate::StorageError;
use depot_config::StorageConfig;
use depot_record::{generate_unique_name, FileRecord};
use std::path::{Path, PathBuf};

/// Local filesystem storage backend
#[derive(Debug, Default)]
pub struct LocalBackend;

impl LocalBackend {
    pub fn new() -> Self {
        Self
    }

    /// Destination under the upload root: the custom name or generated
    /// name, with the filename swapped for a fresh unique one (keeping
    /// the destination's extension) when unique naming is on.
    fn destination(record: &FileRecord, config: &StorageConfig) -> PathBuf {
        let name = record
            .custom_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&record.generated_name);
        let mut dest = config.upload_root_dir.join(name);

        if config.unique_naming {
            let unique = match dest.extension().and_then(|ext| ext.to_str()) {
                Some(ext) => format!("{}.{}", generate_unique_name(), ext),
                None => generate_unique_name(),
            };
            dest.set_file_name(unique);
        }

        dest
    }
}

#[async_trait::async_trait]
impl StorageBackend for LocalBackend {
    async fn store(
        &self,
        record: &FileRecord,
        config: &StorageConfig,
    ) -> Result<StoredLocation, StorageError> {
        let source = Path::new(&record.path);
        let dest = Self::destination(record, config);

        if let Some(parent) = dest.parent() {
            if !parent.exists() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        if let Err(copy_error) = tokio::fs::copy(source, &dest).await {
            tracing::debug!(
                "Copy to {} failed ({}), falling back to move",
                dest.display(),
                copy_error
            );
            if let Err(move_error) = tokio::fs::rename(source, &dest).await {
                return Err(StorageError::LocalStoreFailure {
                    path: dest.display().to_string(),
                    copy_error,
                    move_error,
                });
            }
        }

        tracing::debug!("Stored {} at {}", record.client_name, dest.display());
        Ok(StoredLocation::new(dest.display().to_string()))
    }

    fn is_remote(&self) -> bool {
        false
    }
}
