use crate::StorageError;
use depot_config::StorageConfig;
use depot_record::FileRecord;

/// Finalized destination reported by a backend after a successful store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredLocation {
    /// Backend-specific location: filesystem path or public URL.
    pub path: String,
    pub full_path: String,
}

impl StoredLocation {
    pub fn new(path: String) -> Self {
        Self {
            full_path: path.clone(),
            path,
        }
    }
}

/// Storage backend trait for file storage abstraction
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Persist the record's source file, returning its final location.
    /// The destination name is the record's custom name when set,
    /// otherwise derived from its generated name.
    async fn store(
        &self,
        record: &FileRecord,
        config: &StorageConfig,
    ) -> Result<StoredLocation, StorageError>;

    /// Check if backend is local or remote
    fn is_remote(&self) -> bool;
}
