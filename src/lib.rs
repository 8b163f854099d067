//! depot - store uploads on local disk or in an S3-compatible object store
//! behind one interface, yielding a normalized [`FileRecord`] either way.
//!
//! Callers build a [`Storage`] dispatcher from a [`StorageConfig`] and call
//! [`Storage::put`] (browser upload) or [`Storage::put_file`] (existing file);
//! both return an owned [`FileRecord`] whose `path`/`full_path` point at the
//! final destination (disk path or public URL).

pub use depot_config::{BackendKind, ConfigError, S3Settings, StorageConfig, StorageOverrides};
pub use depot_record::{generate_unique_name, FileRecord, FileRecordExport, RecordError, UploadDescriptor};
pub use depot_storage::{LocalBackend, Storage, StorageBackend, StorageError, StoredLocation};

#[cfg(feature = "s3")]
pub use depot_storage::S3Backend;
