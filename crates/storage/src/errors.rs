use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    RecordError(#[from] depot_record::RecordError),

    #[error("Local store failed for '{path}' (copy: {copy_error}; move: {move_error})")]
    LocalStoreFailure {
        path: String,
        copy_error: std::io::Error,
        move_error: std::io::Error,
    },

    #[error("Remote store failed for '{key}': {reason}")]
    RemoteStoreFailure { key: String, reason: String },

    #[error("Object '{key}' not visible after {waited_secs}s")]
    ObjectVisibilityTimeout { key: String, waited_secs: u64 },

    #[error("Invalid storage configuration: {0}")]
    ConfigError(String),
}
