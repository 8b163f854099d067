use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Source file not readable: {path}: {source}")]
    SourceNotFound {
        path: PathBuf,
        source: std::io::Error,
    },
}
