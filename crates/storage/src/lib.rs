mod backend;
mod dispatcher;
mod local;
mod errors;

#[cfg(feature = "s3")]
mod s3;

pub use backend::{StorageBackend, StoredLocation};
pub use dispatcher::Storage;
pub use local::LocalBackend;
pub use errors::*;

#[cfg(feature = "s3")]
pub use s3::S3Backend;
