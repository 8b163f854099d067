mod models;
mod builder;
mod mime;
mod naming;
mod errors;

pub use models::{FileRecord, FileRecordExport, UploadDescriptor};
pub use naming::generate_unique_name;
pub use errors::RecordError;
