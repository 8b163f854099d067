use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw upload as handed over by a web framework's multipart parser.
///
/// The declared mime and size are trusted as-is; nothing is re-probed for
/// uploads. Validation of what the client claims belongs to the embedding
/// application.
#[derive(Debug, Clone)]
pub struct UploadDescriptor {
    /// Where the framework parked the upload on disk.
    pub temp_path: PathBuf,
    /// Filename as supplied by the client.
    pub client_filename: String,
    pub declared_mime: String,
    pub declared_size_bytes: u64,
}

/// Canonical metadata for one stored file, identical in shape for both
/// backends and both input kinds.
///
/// `path`/`full_path` start at the *source* location and are overwritten
/// with the destination (final disk path or public URL) only after a
/// successful store. Until then they must not be treated as durable.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    /// Caller-supplied override for the destination name/key.
    pub custom_name: Option<String>,
    /// Original filename as supplied (client filename or path basename).
    pub client_name: String,
    /// Unique name assigned at construction, never reassigned.
    pub generated_name: String,
    /// `generated_name` without its extension.
    pub raw_name: String,
    /// Lowercased, without the leading dot; empty when the name has none.
    pub extension: String,
    /// Normalized mime type; empty when unknown.
    pub mime: String,
    /// Size in kilobytes, rounded to 2 decimals; 0 for empty files.
    pub size_kb: f64,
    pub path: String,
    pub full_path: String,
    pub is_image: bool,
    /// Set only when `is_image` and the dimension probe succeeded.
    pub image_width: Option<u32>,
    pub image_height: Option<u32>,
    /// `width="W" height="H"` attribute string from the dimension probe.
    pub image_size_str: Option<String>,
}

/// Flattened key-value view of a [`FileRecord`], with the fixed field
/// names the embedding application persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecordExport {
    pub file_name: String,
    pub file_type: String,
    pub file_path: String,
    pub full_path: String,
    pub raw_name: String,
    pub client_name: String,
    pub file_ext: String,
    pub file_size: f64,
    pub is_image: bool,
    pub image_width: Option<u32>,
    pub image_height: Option<u32>,
    pub image_type: String,
    pub image_size_str: Option<String>,
}

impl FileRecord {
    /// Flatten the record for persistence. `image_type` duplicates the
    /// normalized mime.
    pub fn export(&self) -> FileRecordExport {
        FileRecordExport {
            file_name: self.generated_name.clone(),
            file_type: self.mime.clone(),
            file_path: self.path.clone(),
            full_path: self.full_path.clone(),
            raw_name: self.raw_name.clone(),
            client_name: self.client_name.clone(),
            file_ext: self.extension.clone(),
            file_size: self.size_kb,
            is_image: self.is_image,
            image_width: self.image_width,
            image_height: self.image_height,
            image_type: self.mime.clone(),
            image_size_str: self.image_size_str.clone(),
        }
    }
}
