/// Default values for configuration fields

use super::models::{BackendKind, S3Settings, StorageConfig};
use std::collections::HashSet;
use std::path::PathBuf;

pub fn backend() -> BackendKind {
    BackendKind::Local
}

pub fn upload_root_dir() -> PathBuf {
    PathBuf::from("uploads")
}

pub fn max_width() -> u32 {
    0 // 0 = unlimited
}

pub fn max_height() -> u32 {
    0 // 0 = unlimited
}

pub fn max_size_bytes() -> u64 {
    0 // 0 = unlimited
}

pub fn maintain_aspect_ratio() -> bool {
    true
}

pub fn s3_region() -> String {
    "auto".to_string()
}

pub fn s3_bucket_name() -> String {
    "depot".to_string()
}

pub fn s3_acl() -> String {
    "public-read".to_string()
}

pub fn exists_timeout_secs() -> u64 {
    30
}

pub fn exists_poll_interval_ms() -> u64 {
    500
}

pub fn s3_settings() -> S3Settings {
    S3Settings {
        endpoint_url: String::new(),
        region: s3_region(),
        access_key_id: String::new(),
        secret_access_key: String::new(),
        bucket_name: s3_bucket_name(),
        public_url: String::new(),
        bucket_prefix: String::new(),
        acl: s3_acl(),
        exists_timeout_secs: exists_timeout_secs(),
        exists_poll_interval_ms: exists_poll_interval_ms(),
    }
}

pub fn storage_config() -> StorageConfig {
    StorageConfig {
        backend: backend(),
        upload_root_dir: upload_root_dir(),
        allowed_mime_types: HashSet::new(),
        max_width: max_width(),
        max_height: max_height(),
        max_size_bytes: max_size_bytes(),
        unique_naming: false,
        maintain_aspect_ratio: maintain_aspect_ratio(),
        s3: s3_settings(),
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# Depot Storage Configuration
# ===============================================================================

backend = "local"                    # Storage backend: "local" or "remote" ("s3" accepted)
upload_root_dir = "uploads"          # Destination directory for the local backend
allowed_mime_types = []              # Mime types accepted by upload validation ([] = allow all)
max_width = 0                        # Max image width in pixels (0 = unlimited)
max_height = 0                       # Max image height in pixels (0 = unlimited)
max_size_bytes = 0                   # Max file size in bytes (0 = unlimited)
unique_naming = false                # Replace destination names with generated unique names
maintain_aspect_ratio = true         # Passed through to image resize tooling

# ===============================================================================
# S3-COMPATIBLE OBJECT STORE (only used if backend = "remote")
# ===============================================================================
[s3]
endpoint_url = ""                    # S3 endpoint (e.g., https://s3.amazonaws.com)
region = "auto"                      # S3 region (e.g., us-east-1 or "auto")
access_key_id = ""                   # Access Key ID
secret_access_key = ""               # Secret Access Key
bucket_name = "depot"                # Bucket name
public_url = ""                      # Public URL for stored objects (optional)
bucket_prefix = ""                   # Prefix for all object keys (optional)
acl = "public-read"                  # Canned ACL applied to uploads
exists_timeout_secs = 30             # Bound on the post-upload visibility wait
exists_poll_interval_ms = 500        # Poll interval during the visibility wait
"#;
