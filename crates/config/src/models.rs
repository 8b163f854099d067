use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Storage destination selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Local filesystem under `upload_root_dir`.
    Local,
    /// S3-compatible object store. `"s3"` is accepted as a config alias.
    #[serde(alias = "s3")]
    Remote,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "super::defaults::backend")]
    pub backend: BackendKind,
    #[serde(default = "super::defaults::upload_root_dir")]
    pub upload_root_dir: PathBuf,
    /// Mime types accepted by upload validation (empty = allow all).
    /// Carried for the embedding application's validator; the backends
    /// themselves do not filter on it.
    #[serde(default)]
    pub allowed_mime_types: HashSet<String>,
    #[serde(default = "super::defaults::max_width")]
    pub max_width: u32,
    #[serde(default = "super::defaults::max_height")]
    pub max_height: u32,
    #[serde(default = "super::defaults::max_size_bytes")]
    pub max_size_bytes: u64,
    /// Replace destination filenames with generated unique names.
    #[serde(default)]
    pub unique_naming: bool,
    /// Pass-through for image resize tooling.
    #[serde(default = "super::defaults::maintain_aspect_ratio")]
    pub maintain_aspect_ratio: bool,
    #[serde(default = "super::defaults::s3_settings")]
    pub s3: S3Settings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3Settings {
    #[serde(default)]
    pub endpoint_url: String,
    #[serde(default = "super::defaults::s3_region")]
    pub region: String,
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: String,
    #[serde(default = "super::defaults::s3_bucket_name")]
    pub bucket_name: String,
    /// Public base URL for stored objects (empty = derive from endpoint).
    #[serde(default)]
    pub public_url: String,
    /// Prefix prepended to every object key (empty = none).
    #[serde(default)]
    pub bucket_prefix: String,
    /// Canned ACL applied to every uploaded object.
    #[serde(default = "super::defaults::s3_acl")]
    pub acl: String,
    /// Bound on the post-upload wait for the object to become visible.
    #[serde(default = "super::defaults::exists_timeout_secs")]
    pub exists_timeout_secs: u64,
    #[serde(default = "super::defaults::exists_poll_interval_ms")]
    pub exists_poll_interval_ms: u64,
}

/// Per-dispatcher config overrides; `None` fields keep the base value.
///
/// The backend selector is deliberately absent: the dispatcher binds its
/// backend at construction, so the selector cannot change afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageOverrides {
    pub upload_root_dir: Option<PathBuf>,
    pub allowed_mime_types: Option<HashSet<String>>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub max_size_bytes: Option<u64>,
    pub unique_naming: Option<bool>,
    pub maintain_aspect_ratio: Option<bool>,
}

impl StorageConfig {
    /// Merge overrides key by key, leaving unset keys untouched.
    pub fn merge(&mut self, overrides: StorageOverrides) {
        if let Some(upload_root_dir) = overrides.upload_root_dir {
            self.upload_root_dir = upload_root_dir;
        }
        if let Some(allowed_mime_types) = overrides.allowed_mime_types {
            self.allowed_mime_types = allowed_mime_types;
        }
        if let Some(max_width) = overrides.max_width {
            self.max_width = max_width;
        }
        if let Some(max_height) = overrides.max_height {
            self.max_height = max_height;
        }
        if let Some(max_size_bytes) = overrides.max_size_bytes {
            self.max_size_bytes = max_size_bytes;
        }
        if let Some(unique_naming) = overrides.unique_naming {
            self.unique_naming = unique_naming;
        }
        if let Some(maintain_aspect_ratio) = overrides.maintain_aspect_ratio {
            self.maintain_aspect_ratio = maintain_aspect_ratio;
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        super::defaults::storage_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_accepts_s3_alias() {
        #[derive(Deserialize)]
        struct Probe {
            backend: BackendKind,
        }

        let probe: Probe = toml::from_str("backend = \"s3\"").unwrap();
        assert_eq!(probe.backend, BackendKind::Remote);

        let probe: Probe = toml::from_str("backend = \"remote\"").unwrap();
        assert_eq!(probe.backend, BackendKind::Remote);

        let probe: Probe = toml::from_str("backend = \"local\"").unwrap();
        assert_eq!(probe.backend, BackendKind::Local);
    }

    #[test]
    fn test_merge_replaces_only_set_keys() {
        let mut config = StorageConfig::default();
        config.max_width = 800;

        config.merge(StorageOverrides {
            upload_root_dir: Some(PathBuf::from("/var/uploads")),
            unique_naming: Some(true),
            ..Default::default()
        });

        assert_eq!(config.upload_root_dir, PathBuf::from("/var/uploads"));
        assert!(config.unique_naming);
        // Unset keys keep their previous values
        assert_eq!(config.max_width, 800);
        assert_eq!(config.backend, BackendKind::Local);
    }

    #[test]
    fn test_minimal_toml_fills_defaults() {
        let config: StorageConfig = toml::from_str("backend = \"local\"").unwrap();
        assert_eq!(config.upload_root_dir, PathBuf::from("uploads"));
        assert!(!config.unique_naming);
        assert_eq!(config.s3.acl, "public-read");
        assert_eq!(config.s3.exists_timeout_secs, 30);
    }
}
