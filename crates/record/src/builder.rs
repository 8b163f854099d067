use crate::errors::RecordError;
use crate::mime;
use crate::models::{FileRecord, UploadDescriptor};
use crate::naming::generate_unique_name;
use std::path::Path;

impl FileRecord {
    /// Build a record from a browser upload. The declared mime and size
    /// are trusted without re-probing; only the image dimensions are read
    /// from the temp file, and a failed probe degrades the record instead
    /// of failing the build.
    pub fn from_upload(upload: &UploadDescriptor) -> FileRecord {
        let extension = extension_of(&upload.client_filename);
        let mime = mime::normalize(&upload.declared_mime);

        Self::assemble(
            upload.client_filename.clone(),
            extension,
            mime,
            upload.declared_size_bytes,
            &upload.temp_path,
        )
    }

    /// Build a record from an existing file on disk. Unlike the upload
    /// case the mime type is probed from the path, since there is no
    /// declared value to trust.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<FileRecord, RecordError> {
        let path = path.as_ref();

        let metadata = std::fs::metadata(path).map_err(|source| RecordError::SourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(RecordError::SourceNotFound {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }

        let client_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = extension_of(&client_name);
        let mime = mime::normalize(&mime::sniff(path));

        Ok(Self::assemble(
            client_name,
            extension,
            mime,
            metadata.len(),
            path,
        ))
    }

    fn assemble(
        client_name: String,
        extension: String,
        mime: String,
        size_bytes: u64,
        source: &Path,
    ) -> FileRecord {
        let raw_name = generate_unique_name();
        let generated_name = if extension.is_empty() {
            raw_name.clone()
        } else {
            format!("{raw_name}.{extension}")
        };

        let is_image = mime::is_image(&mime);
        let (image_width, image_height, image_size_str) = if is_image {
            probe_dimensions(source)
        } else {
            (None, None, None)
        };

        let source_path = source.display().to_string();

        FileRecord {
            custom_name: None,
            client_name,
            generated_name,
            raw_name,
            extension,
            mime,
            size_kb: kilobytes(size_bytes),
            path: source_path.clone(),
            full_path: source_path,
            is_image,
            image_width,
            image_height,
            image_size_str,
        }
    }
}

/// Lowercased substring after the last dot; empty when there is no dot
/// or nothing follows it.
fn extension_of(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// Bytes to kilobytes, rounded to 2 decimals; empty files stay 0.
fn kilobytes(bytes: u64) -> f64 {
    if bytes == 0 {
        return 0.0;
    }
    (bytes as f64 / 1024.0 * 100.0).round() / 100.0
}

fn probe_dimensions(path: &Path) -> (Option<u32>, Option<u32>, Option<String>) {
    match image::image_dimensions(path) {
        Ok((width, height)) => (
            Some(width),
            Some(height),
            Some(format!("width=\"{width}\" height=\"{height}\"")),
        ),
        Err(err) => {
            tracing::debug!("Dimension probe failed for {}: {}", path.display(), err);
            (None, None, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn upload(filename: &str, mime: &str, size: u64) -> UploadDescriptor {
        UploadDescriptor {
            temp_path: PathBuf::from("/tmp/upload_3f9a"),
            client_filename: filename.to_string(),
            declared_mime: mime.to_string(),
            declared_size_bytes: size,
        }
    }

    #[test]
    fn test_upload_scenario_photo_jpg() {
        let record = FileRecord::from_upload(&upload("photo.JPG", "image/jpg", 204800));

        assert_eq!(record.extension, "jpg");
        assert_eq!(record.mime, "image/jpeg");
        assert!(record.is_image);
        assert_eq!(record.size_kb, 200.00);
        assert_eq!(record.client_name, "photo.JPG");
        // Temp file does not exist, so the probe degrades silently
        assert_eq!(record.image_width, None);
        assert_eq!(record.image_height, None);
        assert_eq!(record.image_size_str, None);
    }

    #[test]
    fn test_generated_name_invariant() {
        let record = FileRecord::from_upload(&upload("report.pdf", "application/pdf", 1024));

        assert!(!record.generated_name.is_empty());
        assert_eq!(
            format!("{}.{}", record.raw_name, record.extension),
            record.generated_name
        );
    }

    #[test]
    fn test_no_extension_no_trailing_dot() {
        let record = FileRecord::from_upload(&upload("doc", "text/plain", 10));

        assert_eq!(record.extension, "");
        assert!(!record.generated_name.ends_with('.'));
        assert_eq!(record.raw_name, record.generated_name);
    }

    #[test]
    fn test_extension_of_edges() {
        assert_eq!(extension_of("photo.JPG"), "jpg");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of("doc"), "");
        assert_eq!(extension_of("trailing."), "");
        assert_eq!(extension_of(".gitignore"), "gitignore");
    }

    #[test]
    fn test_kilobytes_rounding() {
        assert_eq!(kilobytes(0), 0.0);
        assert_eq!(kilobytes(204800), 200.00);
        assert_eq!(kilobytes(1024), 1.0);
        assert_eq!(kilobytes(1536), 1.5);
        assert_eq!(kilobytes(100), 0.1);
    }

    #[test]
    fn test_path_and_full_path_start_at_source() {
        let record = FileRecord::from_upload(&upload("a.txt", "text/plain", 1));
        assert_eq!(record.path, "/tmp/upload_3f9a");
        assert_eq!(record.full_path, record.path);
    }

    #[test]
    fn test_from_path_missing_file_is_source_not_found() {
        let err = FileRecord::from_path("/nonexistent/nowhere.bin").unwrap_err();
        assert!(matches!(err, RecordError::SourceNotFound { .. }));
    }

    #[test]
    fn test_from_path_directory_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileRecord::from_path(dir.path()).unwrap_err();
        assert!(matches!(err, RecordError::SourceNotFound { .. }));
    }

    #[test]
    fn test_from_path_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.TXT");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let record = FileRecord::from_path(&path).unwrap();
        assert_eq!(record.client_name, "notes.TXT");
        assert_eq!(record.extension, "txt");
        assert_eq!(record.mime, "text/plain");
        assert_eq!(record.size_kb, 2.0);
        assert!(!record.is_image);
        assert_eq!(record.path, path.display().to_string());
    }

    #[test]
    fn test_from_path_probes_png_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        // 1x1 black pixel
        let pixel = image::RgbImage::new(1, 1);
        pixel.save(&path).unwrap();

        let record = FileRecord::from_path(&path).unwrap();
        assert!(record.is_image);
        assert_eq!(record.mime, "image/png");
        assert_eq!(record.image_width, Some(1));
        assert_eq!(record.image_height, Some(1));
        assert_eq!(
            record.image_size_str.as_deref(),
            Some("width=\"1\" height=\"1\"")
        );
    }

    #[test]
    fn test_export_has_every_key_for_both_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.bin");
        std::fs::write(&path, b"12345").unwrap();

        let from_upload = FileRecord::from_upload(&upload("file.bin", "application/octet-stream", 5));
        let from_path = FileRecord::from_path(&path).unwrap();

        for record in [from_upload, from_path] {
            let value = serde_json::to_value(record.export()).unwrap();
            let object = value.as_object().unwrap();
            for key in [
                "file_name",
                "file_type",
                "file_path",
                "full_path",
                "raw_name",
                "client_name",
                "file_ext",
                "file_size",
                "is_image",
                "image_width",
                "image_height",
                "image_type",
                "image_size_str",
            ] {
                assert!(object.contains_key(key), "missing key {key}");
            }
            assert_eq!(object.len(), 13);
        }
    }

    #[test]
    fn test_successive_builds_never_collide() {
        let a = FileRecord::from_upload(&upload("same.txt", "text/plain", 1));
        let b = FileRecord::from_upload(&upload("same.txt", "text/plain", 1));
        assert_ne!(a.generated_name, b.generated_name);
    }
}
