use crate::backend::{StorageBackend, StoredLocation};
use crate::StorageError;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::{primitives::ByteStream, types::ObjectCannedAcl, Client};
use bytes::Bytes;
use depot_config::{S3Settings, StorageConfig};
use depot_record::FileRecord;
use std::path::Path;
use std::time::Duration;

/// S3-compatible storage backend
/// Compatible with: Cloudflare R2, AWS S3, MinIO, DigitalOcean Spaces, etc.
pub struct S3Backend {
    client: Client,
    bucket_name: String,
    endpoint_url: String,
    public_url: String,
    bucket_prefix: String,
    acl: ObjectCannedAcl,
    exists_timeout: Duration,
    exists_poll_interval: Duration,
}

impl S3Backend {
    pub async fn new(settings: &S3Settings) -> Result<Self, StorageError> {
        let credentials = Credentials::new(
            settings.access_key_id.clone(),
            settings.secret_access_key.clone(),
            None,
            None,
            "depot-s3",
        );

        let config = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(settings.region.clone()))
            .endpoint_url(settings.endpoint_url.clone())
            .load()
            .await;

        Ok(Self {
            client: Client::new(&config),
            bucket_name: settings.bucket_name.clone(),
            endpoint_url: settings.endpoint_url.clone(),
            public_url: settings.public_url.clone(),
            bucket_prefix: settings.bucket_prefix.clone(),
            acl: ObjectCannedAcl::from(settings.acl.as_str()),
            exists_timeout: Duration::from_secs(settings.exists_timeout_secs),
            exists_poll_interval: Duration::from_millis(settings.exists_poll_interval_ms),
        })
    }

    fn build_key(&self, remote_key: &str) -> String {
        if self.bucket_prefix.is_empty() {
            remote_key.to_string()
        } else {
            format!("{}/{}", self.bucket_prefix, remote_key)
        }
    }

    /// Upload a local file. A precomputed MD5 (base64 digest) is passed
    /// straight through to the store when supplied; nothing is computed
    /// here.
    pub async fn put(
        &self,
        remote_key: &str,
        source: &Path,
        content_type: &str,
        content_md5: Option<String>,
    ) -> Result<(), StorageError> {
        let key = self.build_key(remote_key);

        tracing::info!("Uploading {} to S3 bucket {}", key, self.bucket_name);

        let file_data = tokio::fs::read(source).await?;
        let byte_stream = ByteStream::from(file_data);

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&key)
            .body(byte_stream)
            .acl(self.acl.clone())
            .set_content_md5(content_md5);
        if !content_type.is_empty() {
            request = request.content_type(content_type);
        }

        request
            .send()
            .await
            .map_err(|e| StorageError::RemoteStoreFailure {
                key: key.clone(),
                reason: e.to_string(),
            })?;

        Ok(())
    }

    /// Fetch an object's content.
    pub async fn get(&self, remote_key: &str) -> Result<Bytes, StorageError> {
        let key = self.build_key(remote_key);

        let object = self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(&key)
            .send()
            .await
            .map_err(|e| StorageError::RemoteStoreFailure {
                key: key.clone(),
                reason: e.to_string(),
            })?;

        let data = object
            .body
            .collect()
            .await
            .map_err(|e| StorageError::RemoteStoreFailure {
                key,
                reason: e.to_string(),
            })?;

        Ok(data.into_bytes())
    }

    pub async fn delete(&self, remote_key: &str) -> Result<(), StorageError> {
        let key = self.build_key(remote_key);

        tracing::info!("Deleting {} from S3 bucket {}", key, self.bucket_name);

        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(&key)
            .send()
            .await
            .map_err(|e| StorageError::RemoteStoreFailure {
                key: key.clone(),
                reason: e.to_string(),
            })?;

        Ok(())
    }

    pub async fn exists(&self, remote_key: &str) -> Result<bool, StorageError> {
        let key = self.build_key(remote_key);

        match self
            .client
            .head_object()
            .bucket(&self.bucket_name)
            .key(&key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(StorageError::RemoteStoreFailure {
                        key,
                        reason: service_err.to_string(),
                    })
                }
            }
        }
    }

    /// Server-side copy within the bucket.
    pub async fn copy(&self, src_key: &str, dst_key: &str) -> Result<(), StorageError> {
        let copy_source = format!("{}/{}", self.bucket_name, self.build_key(src_key));

        self.client
            .copy_object()
            .bucket(&self.bucket_name)
            .copy_source(&copy_source)
            .key(self.build_key(dst_key))
            .send()
            .await
            .map_err(|e| StorageError::RemoteStoreFailure {
                key: copy_source,
                reason: e.to_string(),
            })?;

        Ok(())
    }

    pub fn public_url(&self, remote_key: &str) -> String {
        let key = self.build_key(remote_key);
        if self.public_url.is_empty() {
            format!("{}/{}/{}", self.endpoint_url, self.bucket_name, key)
        } else {
            format!("{}/{}", self.public_url, key)
        }
    }

    /// Block until a freshly written object is visible to reads. Object
    /// stores may exhibit read-after-write delay, so a successful put
    /// does not guarantee an immediate successful get; this wait is a
    /// correctness requirement, not an optimization.
    pub async fn wait_until_exists(&self, remote_key: &str) -> Result<(), StorageError> {
        let deadline = tokio::time::Instant::now() + self.exists_timeout;

        loop {
            if self.exists(remote_key).await? {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(StorageError::ObjectVisibilityTimeout {
                    key: self.build_key(remote_key),
                    waited_secs: self.exists_timeout.as_secs(),
                });
            }
            tokio::time::sleep(self.exists_poll_interval).await;
        }
    }
}

/// Remote key for a record: the custom name verbatim when set, otherwise
/// the client filename stripped of its extension as a pseudo-folder
/// prefix in front of the generated name.
fn object_key(record: &FileRecord) -> String {
    if let Some(name) = record.custom_name.as_deref().filter(|name| !name.is_empty()) {
        return name.to_string();
    }
    if record.client_name.is_empty() {
        return record.generated_name.clone();
    }

    let folder = if record.extension.is_empty() {
        record.client_name.as_str()
    } else {
        let suffix = format!(".{}", record.extension);
        match record.client_name.to_ascii_lowercase().find(&suffix) {
            Some(idx) => &record.client_name[..idx],
            None => record.client_name.as_str(),
        }
    };

    if folder.is_empty() {
        record.generated_name.clone()
    } else {
        format!("{}/{}", folder, record.generated_name)
    }
}

#[async_trait::async_trait]
impl StorageBackend for S3Backend {
    async fn store(
        &self,
        record: &FileRecord,
        _config: &StorageConfig,
    ) -> Result<StoredLocation, StorageError> {
        let key = object_key(record);

        self.put(&key, Path::new(&record.path), &record.mime, None)
            .await?;
        self.wait_until_exists(&key).await?;

        let url = self.public_url(&key);
        tracing::info!("Upload complete: {}", url);

        Ok(StoredLocation::new(url))
    }

    fn is_remote(&self) -> bool {
        true
    }
}
