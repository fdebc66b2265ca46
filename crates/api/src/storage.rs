//! Upload key and report location backends.
//!
//! The broker never moves file bytes. A backend only decides where a client
//! should put an upload, where an error report can be fetched, and (for the
//! bucket backend) which temporary credentials the client uploads with.

use std::path::PathBuf;
use std::sync::Arc;

use broker_core::lookups::FileType;
use broker_core::naming::upload_key;
use broker_core::types::DbId;
use serde::Serialize;

use crate::config::{RemoteStorageConfig, StorageConfig};

/// Temporary credentials a client uses to upload directly to the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadCredentials {
    #[serde(rename = "AccessKeyId")]
    pub access_key_id: String,
    #[serde(rename = "SecretAccessKey")]
    pub secret_access_key: String,
    #[serde(rename = "SessionToken")]
    pub session_token: String,
}

/// Everything a client needs besides the key to upload to a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadGrant {
    pub credentials: UploadCredentials,
    pub bucket_name: String,
}

/// Where uploads and error reports live.
pub trait FileStorage: Send + Sync {
    /// Key the client uploads `filename` of `file_type` to.
    fn upload_key(
        &self,
        user_id: DbId,
        unix_seconds: i64,
        file_type: FileType,
        filename: &str,
    ) -> String;

    /// Location a client fetches the named error report from.
    fn report_location(&self, report_name: &str) -> String;

    /// Credentials and bucket handed out with upload keys, if any.
    fn upload_grant(&self) -> Option<UploadGrant>;
}

/// Files under a directory on the broker host.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileStorage for LocalStorage {
    fn upload_key(
        &self,
        user_id: DbId,
        unix_seconds: i64,
        file_type: FileType,
        filename: &str,
    ) -> String {
        self.root
            .join(upload_key(user_id, unix_seconds, file_type, filename))
            .to_string_lossy()
            .into_owned()
    }

    fn report_location(&self, report_name: &str) -> String {
        self.root.join(report_name).to_string_lossy().into_owned()
    }

    fn upload_grant(&self) -> Option<UploadGrant> {
        None
    }
}

/// Files in an S3 bucket.
#[derive(Debug, Clone)]
pub struct BucketStorage {
    config: RemoteStorageConfig,
}

impl BucketStorage {
    pub fn new(config: RemoteStorageConfig) -> Self {
        Self { config }
    }
}

impl FileStorage for BucketStorage {
    fn upload_key(
        &self,
        user_id: DbId,
        unix_seconds: i64,
        file_type: FileType,
        filename: &str,
    ) -> String {
        upload_key(user_id, unix_seconds, file_type, filename)
    }

    fn report_location(&self, report_name: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{report_name}",
            self.config.bucket, self.config.region
        )
    }

    fn upload_grant(&self) -> Option<UploadGrant> {
        Some(UploadGrant {
            credentials: UploadCredentials {
                access_key_id: self.config.access_key_id.clone(),
                secret_access_key: self.config.secret_access_key.clone(),
                session_token: self.config.session_token.clone(),
            },
            bucket_name: self.config.bucket.clone(),
        })
    }
}

/// Build the backend selected by configuration.
pub fn storage_from_config(config: &StorageConfig) -> Arc<dyn FileStorage> {
    match config {
        StorageConfig::Local { broker_files } => Arc::new(LocalStorage::new(broker_files.clone())),
        StorageConfig::Remote(remote) => Arc::new(BucketStorage::new(remote.clone())),
    }
}
