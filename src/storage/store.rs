//! Store trait the mirror operations run against.

#[cfg(test)]
use mockall::automock;

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage configuration error: {0}")]
    Config(String),

    #[error("storage request failed: {0}")]
    Backend(#[from] ::s3::error::S3Error),
}

/// One object listed from the mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Full object key, e.g. `repo/localsend-bin-1.14.4-1-x86_64.pkg.tar.zst`
    pub key: String,
    /// Key with the repo prefix stripped; what the filename parser sees
    pub filename: String,
    /// Last-modified stamp when the backend reports one
    pub last_modified: Option<DateTime<Utc>>,
}

/// Listing and deletion against the bucket holding the mirror.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PackageStore: Send + Sync {
    /// List every object under the repo prefix. Directory markers are
    /// omitted; signature files and other non-package objects are not, the
    /// caller filters those through the filename parser.
    async fn list_objects(&self) -> Result<Vec<StoredObject>, StorageError>;

    /// Delete the given keys, returning how many were deleted. Absent keys
    /// are not an error.
    async fn delete_objects(&self, keys: &[String]) -> Result<usize, StorageError>;
}
