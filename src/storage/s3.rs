//! S3-compatible implementation of [`PackageStore`].
//!
//! Works against Cloudflare R2 (the deployment target) and anything else
//! speaking the S3 protocol through a custom endpoint with path-style
//! addressing.

use ::s3::creds::Credentials;
use ::s3::{Bucket, Region};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::StorageConfig;
use crate::storage::store::{PackageStore, StorageError, StoredObject};

pub struct S3PackageStore {
    bucket: Box<Bucket>,
    prefix: String,
}

impl S3PackageStore {
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let credentials = Credentials::new(
            Some(&config.access_key_id),
            Some(&config.secret_access_key),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Config(e.to_string()))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let bucket = Bucket::new(&config.bucket, region, credentials)?.with_path_style();

        Ok(Self {
            bucket,
            prefix: config.prefix.clone(),
        })
    }
}

#[async_trait::async_trait]
impl PackageStore for S3PackageStore {
    async fn list_objects(&self) -> Result<Vec<StoredObject>, StorageError> {
        let pages = self.bucket.list(self.prefix.clone(), None).await?;

        let mut objects = Vec::new();
        for page in pages {
            for object in page.contents {
                if object.key.ends_with('/') {
                    continue;
                }
                let filename = object
                    .key
                    .strip_prefix(&self.prefix)
                    .unwrap_or(&object.key)
                    .to_string();
                let last_modified = DateTime::parse_from_rfc3339(&object.last_modified)
                    .ok()
                    .map(|stamp| stamp.with_timezone(&Utc));

                objects.push(StoredObject {
                    key: object.key,
                    filename,
                    last_modified,
                });
            }
        }

        debug!(
            "Listed {} objects under {}/{}",
            objects.len(),
            self.bucket.name(),
            self.prefix
        );

        Ok(objects)
    }

    async fn delete_objects(&self, keys: &[String]) -> Result<usize, StorageError> {
        let mut deleted = 0;
        for key in keys {
            self.bucket.delete_object(key).await?;
            debug!("Deleted {}", key);
            deleted += 1;
        }
        Ok(deleted)
    }
}
