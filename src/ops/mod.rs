//! Mirror operations
//!
//! - [`check`]: compare AUR versions against the mirror, trigger rebuilds
//! - [`clean`]: delete package files superseded by a newer build
//!
//! Both start from the same inventory step: list the bucket and keep every
//! object whose name parses as a package filename.

pub mod check;
pub mod clean;

pub use check::{CheckSummary, run_check};
pub use clean::{CleanOptions, CleanSummary, run_clean};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use crate::package::{FilenameParser, PackageFilename};
use crate::remote::error::UpstreamError;
use crate::storage::{PackageStore, StorageError};
use crate::version::ArchVersion;

#[derive(Debug, Error)]
pub enum OpsError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// One package file currently present in the mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPackage {
    pub file: PackageFilename,
    /// Full object key, used for deletion
    pub key: String,
    pub last_modified: Option<DateTime<Utc>>,
}

/// List the mirror and parse every package object.
///
/// Signatures, directory markers, and stray files do not parse and are
/// skipped silently.
pub(crate) async fn stored_packages<S>(store: &S) -> Result<Vec<StoredPackage>, StorageError>
where
    S: PackageStore + ?Sized,
{
    let parser = FilenameParser::new();
    let objects = store.list_objects().await?;
    let total = objects.len();

    let packages: Vec<StoredPackage> = objects
        .into_iter()
        .filter_map(|object| {
            parser.parse(&object.filename).map(|file| StoredPackage {
                file,
                key: object.key,
                last_modified: object.last_modified,
            })
        })
        .collect();

    debug!(
        "{} of {} listed objects are package files",
        packages.len(),
        total
    );

    Ok(packages)
}

/// Group stored packages by name and keep the newest per name, preserving
/// listing order of first appearance.
pub(crate) fn latest_by_name(packages: &[StoredPackage]) -> IndexMap<String, &StoredPackage> {
    let mut latest: IndexMap<String, &StoredPackage> = IndexMap::new();

    for package in packages {
        match latest.get_mut(&package.file.name) {
            Some(current) => {
                let newer = ArchVersion::parse(&package.file.version)
                    > ArchVersion::parse(&current.file.version);
                if newer {
                    *current = package;
                }
            }
            None => {
                latest.insert(package.file.name.clone(), package);
            }
        }
    }

    latest
}

#[cfg(test)]
pub(crate) fn stored(name: &str, version: &str, arch: &str, prefix: &str) -> StoredPackage {
    let file = PackageFilename {
        name: name.to_string(),
        version: version.to_string(),
        arch: arch.to_string(),
    };
    let key = format!("{prefix}{file}");
    StoredPackage {
        file,
        key,
        last_modified: None,
    }
}
