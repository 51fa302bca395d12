//! Prune: delete every package file superseded by a newer build.

use indexmap::IndexSet;
use tracing::{info, warn};

use crate::ops::{OpsError, latest_by_name, stored_packages};
use crate::package::SIG_SUFFIX;
use crate::storage::PackageStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOptions {
    /// Log what would be deleted without deleting anything
    pub dry_run: bool,
    /// Upper bound on packages removed per run; each package accounts for
    /// two keys (the file and its signature)
    pub max_deletions: usize,
}

/// What a `clean` run found and did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanSummary {
    /// Package files present in the mirror before the run
    pub examined: usize,
    /// Keys deleted, or slated for deletion in a dry run
    pub deleted_keys: Vec<String>,
    /// Names of packages that lost at least one file; input for any
    /// external index-regeneration step
    pub removed_names: Vec<String>,
    /// Whether the deletion cap cut the run short
    pub truncated: bool,
    pub dry_run: bool,
}

/// Keep the newest version of every package, delete the rest.
///
/// Every stale package file is deleted together with its detached `.sig`
/// signature. Grouping is by package name: of several architectures only
/// the file matching the newest version's `(version, arch)` pair survives.
pub async fn run_clean<S>(store: &S, options: &CleanOptions) -> Result<CleanSummary, OpsError>
where
    S: PackageStore + ?Sized,
{
    let inventory = stored_packages(store).await?;
    let latest = latest_by_name(&inventory);

    info!(
        "{} package files across {} packages",
        inventory.len(),
        latest.len()
    );

    let mut summary = CleanSummary {
        examined: inventory.len(),
        dry_run: options.dry_run,
        ..CleanSummary::default()
    };
    let mut removed_names = IndexSet::new();
    let key_cap = options.max_deletions * 2;

    for package in &inventory {
        let newest = &latest[&package.file.name];
        if package.file.version == newest.file.version && package.file.arch == newest.file.arch {
            continue;
        }

        if summary.deleted_keys.len() >= key_cap {
            warn!(
                "Reached maximum deletion limit ({} packages)",
                options.max_deletions
            );
            summary.truncated = true;
            break;
        }

        summary.deleted_keys.push(package.key.clone());
        summary.deleted_keys.push(format!("{}{}", package.key, SIG_SUFFIX));
        removed_names.insert(package.file.name.clone());
    }

    summary.removed_names = removed_names.into_iter().collect();

    if summary.deleted_keys.is_empty() {
        info!("No old versions to delete");
        return Ok(summary);
    }

    if options.dry_run {
        info!("DRY RUN: would delete {} keys", summary.deleted_keys.len());
        for key in &summary.deleted_keys {
            info!("  - {}", key);
        }
        return Ok(summary);
    }

    let deleted = store.delete_objects(&summary.deleted_keys).await?;
    info!("Deleted {} keys", deleted);

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{StoredPackage, stored};
    use crate::storage::StoredObject;
    use crate::storage::store::MockPackageStore;

    fn store_with(packages: Vec<StoredPackage>) -> MockPackageStore {
        let objects: Vec<StoredObject> = packages
            .into_iter()
            .map(|p| StoredObject {
                filename: p.file.to_string(),
                key: p.key,
                last_modified: None,
            })
            .collect();
        let mut store = MockPackageStore::new();
        store
            .expect_list_objects()
            .returning(move || Ok(objects.clone()));
        store
    }

    fn options() -> CleanOptions {
        CleanOptions {
            dry_run: false,
            max_deletions: 50,
        }
    }

    #[tokio::test]
    async fn run_clean_deletes_superseded_files_and_their_signatures() {
        let mut store = store_with(vec![
            stored("localsend-bin", "1.14.4-1", "x86_64", "repo/"),
            stored("localsend-bin", "1.17.0-1", "x86_64", "repo/"),
            stored("claude-code", "2.1.59-1", "x86_64", "repo/"),
        ]);
        store
            .expect_delete_objects()
            .withf(|keys: &[String]| {
                keys == [
                    "repo/localsend-bin-1.14.4-1-x86_64.pkg.tar.zst",
                    "repo/localsend-bin-1.14.4-1-x86_64.pkg.tar.zst.sig",
                ]
            })
            .times(1)
            .returning(|keys| Ok(keys.len()));

        let summary = run_clean(&store, &options()).await.unwrap();

        assert_eq!(summary.examined, 3);
        assert_eq!(summary.deleted_keys.len(), 2);
        assert_eq!(summary.removed_names, vec!["localsend-bin"]);
        assert!(!summary.truncated);
    }

    #[tokio::test]
    async fn run_clean_keeps_everything_when_all_packages_are_current() {
        let mut store = store_with(vec![
            stored("localsend-bin", "1.17.0-1", "x86_64", "repo/"),
            stored("claude-code", "2.1.59-1", "x86_64", "repo/"),
        ]);
        store.expect_delete_objects().times(0);

        let summary = run_clean(&store, &options()).await.unwrap();

        assert!(summary.deleted_keys.is_empty());
        assert!(summary.removed_names.is_empty());
    }

    #[tokio::test]
    async fn run_clean_dry_run_deletes_nothing() {
        let mut store = store_with(vec![
            stored("localsend-bin", "1.14.4-1", "x86_64", "repo/"),
            stored("localsend-bin", "1.17.0-1", "x86_64", "repo/"),
        ]);
        store.expect_delete_objects().times(0);

        let summary = run_clean(
            &store,
            &CleanOptions {
                dry_run: true,
                max_deletions: 50,
            },
        )
        .await
        .unwrap();

        assert!(summary.dry_run);
        assert_eq!(summary.deleted_keys.len(), 2);
    }

    #[tokio::test]
    async fn run_clean_honors_the_deletion_cap() {
        let mut store = store_with(vec![
            stored("a", "1.0-1", "x86_64", "repo/"),
            stored("a", "2.0-1", "x86_64", "repo/"),
            stored("b", "1.0-1", "x86_64", "repo/"),
            stored("b", "2.0-1", "x86_64", "repo/"),
            stored("c", "1.0-1", "x86_64", "repo/"),
            stored("c", "2.0-1", "x86_64", "repo/"),
        ]);
        store
            .expect_delete_objects()
            .withf(|keys: &[String]| keys.len() == 2)
            .times(1)
            .returning(|keys| Ok(keys.len()));

        let summary = run_clean(
            &store,
            &CleanOptions {
                dry_run: false,
                max_deletions: 1,
            },
        )
        .await
        .unwrap();

        assert!(summary.truncated);
        assert_eq!(summary.deleted_keys.len(), 2);
        assert_eq!(summary.removed_names.len(), 1);
    }

    #[tokio::test]
    async fn run_clean_retires_stale_architectures_of_the_newest_version() {
        // Only the (version, arch) pair of the newest build survives; an
        // aarch64 file left over from an older naming scheme goes away.
        let mut store = store_with(vec![
            stored("localsend-bin", "1.17.0-1", "x86_64", "repo/"),
            stored("localsend-bin", "1.17.0-1", "aarch64", "repo/"),
        ]);
        store
            .expect_delete_objects()
            .withf(|keys: &[String]| {
                keys == [
                    "repo/localsend-bin-1.17.0-1-aarch64.pkg.tar.zst",
                    "repo/localsend-bin-1.17.0-1-aarch64.pkg.tar.zst.sig",
                ]
            })
            .times(1)
            .returning(|keys| Ok(keys.len()));

        let summary = run_clean(&store, &options()).await.unwrap();
        assert_eq!(summary.deleted_keys.len(), 2);
    }
}
