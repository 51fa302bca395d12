//! Update check: is the mirror behind the AUR, and for which packages?

use futures::future::join_all;
use tracing::{info, warn};

use crate::ops::{OpsError, latest_by_name, stored_packages};
use crate::remote::aur::UpstreamSource;
use crate::remote::github::BuildDispatcher;
use crate::storage::PackageStore;
use crate::version::{UpdateStatus, update_status};

/// What a `check` run found and did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Packages for which a rebuild workflow was dispatched
    pub triggered: Vec<String>,
    /// Packages that needed a rebuild but whose dispatch failed
    pub failed: Vec<String>,
    /// Watched packages the AUR no longer knows about
    pub missing_upstream: Vec<String>,
    /// Packages whose stored build is current (or ahead of upstream)
    pub up_to_date: usize,
}

/// Compare every watched package against the newest stored build and
/// dispatch rebuilds for anything missing or outdated.
///
/// Dispatch failures are per-package: they are logged, recorded in the
/// summary, and do not stop the remaining dispatches.
pub async fn run_check<S, U, D>(
    store: &S,
    upstream: &U,
    dispatcher: &D,
    packages: &[String],
) -> Result<CheckSummary, OpsError>
where
    S: PackageStore + ?Sized,
    U: UpstreamSource + ?Sized,
    D: BuildDispatcher + ?Sized,
{
    let upstream_versions = upstream.package_versions(packages).await?;
    info!(
        "AUR knows {} of {} watched packages",
        upstream_versions.len(),
        packages.len()
    );

    let inventory = stored_packages(store).await?;
    let newest = latest_by_name(&inventory);

    let mut summary = CheckSummary::default();
    let mut to_build = Vec::new();

    for package in packages {
        let Some(aur_version) = upstream_versions.get(package) else {
            warn!("{} not found in AUR", package);
            summary.missing_upstream.push(package.clone());
            continue;
        };

        let stored_version = newest.get(package).map(|p| p.file.version.as_str());

        match update_status(aur_version, stored_version) {
            UpdateStatus::NotStored => {
                info!("New package: {} ({})", package, aur_version);
                to_build.push(package.clone());
            }
            UpdateStatus::UpdateAvailable => {
                info!(
                    "Update available: {} (AUR {}, stored {})",
                    package,
                    aur_version,
                    stored_version.unwrap_or("-")
                );
                to_build.push(package.clone());
            }
            UpdateStatus::UpToDate | UpdateStatus::StoredNewer => {
                summary.up_to_date += 1;
            }
        }
    }

    let dispatches = to_build.iter().map(|package| async move {
        let result = dispatcher.trigger_build(package).await;
        (package.clone(), result)
    });

    for (package, result) in join_all(dispatches).await {
        match result {
            Ok(()) => {
                info!("Build triggered for {}", package);
                summary.triggered.push(package);
            }
            Err(e) => {
                warn!("Failed to trigger build for {}: {}", package, e);
                summary.failed.push(package);
            }
        }
    }

    Ok(summary)
}
