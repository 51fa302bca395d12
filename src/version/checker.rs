//! Decides whether a stored build is current with respect to upstream.

use std::cmp::Ordering;

use crate::version::arch::ArchVersion;

/// Outcome of comparing the upstream version against the stored build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    /// Nothing stored yet; a first build is needed
    NotStored,
    /// Upstream is newer than the stored build
    UpdateAvailable,
    /// Stored build matches upstream
    UpToDate,
    /// Stored build is ahead of upstream (e.g. a manual rebuild bump)
    StoredNewer,
}

impl UpdateStatus {
    /// Whether this status should trigger a rebuild.
    pub fn needs_build(self) -> bool {
        matches!(self, UpdateStatus::NotStored | UpdateStatus::UpdateAvailable)
    }
}

/// Compare an upstream version string against the stored one, if any.
pub fn update_status(upstream: &str, stored: Option<&str>) -> UpdateStatus {
    let Some(stored) = stored else {
        return UpdateStatus::NotStored;
    };

    match ArchVersion::parse(upstream).cmp(&ArchVersion::parse(stored)) {
        Ordering::Greater => UpdateStatus::UpdateAvailable,
        Ordering::Equal => UpdateStatus::UpToDate,
        Ordering::Less => UpdateStatus::StoredNewer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.14.4-1", None, UpdateStatus::NotStored)]
    #[case("1.17.0-1", Some("1.14.4-1"), UpdateStatus::UpdateAvailable)]
    #[case("1.14.4-2", Some("1.14.4-1"), UpdateStatus::UpdateAvailable)]
    #[case("1:0.1-1", Some("9.9.9-9"), UpdateStatus::UpdateAvailable)]
    #[case("1.14.4-1", Some("1.14.4-1"), UpdateStatus::UpToDate)]
    #[case("1.14.4-1", Some("1.17.0-1"), UpdateStatus::StoredNewer)]
    fn update_status_compares_against_stored(
        #[case] upstream: &str,
        #[case] stored: Option<&str>,
        #[case] expected: UpdateStatus,
    ) {
        assert_eq!(update_status(upstream, stored), expected);
    }

    #[rstest]
    #[case(UpdateStatus::NotStored, true)]
    #[case(UpdateStatus::UpdateAvailable, true)]
    #[case(UpdateStatus::UpToDate, false)]
    #[case(UpdateStatus::StoredNewer, false)]
    fn needs_build_covers_missing_and_outdated(
        #[case] status: UpdateStatus,
        #[case] expected: bool,
    ) {
        assert_eq!(status.needs_build(), expected);
    }
}
