//! Parser for pacman package filenames.
//!
//! A package object in the mirror is named
//! `{name}-{version}-{arch}.pkg.tar.zst`, e.g.
//! `localsend-bin-1.14.4-1-x86_64.pkg.tar.zst`. The name itself may contain
//! hyphens and digits, so the split point between name and version is the
//! *first* hyphen followed by a dotted numeric run, not the last hyphen.

use std::fmt;

use regex::Regex;

/// File extension of every package object
pub const PKG_SUFFIX: &str = ".pkg.tar.zst";

/// File extension of detached signatures stored next to packages
pub const SIG_SUFFIX: &str = ".sig";

/// One parsed package filename.
///
/// `version` is the full pacman version (`pkgver-pkgrel`, possibly with an
/// epoch prefix); splitting it further is the version comparator's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageFilename {
    pub name: String,
    pub version: String,
    pub arch: String,
}

impl fmt::Display for PackageFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}{}",
            self.name, self.version, self.arch, PKG_SUFFIX
        )
    }
}

/// Parser for package filenames.
///
/// Anything that is not a well-formed package filename parses to `None`;
/// callers skip those objects (signatures, directory markers, stray files).
pub struct FilenameParser {
    /// Trailing architecture token: `-x86_64` etc., anchored at the end
    arch_re: Regex,
    /// First hyphen that starts a dotted numeric run (the version start)
    version_start_re: Regex,
    /// Whitelist for the whole package name
    name_re: Regex,
    /// Whitelist for the architecture token
    arch_token_re: Regex,
}

impl FilenameParser {
    pub fn new() -> Self {
        Self {
            arch_re: Regex::new(r"-(x86_64|i686|armv7h|aarch64)$").unwrap(),
            version_start_re: Regex::new(r"-\d+(\.\d+)*").unwrap(),
            name_re: Regex::new(r"^[A-Za-z0-9@._+-]+$").unwrap(),
            arch_token_re: Regex::new(r"^[A-Za-z0-9_]+$").unwrap(),
        }
    }

    /// Parse a package filename into its `(name, version, arch)` parts.
    ///
    /// Returns `None` for anything that is not a package: wrong extension,
    /// unknown architecture, no version, or a name outside the whitelist.
    /// There is no partial success; a filename either fully parses or is
    /// rejected.
    pub fn parse(&self, filename: &str) -> Option<PackageFilename> {
        let base = filename.strip_suffix(PKG_SUFFIX)?;

        let arch_match = self.arch_re.find(base)?;
        let arch = &base[arch_match.start() + 1..];
        let base = &base[..arch_match.start()];

        // First hyphen leading a dotted digit run separates name from
        // version; names like `localsend-bin` keep their own hyphens.
        let version_match = self.version_start_re.find(base)?;
        let name = &base[..version_match.start()];
        let version = &base[version_match.start() + 1..];

        if !self.name_re.is_match(name) {
            return None;
        }
        if !self.arch_token_re.is_match(arch) {
            return None;
        }

        Some(PackageFilename {
            name: name.to_string(),
            version: version.to_string(),
            arch: arch.to_string(),
        })
    }
}

impl Default for FilenameParser {
    fn default() -> Self {
        Self::new()
    }
}
