//! Structured, totally-ordered representation of pacman version strings.
//!
//! Format: `[epoch:]pkgver[-pkgrel]`, e.g. `1.14.4-1`, `1:2.0-3`,
//! `7.5.0.r4.g1a2b3c4-1`, `20240101`. The epoch dominates everything, then
//! the pkgver segments left to right, then the release number.

use std::cmp::Ordering;

/// One classified token of a pkgver.
///
/// Digit runs merge into a single `Numeric` segment; letters and punctuation
/// are emitted one segment per character. At a mismatched position a number
/// sorts before a letter, which sorts before punctuation; the variant order
/// here is that rank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A run of ASCII digits, kept as text so length is unbounded
    Numeric(String),
    /// A single letter
    Alpha(char),
    /// A single non-alphanumeric character
    Separator(char),
}

impl Segment {
    fn rank(&self) -> u8 {
        match self {
            Segment::Numeric(_) => 0,
            Segment::Alpha(_) => 1,
            Segment::Separator(_) => 2,
        }
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Numeric(a), Segment::Numeric(b)) => cmp_digit_runs(a, b),
            (Segment::Alpha(a), Segment::Alpha(b)) => a.cmp(b),
            (Segment::Separator(a), Segment::Separator(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two digit runs by numeric value.
///
/// Stripping leading zeros and comparing length before content is exact for
/// any run length, so `20240101` and git-date runs never overflow anything.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Parsed version key. Built per comparison, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchVersion {
    pub epoch: u64,
    pub segments: Vec<Segment>,
    pub release: u64,
}

impl ArchVersion {
    /// Parse a version string. Total: there is no malformed input, only
    /// fields that default to zero.
    ///
    /// - epoch: text before the first `:`, `0` when absent or non-numeric
    /// - release: text after the last `-`, `0` when absent or non-numeric
    /// - everything between is the pkgver and becomes the segment list
    pub fn parse(version: &str) -> Self {
        let (epoch, rest) = match version.split_once(':') {
            Some((epoch, rest)) => (epoch.parse().unwrap_or(0), rest),
            None => (0, version),
        };

        let (pkgver, release) = match rest.rsplit_once('-') {
            Some((pkgver, release)) => (pkgver, release.parse().unwrap_or(0)),
            None => (rest, 0),
        };

        Self {
            epoch,
            segments: segment(pkgver),
            release,
        }
    }
}

impl From<&str> for ArchVersion {
    fn from(version: &str) -> Self {
        Self::parse(version)
    }
}

fn segment(pkgver: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut digits = String::new();

    for c in pkgver.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if !digits.is_empty() {
            segments.push(Segment::Numeric(std::mem::take(&mut digits)));
        }
        if c.is_alphabetic() {
            segments.push(Segment::Alpha(c));
        } else {
            segments.push(Segment::Separator(c));
        }
    }
    if !digits.is_empty() {
        segments.push(Segment::Numeric(digits));
    }

    segments
}

impl Ord for ArchVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| {
                for (a, b) in self.segments.iter().zip(&other.segments) {
                    let ord = a.cmp(b);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                // A version that keeps going past the common prefix is newer.
                self.segments.len().cmp(&other.segments.len())
            })
            .then_with(|| self.release.cmp(&other.release))
    }
}

impl PartialOrd for ArchVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
