//! Package filename grammar
//! - filename.rs: parses `{name}-{version}-{arch}.pkg.tar.zst` object names

pub mod filename;

pub use filename::{FilenameParser, PackageFilename, PKG_SUFFIX, SIG_SUFFIX};
