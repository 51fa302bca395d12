//! Lifecycle management for an AUR binary package mirror on object storage.
//!
//! The mirror holds pacman packages built from the AUR. Two operations keep
//! it healthy:
//!
//! - [`ops::check`]: compare AUR versions against the newest stored build and
//!   trigger a rebuild workflow for anything missing or outdated.
//! - [`ops::clean`]: delete every package file superseded by a newer build.
//!
//! Both are thin orchestration over two pure components: the package
//! filename grammar in [`package`] and the version order in [`version`].

pub mod config;
pub mod ops;
pub mod package;
pub mod remote;
pub mod storage;
pub mod version;
