//! Object-storage access for the package mirror
//! - store.rs: `PackageStore` trait and listing types
//! - s3.rs: S3/R2 implementation over `rust-s3`

pub mod s3;
pub mod store;

pub use s3::S3PackageStore;
pub use store::{PackageStore, StorageError, StoredObject};
