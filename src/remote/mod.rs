//! HTTP collaborators
//! - aur.rs: AUR RPC client, the upstream version source
//! - github.rs: GitHub workflow-dispatch client for triggering rebuilds
//! - error.rs: error types for both

pub mod aur;
pub mod error;
pub mod github;

pub use aur::{AurClient, UpstreamSource};
pub use error::{DispatchError, UpstreamError};
pub use github::{BuildDispatcher, WorkflowDispatcher};
