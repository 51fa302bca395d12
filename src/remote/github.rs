//! GitHub workflow-dispatch client
//!
//! Rebuilds happen in CI: triggering one is a `workflow_dispatch` POST
//! against the mirror repository, with the package name as workflow input.

use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use serde_json::json;
use tracing::warn;

use crate::config::{DEFAULT_WORKFLOW, DEFAULT_WORKFLOW_REF, HTTP_TIMEOUT_SECS};
use crate::remote::error::DispatchError;

/// Default base URL for the GitHub API
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Triggers rebuild jobs for packages.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait BuildDispatcher: Send + Sync {
    /// Kick off a build for one package.
    async fn trigger_build(&self, package: &str) -> Result<(), DispatchError>;
}

/// Dispatcher backed by the GitHub Actions API
pub struct WorkflowDispatcher {
    client: reqwest::Client,
    base_url: String,
    repository: String,
    token: String,
    workflow: String,
    workflow_ref: String,
}

impl WorkflowDispatcher {
    pub fn new(repository: &str, token: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, repository, token)
    }

    /// Creates a dispatcher against a custom API base URL
    pub fn with_base_url(base_url: &str, repository: &str, token: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("aurkeep")
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
            repository: repository.to_string(),
            token: token.to_string(),
            workflow: DEFAULT_WORKFLOW.to_string(),
            workflow_ref: DEFAULT_WORKFLOW_REF.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl BuildDispatcher for WorkflowDispatcher {
    async fn trigger_build(&self, package: &str) -> Result<(), DispatchError> {
        let url = format!(
            "{}/repos/{}/actions/workflows/{}/dispatches",
            self.base_url, self.repository, self.workflow
        );

        let body = json!({
            "ref": self.workflow_ref,
            "inputs": { "repo-name": package },
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DispatchError::WorkflowNotFound {
                repository: self.repository.clone(),
            });
        }

        if !status.is_success() {
            warn!("Workflow dispatch for {} returned {}", package, status);
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
