//! AUR RPC API client
//!
//! One batched `info` query fetches the current version of every watched
//! package: `GET /rpc?v=5&type=info&arg[]=foo&arg[]=bar`.

use std::collections::HashMap;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::HTTP_TIMEOUT_SECS;
use crate::remote::error::UpstreamError;

/// Default base URL for the AUR RPC API
const DEFAULT_BASE_URL: &str = "https://aur.archlinux.org";

/// Source of upstream package versions.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait UpstreamSource: Send + Sync {
    /// Fetch the current version for each named package.
    ///
    /// Packages unknown upstream are simply absent from the returned map.
    async fn package_versions(
        &self,
        packages: &[String],
    ) -> Result<HashMap<String, String>, UpstreamError>;
}

/// Response envelope of the AUR RPC v5 API
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    results: Vec<RpcPackage>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RpcPackage {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Version")]
    version: String,
}

/// Client for the AUR RPC API
pub struct AurClient {
    client: reqwest::Client,
    base_url: String,
}

impl AurClient {
    /// Creates a new AurClient with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("aurkeep")
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
        }
    }
}

impl Default for AurClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl UpstreamSource for AurClient {
    async fn package_versions(
        &self,
        packages: &[String],
    ) -> Result<HashMap<String, String>, UpstreamError> {
        if packages.is_empty() {
            return Ok(HashMap::new());
        }

        let url = format!("{}/rpc", self.base_url);
        let mut query: Vec<(&str, &str)> = vec![("v", "5"), ("type", "info")];
        for package in packages {
            query.push(("arg[]", package.as_str()));
        }

        debug!("Querying AUR for {} packages", packages.len());

        let response = self.client.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("AUR RPC returned status {}: {}", status, url);
            return Err(UpstreamError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let rpc: RpcResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse AUR RPC response: {}", e);
            UpstreamError::InvalidResponse(e.to_string())
        })?;

        if rpc.kind == "error" {
            return Err(UpstreamError::Rpc(
                rpc.error.unwrap_or_else(|| "unspecified error".to_string()),
            ));
        }

        Ok(rpc
            .results
            .into_iter()
            .map(|package| (package.name, package.version))
            .collect())
    }
}
