use thiserror::Error;

// =============================================================================
// Defaults
// =============================================================================

/// Object key prefix under which package files live in the bucket
pub const DEFAULT_PREFIX: &str = "repo/";

/// Maximum number of packages removed by a single `clean` run
pub const DEFAULT_MAX_DELETIONS: usize = 50;

/// Workflow file dispatched for package rebuilds
pub const DEFAULT_WORKFLOW: &str = "build.yml";

/// Git ref the rebuild workflow runs on
pub const DEFAULT_WORKFLOW_REF: &str = "master";

/// Timeout for HTTP requests in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("environment variable {0} must not be empty")]
    EmptyVar(&'static str),
}

/// Connection settings for the S3-compatible bucket holding the mirror.
///
/// Read from the same environment contract the deployment workflows use:
/// `AWS_S3_BUCKET`, `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`,
/// `AWS_S3_ENDPOINT`, and optionally `AWS_S3_REGION` / `REPO_PREFIX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub endpoint: String,
    pub region: String,
    pub prefix: String,
}

/// Settings for triggering rebuild workflows: `GH_TOKEN`, `GH_REPOSITORY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
    pub token: String,
    pub repository: String,
}

/// Everything the `check` command needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Package names to watch, from the space-separated `PACKAGES` variable
    pub packages: Vec<String>,
    pub storage: StorageConfig,
    pub github: GithubConfig,
}

/// Everything the `clean` command needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanConfig {
    pub storage: StorageConfig,
    pub dry_run: bool,
    pub max_deletions: usize,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            bucket: required(&get, "AWS_S3_BUCKET")?,
            access_key_id: required(&get, "AWS_ACCESS_KEY_ID")?,
            secret_access_key: required(&get, "AWS_SECRET_ACCESS_KEY")?,
            endpoint: required(&get, "AWS_S3_ENDPOINT")?,
            // R2 ignores the region but the S3 protocol requires one
            region: get("AWS_S3_REGION").unwrap_or_else(|| "auto".to_string()),
            prefix: get("REPO_PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
        })
    }
}

impl GithubConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            token: required(&get, "GH_TOKEN")?,
            repository: required(&get, "GH_REPOSITORY")?,
        })
    }
}

impl CheckConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String> + Copy) -> Result<Self, ConfigError> {
        let packages = parse_package_list(&required(&get, "PACKAGES")?);
        if packages.is_empty() {
            return Err(ConfigError::EmptyVar("PACKAGES"));
        }

        Ok(Self {
            packages,
            storage: StorageConfig::from_lookup(get)?,
            github: GithubConfig::from_lookup(get)?,
        })
    }
}

impl CleanConfig {
    /// CLI flags take precedence over the `DRY_RUN` / `MAX_DELETIONS`
    /// environment variables.
    pub fn from_env(
        dry_run: Option<bool>,
        max_deletions: Option<usize>,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), dry_run, max_deletions)
    }

    fn from_lookup(
        get: impl Fn(&str) -> Option<String> + Copy,
        dry_run: Option<bool>,
        max_deletions: Option<usize>,
    ) -> Result<Self, ConfigError> {
        let env_dry_run = get("DRY_RUN")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);
        let env_max = get("MAX_DELETIONS").and_then(|v| v.parse().ok());

        Ok(Self {
            storage: StorageConfig::from_lookup(get)?,
            dry_run: dry_run.unwrap_or(env_dry_run),
            max_deletions: max_deletions.or(env_max).unwrap_or(DEFAULT_MAX_DELETIONS),
        })
    }
}

fn required(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    match get(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(ConfigError::EmptyVar(key)),
        None => Err(ConfigError::MissingVar(key)),
    }
}

fn parse_package_list(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
