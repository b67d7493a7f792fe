//! Configuration models.

use std::fmt;
use std::path::PathBuf;

use crate::constants::{
    API_BASE_URL_KEY, APP_BASE_URL_KEY, COMMIT_CONCURRENCY_KEY, DEFAULT_API_BASE_URL,
    DEFAULT_APP_BASE_URL, DEFAULT_COMMIT_CONCURRENCY, DEFAULT_RESULTS_DIR, RESULTS_DIR_KEY,
    SOURCE_API_KEY_KEY, SOURCE_ENV_ID_KEY, TARGET_API_KEY_KEY, TARGET_ENV_ID_KEY,
};
use crate::errors::{Error, Result};

/// Which side of the sync an environment plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentRole {
    Source,
    Target,
}

impl fmt::Display for EnvironmentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentRole::Source => write!(f, "source"),
            EnvironmentRole::Target => write!(f, "target"),
        }
    }
}

/// Identity and credential of one environment.
#[derive(Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub environment_id: String,
    pub api_key: String,
}

impl EnvironmentConfig {
    pub fn new(environment_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            api_key: api_key.into(),
        }
    }
}

// Never print the credential.
impl fmt::Debug for EnvironmentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentConfig")
            .field("environment_id", &self.environment_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Immutable configuration for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: EnvironmentConfig,
    pub target: EnvironmentConfig,
    /// Base URL of the management API
    pub api_base_url: String,
    /// Base URL of the web app, used for report links
    pub app_base_url: String,
    /// Directory the HTML report is written to
    pub results_dir: PathBuf,
    /// Maximum asset updates in flight during commit
    pub commit_concurrency: usize,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// All four environment keys are required. Every missing key is reported
    /// in a single error so the operator can fix them in one pass.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let required = [
            SOURCE_ENV_ID_KEY,
            SOURCE_API_KEY_KEY,
            TARGET_ENV_ID_KEY,
            TARGET_API_KEY_KEY,
        ];
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|key| read(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingConfigKey(missing.join(", ")));
        }

        let value = |key: &str| read(key).unwrap_or_default();

        let commit_concurrency = match read(COMMIT_CONCURRENCY_KEY) {
            Some(raw) => parse_concurrency(&raw)?,
            None => DEFAULT_COMMIT_CONCURRENCY,
        };

        Ok(Self {
            source: EnvironmentConfig::new(value(SOURCE_ENV_ID_KEY), value(SOURCE_API_KEY_KEY)),
            target: EnvironmentConfig::new(value(TARGET_ENV_ID_KEY), value(TARGET_API_KEY_KEY)),
            api_base_url: read(API_BASE_URL_KEY)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            app_base_url: read(APP_BASE_URL_KEY)
                .unwrap_or_else(|| DEFAULT_APP_BASE_URL.to_string()),
            results_dir: read(RESULTS_DIR_KEY)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR)),
            commit_concurrency,
        })
    }

    /// The environment config for a role.
    pub fn environment(&self, role: EnvironmentRole) -> &EnvironmentConfig {
        match role {
            EnvironmentRole::Source => &self.source,
            EnvironmentRole::Target => &self.target,
        }
    }

    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_app_base_url(mut self, url: impl Into<String>) -> Self {
        self.app_base_url = url.into();
        self
    }

    pub fn with_commit_concurrency(mut self, concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(Error::InvalidConfigValue(
                "commit concurrency must be at least 1".to_string(),
            ));
        }
        self.commit_concurrency = concurrency;
        Ok(self)
    }
}

fn parse_concurrency(raw: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(Error::InvalidConfigValue(format!(
            "{} must be an integer >= 1, got '{}'",
            COMMIT_CONCURRENCY_KEY, raw
        ))),
    }
}
