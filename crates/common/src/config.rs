//! Configuration loading
//!
//! Settings are resolved in three layers: built-in defaults, an optional
//! YAML file, and `ARMCTL_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ConfigError;

const CONFIG_FILE_NAME: &str = "armctl.yaml";

/// Top-level armctl configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub management: ManagementConfig,
}

/// Management API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagementConfig {
    /// Resource manager base URL
    pub endpoint: String,
    pub subscription_id: Option<String>,
    /// Bearer token sent with each request
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub timeout_secs: u64,
    pub api_versions: ApiVersions,
}

/// API versions per resource provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiVersions {
    pub insights: String,
    pub web: String,
}

impl Default for ManagementConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://management.azure.com".to_string(),
            subscription_id: None,
            access_token: None,
            timeout_secs: 30,
            api_versions: ApiVersions::default(),
        }
    }
}

impl Default for ApiVersions {
    fn default() -> Self {
        Self {
            insights: "2014-04-01".to_string(),
            web: "2015-08-01".to_string(),
        }
    }
}

impl Config {
    /// Load configuration, preferring `path` over the default locations.
    ///
    /// An explicitly named file must exist; default locations are optional.
    pub fn load_with(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => {
                let p = expand_path(p);
                if !p.exists() {
                    return Err(ConfigError::NotFound(p));
                }
                Self::from_file(&p)?
            }
            None => match default_config_paths().into_iter().find(|p| p.exists()) {
                Some(p) => Self::from_file(&p)?,
                None => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a YAML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading config from {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `ARMCTL_*` overrides using the given variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("ARMCTL_ENDPOINT") {
            self.management.endpoint = endpoint;
        }
        if let Some(sub) = lookup("ARMCTL_SUBSCRIPTION_ID") {
            self.management.subscription_id = Some(sub);
        }
        if let Some(token) = lookup("ARMCTL_ACCESS_TOKEN") {
            self.management.access_token = Some(token);
        }
        if let Some(timeout) = lookup("ARMCTL_TIMEOUT_SECS") {
            self.management.timeout_secs = timeout.trim().parse().map_err(|_| {
                ConfigError::InvalidValue {
                    key: "ARMCTL_TIMEOUT_SECS".to_string(),
                    message: format!("expected whole seconds, got '{}'", timeout),
                }
            })?;
        }
        Ok(())
    }

    /// Check that the settings are usable for remote calls
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mgmt = &self.management;

        match mgmt.subscription_id.as_deref() {
            Some(s) if !s.trim().is_empty() => {}
            _ => return Err(ConfigError::Missing("management.subscription_id")),
        }

        if !(mgmt.endpoint.starts_with("https://") || mgmt.endpoint.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                key: "management.endpoint".to_string(),
                message: format!("'{}' is not an http(s) URL", mgmt.endpoint),
            });
        }

        if mgmt.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "management.timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("armctl").join(CONFIG_FILE_NAME));
    }
    paths
}
