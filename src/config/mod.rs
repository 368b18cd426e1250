//! Configuration management for postgen
//!
//! Settings resolve as: command-line flag, then environment variable (both
//! handled by clap), then `~/.postgen/config.yaml`, then built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::postman::{API_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Postman API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default workspace for deploy, delete and assets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,

    /// Postman API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,

    /// HTTP timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub api_key: Option<String>,
    pub workspace_id: Option<String>,
    pub api_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings for talking to a workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub api_key: String,
    pub workspace_id: String,
    pub api_base_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".postgen").join("config.yaml"))
    }

    /// The explicit path if given, else the default one
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load configuration, treating a missing file as empty
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load_from(path) {
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // Holds an API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// API key from overrides or file
    pub fn api_key(&self, overrides: &ConnectionOverrides) -> Result<String> {
        pick(&overrides.api_key, &self.api_key)
            .ok_or_else(|| ConfigError::MissingApiKey.into())
    }

    /// Merge overrides over the file and validate what a workspace call needs
    pub fn connection(&self, overrides: &ConnectionOverrides) -> Result<Connection> {
        let api_key = self.api_key(overrides)?;
        let workspace_id = pick(&overrides.workspace_id, &self.workspace_id)
            .ok_or(ConfigError::MissingWorkspaceId)?;
        let api_base_url = pick(&overrides.api_base_url, &self.api_base_url)
            .unwrap_or_else(|| API_BASE_URL.to_string());
        let timeout_secs = overrides
            .timeout_secs
            .or(self.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        if timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout must be at least 1 second".to_string()).into());
        }

        Ok(Connection {
            api_key,
            workspace_id,
            api_base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// First non-blank value, trimmed
fn pick(primary: &Option<String>, fallback: &Option<String>) -> Option<String> {
    [primary, fallback]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(config.workspace_id.is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip_with_permissions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = Config {
            api_key: Some("PMAK-1".to_string()),
            workspace_id: Some("ws-1".to_string()),
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("timeout_secs"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(matches!(
            Config::load_from(&path),
            Err(Error::Config(ConfigError::NotFound))
        ));
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = Config {
            api_key: Some("file-key".to_string()),
            workspace_id: Some("file-ws".to_string()),
            api_base_url: None,
            timeout_secs: Some(10),
        };
        let overrides = ConnectionOverrides {
            api_key: Some("flag-key".to_string()),
            workspace_id: Some("  ".to_string()),
            ..Default::default()
        };

        let conn = config.connection(&overrides).unwrap();
        assert_eq!(conn.api_key, "flag-key");
        assert_eq!(conn.workspace_id, "file-ws");
        assert_eq!(conn.api_base_url, API_BASE_URL);
        assert_eq!(conn.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_missing_credentials() {
        let config = Config::default();
        let err = config.connection(&ConnectionOverrides::default()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingApiKey)));

        let overrides = ConnectionOverrides {
            api_key: Some("k".to_string()),
            ..Default::default()
        };
        let err = config.connection(&overrides).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingWorkspaceId)));
    }
}
