//! Application configuration.
//!
//! Loaded from a JSON file, then overridden by `BACKOFFICE_*` environment
//! variables, then validated.

use std::path::{Path, PathBuf};
use std::time::Duration;

use gridkit::TableOptions;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::paths;

pub const ENV_API_URL: &str = "BACKOFFICE_API_URL";
pub const ENV_API_TOKEN: &str = "BACKOFFICE_API_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "BACKOFFICE_TIMEOUT_SECS";
pub const ENV_PAGE_SIZE: &str = "BACKOFFICE_PAGE_SIZE";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackofficeConfig {
    /// Base URL of the REST API.
    pub api_url: Option<String>,
    /// Bearer token sent with every request.
    pub api_token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Rows per page for new tables.
    pub default_page_size: usize,
    /// Choices offered by the page-size selector.
    pub page_size_options: Vec<usize>,
    /// Settings database; defaults to the platform data directory.
    pub settings_path: Option<PathBuf>,
}

impl Default for BackofficeConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            timeout_secs: 30,
            default_page_size: gridkit::DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 20, 30, 40, 50],
            settings_path: None,
        }
    }
}

impl BackofficeConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the platform config file
    /// is used when present and defaults otherwise. Environment overrides
    /// and validation are applied in both cases.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match paths::config_file().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    log::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        log::debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `BACKOFFICE_*` overrides from a variable lookup.
    ///
    /// Empty variables are ignored.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_API_URL) {
            self.api_url = Some(url);
        }
        if let Some(token) = get(ENV_API_TOKEN) {
            self.api_token = Some(token);
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            self.timeout_secs = parse_number(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = get(ENV_PAGE_SIZE) {
            self.default_page_size = parse_number(ENV_PAGE_SIZE, &raw)?;
        }
        Ok(())
    }

    /// Check invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::invalid("default_page_size", "must be > 0"));
        }
        if self.page_size_options.contains(&0) {
            return Err(ConfigError::invalid("page_size_options", "must all be > 0"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("timeout_secs", "must be > 0"));
        }
        if self
            .api_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            return Err(ConfigError::invalid("api_url", "must not be empty"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Settings database path, falling back to the platform default.
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.settings_path.clone().or_else(paths::settings_db)
    }

    /// Table options carrying the configured page sizes.
    pub fn table_options(&self) -> TableOptions {
        TableOptions::new()
            .page_size(self.default_page_size)
            .page_size_options(self.page_size_options.clone())
    }

    /// Build an API client from the configured URL, token and timeout.
    pub fn client(&self) -> Result<ApiClient, ApiError> {
        let url = self
            .api_url
            .as_deref()
            .ok_or_else(|| ApiError::InvalidUrl("no API URL configured".to_string()))?;
        let builder = ApiClient::builder().url(url).timeout(self.timeout());
        match &self.api_token {
            Some(token) => builder.token(token).build(),
            None => builder.build(),
        }
    }
}

fn parse_number<N: std::str::FromStr>(field: &str, raw: &str) -> Result<N, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::invalid(field, format!("'{}' is not a number", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = BackofficeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.table_options().page_size, 10);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: BackofficeConfig =
            serde_json::from_str(r#"{"api_url": "https://shop.test/api", "default_page_size": 25}"#)
                .unwrap();
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.page_size_options, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = BackofficeConfig::default();
        config
            .apply_env(env(&[
                (ENV_API_URL, "https://shop.test/api"),
                (ENV_PAGE_SIZE, " 20 "),
                (ENV_API_TOKEN, ""),
            ]))
            .unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://shop.test/api"));
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.api_token, None);
    }

    #[test]
    fn test_env_rejects_non_numbers() {
        let mut config = BackofficeConfig::default();
        let err = config
            .apply_env(env(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
    }

    #[test]
    fn test_validation() {
        let config = BackofficeConfig {
            default_page_size: 0,
            ..BackofficeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field, .. }) if field == "default_page_size"
        ));
    }

    #[test]
    fn test_client_requires_url() {
        assert!(BackofficeConfig::default().client().is_err());

        let config = BackofficeConfig {
            api_url: Some("https://shop.test/api".to_string()),
            ..BackofficeConfig::default()
        };
        let client = config.client().unwrap();
        assert_eq!(client.base_url().as_str(), "https://shop.test/api/");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = BackofficeConfig::load(Some(Path::new("/nonexistent/backoffice.json")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
