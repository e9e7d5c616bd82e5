//! Application Configuration
//!
//! Built-in defaults, then the `TRANSIT_API_BASE` build-time variable, then
//! an optional JSON override stored in `localStorage` under
//! [`CONFIG_STORAGE_KEY`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::KeyValueStore;

pub const CONFIG_STORAGE_KEY: &str = "transit_config";

const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL the resource paths are appended to
    pub api_base_url: String,
    /// Per-request timeout; exceeding it counts as a connectivity failure
    pub request_timeout_ms: u32,
    /// Serve cached data and queue writes locally when the API is unreachable
    pub offline_fallback: bool,
    /// Prefix for the per-collection `localStorage` keys
    pub storage_prefix: String,
    pub toast_duration_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("TRANSIT_API_BASE")
                .unwrap_or(DEFAULT_API_BASE)
                .to_string(),
            request_timeout_ms: 5000,
            offline_fallback: true,
            storage_prefix: "transit_".to_string(),
            toast_duration_ms: 4000,
        }
    }
}

impl AppConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::Invalid("api_base_url is empty".to_string()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!("api_base_url must be an http(s) URL: {}", base)));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid("request_timeout_ms must be positive".to_string()));
        }
        Ok(())
    }

    /// Load from `store`, falling back to defaults when the entry is missing
    /// or unusable
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(CONFIG_STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring stored configuration");
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored configuration");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStorage;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"api_base_url":"https://api.example.test","offline_fallback":false}"#)
            .unwrap();
        assert_eq!(config.api_base_url, "https://api.example.test");
        assert!(!config.offline_fallback);
        assert_eq!(config.request_timeout_ms, 5000);
        assert_eq!(config.storage_prefix, "transit_");
    }

    #[test]
    fn test_invalid_override_rejected() {
        assert!(matches!(
            AppConfig::from_json(r#"{"request_timeout_ms":0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(AppConfig::from_json("not json"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            AppConfig::from_json(r#"{"api_base_url":"localhost:8000"}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_from_store() {
        let store = MemoryStorage::new();
        assert_eq!(AppConfig::load(&store), AppConfig::default());

        store.set(CONFIG_STORAGE_KEY, r#"{"toast_duration_ms":1500}"#).unwrap();
        assert_eq!(AppConfig::load(&store).toast_duration_ms, 1500);

        store.set(CONFIG_STORAGE_KEY, "{broken").unwrap();
        assert_eq!(AppConfig::load(&store), AppConfig::default());
    }
}
