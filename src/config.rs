//! Store Configuration
//!
//! Where the SQLite database lives and how long a connection waits on a
//! locked database before giving up.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{DomainError, DomainResult};

/// SQLite path that opens a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

const ENV_DATABASE: &str = "TAG_STORE_DATABASE";
const ENV_BUSY_TIMEOUT_MS: &str = "TAG_STORE_BUSY_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database file, or `:memory:`
    pub database_path: PathBuf,
    /// Milliseconds to wait on `SQLITE_BUSY`
    pub busy_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(IN_MEMORY),
            busy_timeout_ms: 5_000,
        }
    }
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            database_path: path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json).map_err(|e| DomainError::Config(e.to_string()))
    }

    /// Read overrides from `TAG_STORE_DATABASE` and `TAG_STORE_BUSY_TIMEOUT_MS`.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DATABASE) {
            if path.trim().is_empty() {
                return Err(DomainError::Config(format!("{} is empty", ENV_DATABASE)));
            }
            config.database_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(ENV_BUSY_TIMEOUT_MS) {
            config.busy_timeout_ms = raw.trim().parse().map_err(|_| {
                DomainError::Config(format!("{} is not a number: {:?}", ENV_BUSY_TIMEOUT_MS, raw))
            })?;
        }

        Ok(config)
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert!(config.is_in_memory());
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = StoreConfig::from_json(r#"{ "database_path": "/tmp/tags.db" }"#).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/tags.db"));
        assert_eq!(config.busy_timeout_ms, 5_000);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_from_json_rejects_bad_types() {
        let err = StoreConfig::from_json(r#"{ "busy_timeout_ms": "soon" }"#).unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (ENV_DATABASE, "tags.db"),
            (ENV_BUSY_TIMEOUT_MS, " 250 "),
        ]))
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("tags.db"));
        assert_eq!(config.busy_timeout_ms, 250);
    }

    #[test]
    fn test_env_without_overrides_is_default() {
        let config = StoreConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_env_rejects_bad_timeout() {
        let err = StoreConfig::from_lookup(lookup_from(&[(ENV_BUSY_TIMEOUT_MS, "later")]))
            .unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }
}
