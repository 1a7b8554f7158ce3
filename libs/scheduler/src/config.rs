//! Scheduler configuration.
//!
//! Loaded once before the filter chain is built. Changes require building a
//! new chain.
//!
//! ```toml
//! filters = ["capability", "attribute", "pool_id_attribute", "fallback"]
//! default_pool_id = "794ccc2c-d751-44fe-b57f-8894c9f5c842"
//!
//! [capability]
//! requires = ["dnssec"]
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use zonepool_id::PoolId;

use crate::error::ConfigError;

/// Env var overriding the filter order (comma-separated names).
pub const FILTERS_ENV: &str = "ZONEPOOL_SCHEDULER_FILTERS";

/// Env var overriding the default pool ID.
pub const DEFAULT_POOL_ID_ENV: &str = "ZONEPOOL_DEFAULT_POOL_ID";

/// Scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Filter names in the order they run.
    #[serde(default = "default_filters")]
    pub filters: Vec<String>,

    /// Pool used by `fallback`, `default_pool` and `in_doubt_default_pool`.
    #[serde(default)]
    pub default_pool_id: Option<PoolId>,

    /// Parameters for the `capability` filter.
    #[serde(default)]
    pub capability: CapabilityConfig,
}

/// Parameters for the `capability` filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapabilityConfig {
    /// Capabilities every candidate pool must carry.
    #[serde(default)]
    pub requires: BTreeSet<String>,
}

fn default_filters() -> Vec<String> {
    vec![
        "attribute".to_string(),
        "pool_id_attribute".to_string(),
        "fallback".to_string(),
    ]
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            filters: default_filters(),
            default_pool_id: None,
            capability: CapabilityConfig::default(),
        }
    }
}

impl SchedulerConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(filters) = lookup(FILTERS_ENV) {
            self.filters = filters
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(pool_id) = lookup(DEFAULT_POOL_ID_ENV) {
            let pool_id = pool_id.trim();
            let parsed = pool_id.parse::<PoolId>().map_err(|e| ConfigError::InvalidValue {
                key: DEFAULT_POOL_ID_ENV.to_string(),
                message: e.to_string(),
            })?;
            self.default_pool_id = Some(parsed);
        }

        Ok(self)
    }

    /// The default pool ID, or a configuration error naming the filter that
    /// needs it.
    pub fn require_default_pool_id(&self, filter: &'static str) -> Result<&PoolId, ConfigError> {
        self.default_pool_id
            .as_ref()
            .ok_or(ConfigError::MissingParameter {
                filter,
                parameter: "default_pool_id",
            })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_filters_default_when_absent() {
        let config = SchedulerConfig::from_toml_str("default_pool_id = \"pool-42\"").unwrap();
        assert_eq!(
            config.filters,
            vec!["attribute", "pool_id_attribute", "fallback"]
        );
        assert_eq!(config.default_pool_id.unwrap().as_str(), "pool-42");
    }

    #[test]
    fn test_explicit_empty_filters_kept() {
        let config = SchedulerConfig::from_toml_str("filters = []").unwrap();
        assert!(config.filters.is_empty());
    }

    #[test]
    fn test_capability_section() {
        let config = SchedulerConfig::from_toml_str(
            r#"
filters = ["capability", "fallback"]
default_pool_id = "pool-1"

[capability]
requires = ["dnssec"]
"#,
        )
        .unwrap();
        assert!(config.capability.requires.contains("dnssec"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = SchedulerConfig::from_toml_str("filterz = [\"fallback\"]");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_pool_id_rejected() {
        let result = SchedulerConfig::from_toml_str("default_pool_id = \"\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (FILTERS_ENV, "default_pool, fallback"),
            (DEFAULT_POOL_ID_ENV, "pool-7"),
        ]);
        let config = SchedulerConfig::default()
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.filters, vec!["default_pool", "fallback"]);
        assert_eq!(config.default_pool_id.unwrap().as_str(), "pool-7");
    }

    #[test]
    fn test_env_override_invalid_pool_id() {
        let result = SchedulerConfig::default()
            .apply_overrides(|k| (k == DEFAULT_POOL_ID_ENV).then(|| "bad id".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_require_default_pool_id() {
        let err = SchedulerConfig::default()
            .require_default_pool_id("fallback")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingParameter {
                filter: "fallback",
                parameter: "default_pool_id"
            }
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let path = Path::new("/nonexistent/zonepool/scheduler.toml");
        let err = SchedulerConfig::load(path).unwrap_err();

        assert!(matches!(&err, ConfigError::Io { path: p, .. } if p == path));
        assert!(err.to_string().contains("scheduler.toml"));
    }
}
