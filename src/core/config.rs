//! Engine configuration.
//!
//! Hosts configure the engine at startup with an `EngineConfig`. Every field
//! has a default, so an empty JSON object is a valid configuration:
//!
//! ```
//! use rust_advancements::core::EngineConfig;
//!
//! let config = EngineConfig::from_json("{}").unwrap();
//! assert_eq!(config.storage_namespace, "advancement_api");
//! assert_eq!(config.default_namespace, "minecraft");
//! assert!(config.isolate_panics);
//! ```

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, KeyError};
use super::key::{NamespacedKey, DEFAULT_NAMESPACE};

/// Namespace progress records are stored under by default.
pub const DEFAULT_STORAGE_NAMESPACE: &str = "advancement_api";

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Namespace that progress storage keys are re-homed under.
    ///
    /// Changing this orphans previously stored counters.
    pub storage_namespace: String,

    /// Namespace assumed for advancement keys written without one.
    pub default_namespace: String,

    /// Catch panics raised by host callbacks (extractors, conditions,
    /// increments) so one broken trigger cannot stop the others.
    pub isolate_panics: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_namespace: DEFAULT_STORAGE_NAMESPACE.to_string(),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            isolate_panics: true,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the storage namespace.
    #[must_use]
    pub fn with_storage_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.storage_namespace = namespace.into();
        self
    }

    /// Set the default key namespace.
    #[must_use]
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    /// Enable or disable panic isolation.
    #[must_use]
    pub fn with_isolate_panics(mut self, isolate: bool) -> Self {
        self.isolate_panics = isolate;
        self
    }

    /// Check that both namespaces are valid key namespaces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        NamespacedKey::validate_namespace(&self.storage_namespace)?;
        NamespacedKey::validate_namespace(&self.default_namespace)?;
        Ok(())
    }

    /// Parse an advancement key using the configured default namespace.
    pub fn parse_key(&self, key: &str) -> Result<NamespacedKey, KeyError> {
        NamespacedKey::parse_with_default(key, &self.default_namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::new();
        assert_eq!(config.storage_namespace, DEFAULT_STORAGE_NAMESPACE);
        assert_eq!(config.default_namespace, DEFAULT_NAMESPACE);
        assert!(config.isolate_panics);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = EngineConfig::new()
            .with_storage_namespace("my_plugin")
            .with_default_namespace("demo")
            .with_isolate_panics(false);

        assert_eq!(config.storage_namespace, "my_plugin");
        assert_eq!(config.parse_key("trade").unwrap().to_string(), "demo:trade");
        assert!(!config.isolate_panics);
    }

    #[test]
    fn test_config_from_json_partial() {
        let config = EngineConfig::from_json(r#"{ "storage_namespace": "quests" }"#).unwrap();
        assert_eq!(config.storage_namespace, "quests");
        assert_eq!(config.default_namespace, DEFAULT_NAMESPACE);
    }

    #[test]
    fn test_config_from_json_invalid() {
        assert!(matches!(
            EngineConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "storage_namespace": "Has Spaces" }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig::new().with_storage_namespace("quests");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }
}
