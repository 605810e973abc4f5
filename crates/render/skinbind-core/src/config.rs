//! Configuration for the caching resolver and property projections.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration. Every field falls back to its default when omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    pub properties: PropertyKeys,
}

impl Config {
    /// Parse and validate a JSON config blob.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Config = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.max_entries == 0 {
            return Err(ConfigError::Invalid {
                field: "cache.max_entries",
                reason: "must be at least 1".into(),
            });
        }
        if self.properties.model.is_empty() || self.properties.textures.is_empty() {
            return Err(ConfigError::Invalid {
                field: "properties",
                reason: "property names must not be empty".into(),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entries kept before the oldest one is evicted.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 256 }
    }
}

/// Profile property names read by `RenderManager::set_property_getters`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyKeys {
    pub model: String,
    pub textures: String,
}

impl Default for PropertyKeys {
    fn default() -> Self {
        Self {
            model: "cpm:model".into(),
            textures: "textures".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = Config::from_json_str(r#"{"cache": {"max_entries": 8}}"#).expect("parse");
        assert_eq!(cfg.cache.max_entries, 8);
        assert_eq!(cfg.properties, PropertyKeys::default());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = Config::from_json_str(r#"{"cache": {"max_entries": 0}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "cache.max_entries",
                ..
            }
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Config::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
