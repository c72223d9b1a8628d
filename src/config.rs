//! Engine configuration
//!
//! Read from a YAML file. Every section is optional and falls back to the
//! standard values, so an empty file is a valid configuration:
//!
//! ```yaml
//! session:
//!   budget: 250000
//!   reputation: 80
//! content:
//!   path: content/catalog.yaml
//! ```

use crate::data::SessionDefaults;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse config YAML: {source}")]
    Yaml { source: serde_yaml::Error },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Starting counter values for new sessions
    #[serde(default)]
    pub session: SessionDefaults,

    #[serde(default)]
    pub content: ContentConfig,
}

/// Where scenarios come from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Catalog file; the built-in scenarios are used when unset. Relative
    /// paths resolve against the configuration file.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl EngineConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document; treat it as all defaults.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&text)?;
        if let (Some(content), Some(base)) = (config.content.path.as_mut(), path.parent()) {
            if content.is_relative() {
                *content = base.join(&*content);
            }
        }
        Ok(config)
    }
}
