//! Synchronizer configuration
//!
//! The default category set and localization prefix, either built in or
//! loaded from a JSON, YAML or TOML document of the form:
//!
//! ```toml
//! localization_prefix = "com_"
//!
//! [[categories]]
//! value = "business"
//! label = "com_agents_category_business"
//! description = "com_agents_category_business_description"
//! order = 0
//! ```

use crate::error::ConfigError;
use crate::model::{default_categories, DefaultCategory, LOCALIZATION_PREFIX};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Supported configuration document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Detect format from file extension
    ///
    /// # Errors
    /// `ConfigError::UnsupportedFormat` for unknown or missing extensions
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(ext)),
        }
    }

    /// Format name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }
}

/// Synchronizer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Default category set, in processing order
    #[serde(rename = "categories")]
    pub defaults: Vec<DefaultCategory>,
    /// Labels starting with this are considered localized
    pub localization_prefix: String,
}

impl SyncConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With default category set
    #[inline]
    #[must_use]
    pub fn with_defaults(mut self, defaults: Vec<DefaultCategory>) -> Self {
        self.defaults = defaults;
        self
    }

    /// With localization prefix
    #[inline]
    #[must_use]
    pub fn with_localization_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.localization_prefix = prefix.into();
        self
    }

    /// Parse a configuration document
    ///
    /// # Errors
    /// Parse failures, or a config that fails [`validate`](Self::validate)
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config: Self = match format {
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| ConfigError::parse("json", e))?
            }
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| ConfigError::parse("yaml", e))?
            }
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|e| ConfigError::parse("toml", e))?
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, format chosen by extension
    ///
    /// # Errors
    /// IO, format detection, parse or validation failure
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config = Self::parse(&content, format)?;
        tracing::debug!(
            path = %path.display(),
            format = format.name(),
            defaults = config.defaults.len(),
            "loaded sync config"
        );
        Ok(config)
    }

    /// Check values are non-blank and unique
    ///
    /// # Errors
    /// `ConfigError::Invalid` naming the first offending entry
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for category in &self.defaults {
            if category.value.trim().is_empty() {
                return Err(ConfigError::Invalid("category value must not be blank".into()));
            }
            if category.label.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "label of '{}' must not be blank",
                    category.value
                )));
            }
            if !seen.insert(category.value.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate category value '{}'",
                    category.value
                )));
            }
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            defaults: default_categories(),
            localization_prefix: LOCALIZATION_PREFIX.to_string(),
        }
    }
}
