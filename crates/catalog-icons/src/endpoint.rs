//! Endpoint metadata consumed by icon resolution
//!
//! Field names follow the endpoint configuration documents (`baseURL`,
//! `iconURL`, `models.default`), so descriptors deserialize straight from them.

use serde::{Deserialize, Serialize};

/// Declared model list of an endpoint
///
/// Configuration allows either a single model name or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelList {
    /// A single model name
    One(String),
    /// Several model names, in declaration order
    Many(Vec<String>),
}

impl ModelList {
    /// Iterate model names in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::One(model) => std::slice::from_ref(model),
            Self::Many(models) => models,
        };
        slice.iter().map(String::as_str)
    }
}

impl From<&str> for ModelList {
    fn from(model: &str) -> Self {
        Self::One(model.to_string())
    }
}

impl From<Vec<String>> for ModelList {
    fn from(models: Vec<String>) -> Self {
        Self::Many(models)
    }
}

/// `models` block of an endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointModels {
    /// Default model(s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ModelList>,
}

/// Descriptive fields of a model-provider endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Declared models
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<EndpointModels>,

    /// API base URL
    #[serde(default, rename = "baseURL", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Explicit icon injected by the data layer
    #[serde(default, rename = "iconURL", skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

impl EndpointDescriptor {
    /// Create an empty descriptor
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With display name
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// With declared models
    #[inline]
    #[must_use]
    pub fn with_models(mut self, models: impl Into<ModelList>) -> Self {
        self.models = Some(EndpointModels {
            default: Some(models.into()),
        });
        self
    }

    /// With API base URL
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// With explicit icon path
    #[inline]
    #[must_use]
    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    /// Search fields: name, then each model, then base URL
    ///
    /// Empty name, single model and base URL are skipped. Entries of a model
    /// list are yielded as declared, empty ones included.
    pub fn search_fields(&self) -> impl Iterator<Item = &str> {
        let non_empty = |field: &&str| !field.is_empty();
        let models = self
            .models
            .as_ref()
            .and_then(|m| m.default.as_ref())
            .into_iter()
            .flat_map(|models| {
                let declared: &[String] = match models {
                    ModelList::One(model) if model.is_empty() => &[],
                    ModelList::One(model) => std::slice::from_ref(model),
                    ModelList::Many(models) => models,
                };
                declared.iter().map(String::as_str)
            });

        self.name
            .as_deref()
            .filter(non_empty)
            .into_iter()
            .chain(models)
            .chain(self.base_url.as_deref().filter(non_empty))
    }

    /// Lower-cased, space-joined search string
    ///
    /// Empty when no field is present.
    #[must_use]
    pub fn search_string(&self) -> String {
        self.search_fields()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}
