//! Category documents and the payloads that create or change them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix marking a label or description as a localization key
pub const LOCALIZATION_PREFIX: &str = "com_";

fn default_true() -> bool {
    true
}

/// Stored category document
///
/// Field names match the persisted documents (`_id`, `isActive`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCategory {
    /// Store-assigned identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Unique key, referenced by agents
    pub value: String,
    /// Display text or localization key
    pub label: String,
    /// Description text or localization key
    #[serde(default)]
    pub description: String,
    /// Sort rank
    #[serde(default)]
    pub order: i64,
    /// Soft-delete flag
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// User-created, exempt from synchronization
    #[serde(default)]
    pub custom: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl AgentCategory {
    /// Check whether the label is a localization key
    #[inline]
    #[must_use]
    pub fn is_localized(&self, prefix: &str) -> bool {
        self.label.starts_with(prefix)
    }
}

/// Payload for inserting a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub custom: bool,
}

impl NewCategory {
    /// Active, non-custom category with empty description
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: String::new(),
            order: 0,
            is_active: true,
            custom: false,
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With sort rank
    #[inline]
    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// With active flag
    #[inline]
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Mark as user-created
    #[inline]
    #[must_use]
    pub fn custom(mut self) -> Self {
        self.custom = true;
        self
    }

    /// Materialize into a stored document
    #[must_use]
    pub fn into_document(self, id: String, now: DateTime<Utc>) -> AgentCategory {
        AgentCategory {
            id,
            value: self.value,
            label: self.label,
            description: self.description,
            order: self.order,
            is_active: self.is_active,
            custom: self.custom,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<bool>,
}

impl CategoryPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set label
    #[inline]
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set description
    #[inline]
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set sort rank
    #[inline]
    #[must_use]
    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// Set active flag
    #[inline]
    #[must_use]
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Set custom flag
    #[inline]
    #[must_use]
    pub fn custom(mut self, custom: bool) -> Self {
        self.custom = Some(custom);
        self
    }

    /// Check if patch sets nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply to a document, returning whether any field changed
    ///
    /// `updated_at` is only bumped on an actual change.
    pub fn apply(&self, category: &mut AgentCategory, now: DateTime<Utc>) -> bool {
        let mut changed = false;

        if let Some(label) = &self.label {
            changed |= set_if_different(&mut category.label, label.clone());
        }
        if let Some(description) = &self.description {
            changed |= set_if_different(&mut category.description, description.clone());
        }
        if let Some(order) = self.order {
            changed |= set_if_different(&mut category.order, order);
        }
        if let Some(is_active) = self.is_active {
            changed |= set_if_different(&mut category.is_active, is_active);
        }
        if let Some(custom) = self.custom {
            changed |= set_if_different(&mut category.custom, custom);
        }

        if changed {
            category.updated_at = now;
        }
        changed
    }
}

fn set_if_different<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Entry of the default category set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultCategory {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: i64,
}

impl DefaultCategory {
    /// Create default entry
    #[must_use]
    pub fn new(
        value: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        order: i64,
    ) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: description.into(),
            order,
        }
    }

    /// Localized default for `value`: `com_agents_category_<value>[_description]`
    #[must_use]
    pub fn localized(value: &str, order: i64) -> Self {
        Self::new(
            value,
            format!("{LOCALIZATION_PREFIX}agents_category_{value}"),
            format!("{LOCALIZATION_PREFIX}agents_category_{value}_description"),
            order,
        )
    }

    /// Insert payload: active and non-custom
    #[must_use]
    pub fn to_new_category(&self) -> NewCategory {
        NewCategory {
            value: self.value.clone(),
            label: self.label.clone(),
            description: self.description.clone(),
            order: self.order,
            is_active: true,
            custom: false,
        }
    }
}

/// Values of the built-in default set, in display order
pub const DEFAULT_CATEGORY_VALUES: &[&str] = &[
    "business",
    "strategy",
    "creative",
    "media_resources",
    "procurement",
    "hr",
    "general",
];

/// Built-in default category set
#[must_use]
pub fn default_categories() -> Vec<DefaultCategory> {
    DEFAULT_CATEGORY_VALUES
        .iter()
        .zip(0_i64..)
        .map(|(value, order)| DefaultCategory::localized(value, order))
        .collect()
}

/// Loosely specified seed entry
///
/// Missing fields are filled in by
/// [`CategoryRepository::seed_categories`](crate::repository::CategoryRepository::seed_categories).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySeed {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub custom: Option<bool>,
}

impl CategorySeed {
    /// Seed with only a value
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Insert payload for position `index` in the seed list
    ///
    /// Blank label falls back to the value, missing or zero order to `index`.
    #[must_use]
    pub fn to_new_category(&self, index: usize) -> NewCategory {
        let label = self
            .label
            .clone()
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| self.value.clone());
        let order = self
            .order
            .filter(|order| *order != 0)
            .unwrap_or_else(|| i64::try_from(index).unwrap_or(i64::MAX));

        NewCategory {
            value: self.value.clone(),
            label,
            description: self.description.clone().unwrap_or_default(),
            order,
            is_active: true,
            custom: self.custom.unwrap_or(false),
        }
    }
}

/// Active category with the number of agents filed under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: AgentCategory,
    pub agent_count: u64,
}
