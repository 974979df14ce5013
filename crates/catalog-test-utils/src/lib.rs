//! Testing utilities for the catalog workspace
//!
//! Shared category fixtures and store builders.

#![allow(missing_docs)]

use catalog_category::{AgentCategory, CategoryRepository, MemoryCategoryStore, NewCategory};
use chrono::Utc;
use std::sync::Arc;
use ulid::Ulid;

pub fn stored(category: NewCategory) -> AgentCategory {
    category.into_document(Ulid::new().to_string(), Utc::now())
}

/// Active, non-custom category with a plain (unlocalized) label
pub fn legacy_category(value: &str, label: &str) -> AgentCategory {
    stored(NewCategory::new(value, label))
}

/// Active, non-custom category already carrying its localization keys
pub fn localized_category(value: &str, order: i64) -> AgentCategory {
    stored(
        NewCategory::new(value, format!("com_agents_category_{value}"))
            .with_description(format!("com_agents_category_{value}_description"))
            .with_order(order),
    )
}

pub fn custom_category(value: &str, label: &str, is_active: bool) -> AgentCategory {
    stored(NewCategory::new(value, label).custom().with_active(is_active))
}

pub fn inactive(mut category: AgentCategory) -> AgentCategory {
    category.is_active = false;
    category
}

pub fn seeded_store(categories: impl IntoIterator<Item = AgentCategory>) -> Arc<MemoryCategoryStore> {
    Arc::new(MemoryCategoryStore::from_categories(categories))
}

pub fn seeded_repository(
    categories: impl IntoIterator<Item = AgentCategory>,
) -> CategoryRepository<MemoryCategoryStore> {
    CategoryRepository::new(seeded_store(categories))
}

pub fn find<'a>(categories: &'a [AgentCategory], value: &str) -> Option<&'a AgentCategory> {
    categories.iter().find(|c| c.value == value)
}

pub fn empty_repository() -> CategoryRepository<MemoryCategoryStore> {
    CategoryRepository::new(Arc::new(MemoryCategoryStore::new()))
}
