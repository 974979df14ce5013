//! Category repository
//!
//! The data-access surface over a [`CategoryStore`]: listing, counting,
//! seeding, CRUD by value or id, and default-set synchronization.

use crate::config::SyncConfig;
use crate::error::{CategoryError, StoreError};
use crate::model::{
    AgentCategory, CategoryPatch, CategorySeed, CategoryWithCount, DefaultCategory, NewCategory,
};
use crate::store::{
    AgentCategoryCounter, BulkOptions, BulkWriteResult, CategoryFilter, CategoryStore, WriteOp,
};
use crate::sync::{self, SyncReport};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Repository over an explicit category store handle
pub struct CategoryRepository<S: ?Sized> {
    store: Arc<S>,
    agents: Option<Arc<dyn AgentCategoryCounter>>,
    config: SyncConfig,
}

impl<S: ?Sized> std::fmt::Debug for CategoryRepository<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryRepository")
            .field("has_agents", &self.agents.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S> CategoryRepository<S>
where
    S: CategoryStore + ?Sized,
{
    /// Create repository with the built-in default set
    #[inline]
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            agents: None,
            config: SyncConfig::default(),
        }
    }

    /// With agent counter for [`get_categories_with_counts`](Self::get_categories_with_counts)
    #[inline]
    #[must_use]
    pub fn with_agents(mut self, agents: Arc<dyn AgentCategoryCounter>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// With synchronizer configuration
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Active categories sorted by order, then label
    ///
    /// # Errors
    /// Store failure
    pub async fn get_active_categories(&self) -> Result<Vec<AgentCategory>, CategoryError> {
        let mut categories = self.store.find_all(&CategoryFilter::active()).await?;
        sort_for_display(&mut categories);
        Ok(categories)
    }

    /// Active categories with the number of agents filed under each
    ///
    /// Without an agent counter every count is zero.
    ///
    /// # Errors
    /// Store or counter failure
    pub async fn get_categories_with_counts(
        &self,
    ) -> Result<Vec<CategoryWithCount>, CategoryError> {
        let counts = match &self.agents {
            Some(agents) => agents.count_by_category().await?,
            None => {
                tracing::debug!("no agent counter configured, reporting zero counts");
                Default::default()
            }
        };

        Ok(self
            .get_active_categories()
            .await?
            .into_iter()
            .map(|category| CategoryWithCount {
                agent_count: counts.get(&category.value).copied().unwrap_or(0),
                category,
            })
            .collect())
    }

    /// Distinct values of active categories, sorted
    ///
    /// # Errors
    /// Store failure
    pub async fn get_valid_category_values(&self) -> Result<Vec<String>, CategoryError> {
        let values: BTreeSet<String> = self
            .store
            .find_all(&CategoryFilter::active())
            .await?
            .into_iter()
            .map(|category| category.value)
            .collect();
        Ok(values.into_iter().collect())
    }

    /// Insert seeds whose value is not yet stored; existing records are kept as-is
    ///
    /// # Errors
    /// Store failure, or `StoreError::PartialWrite` if a seed was rejected
    pub async fn seed_categories(
        &self,
        seeds: &[CategorySeed],
    ) -> Result<BulkWriteResult, CategoryError> {
        let ops = seeds
            .iter()
            .enumerate()
            .map(|(index, seed)| WriteOp::UpsertOne {
                filter: CategoryFilter::by_value(seed.value.clone()),
                on_insert: seed.to_new_category(index),
            })
            .collect();

        let result = self
            .store
            .bulk_write(ops, BulkOptions::ordered())
            .await?
            .into_result()?;
        tracing::info!(seeded = result.upserted, kept = result.matched, "seeded categories");
        Ok(result)
    }

    /// Category by value
    ///
    /// # Errors
    /// Store failure
    pub async fn find_category_by_value(
        &self,
        value: &str,
    ) -> Result<Option<AgentCategory>, CategoryError> {
        Ok(self.store.find_one(&CategoryFilter::by_value(value)).await?)
    }

    /// Category by store identifier
    ///
    /// # Errors
    /// Store failure
    pub async fn find_category_by_id(
        &self,
        id: &str,
    ) -> Result<Option<AgentCategory>, CategoryError> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Create a category
    ///
    /// # Errors
    /// - `CategoryError::InvalidCategory` for a blank value or label
    /// - `CategoryError::DuplicateValue` if the value is taken
    pub async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<AgentCategory, CategoryError> {
        if category.value.trim().is_empty() {
            return Err(CategoryError::invalid("value must not be blank"));
        }
        if category.label.trim().is_empty() {
            return Err(CategoryError::invalid(format!(
                "label of '{}' must not be blank",
                category.value
            )));
        }

        match self.store.insert(category).await {
            Ok(created) => {
                tracing::info!(value = %created.value, custom = created.custom, "created category");
                Ok(created)
            }
            Err(StoreError::DuplicateKey(value)) => Err(CategoryError::DuplicateValue(value)),
            Err(e) => Err(e.into()),
        }
    }

    /// Update a category by value, returning it after the update
    ///
    /// # Errors
    /// `CategoryError::InvalidCategory` for a blank label, or store failure
    pub async fn update_category(
        &self,
        value: &str,
        patch: CategoryPatch,
    ) -> Result<Option<AgentCategory>, CategoryError> {
        if patch.label.as_deref().is_some_and(|label| label.trim().is_empty()) {
            return Err(CategoryError::invalid("label must not be blank"));
        }
        Ok(self
            .store
            .update_one(&CategoryFilter::by_value(value), patch)
            .await?)
    }

    /// Delete a category by value
    ///
    /// # Errors
    /// Store failure
    pub async fn delete_category(&self, value: &str) -> Result<bool, CategoryError> {
        let deleted = self
            .store
            .delete_one(&CategoryFilter::by_value(value))
            .await?;
        if deleted > 0 {
            tracing::info!(%value, "deleted category");
        }
        Ok(deleted > 0)
    }

    /// All categories, active and inactive, sorted by order, then label
    ///
    /// # Errors
    /// Store failure
    pub async fn get_all_categories(&self) -> Result<Vec<AgentCategory>, CategoryError> {
        let mut categories = self.store.find_all(&CategoryFilter::all()).await?;
        sort_for_display(&mut categories);
        Ok(categories)
    }

    /// Reconcile the store against `defaults`, returning whether anything changed
    ///
    /// # Errors
    /// See [`sync::reconcile`]
    pub async fn reconcile(&self, defaults: &[DefaultCategory]) -> Result<bool, CategoryError> {
        Ok(self.reconcile_report(defaults).await?.changed())
    }

    /// Reconcile the store against `defaults`, returning the counts
    ///
    /// # Errors
    /// See [`sync::reconcile`]
    pub async fn reconcile_report(
        &self,
        defaults: &[DefaultCategory],
    ) -> Result<SyncReport, CategoryError> {
        sync::reconcile(&*self.store, defaults, &self.config.localization_prefix).await
    }

    /// Reconcile against the configured default set
    ///
    /// # Errors
    /// See [`sync::reconcile`]
    pub async fn ensure_default_categories(&self) -> Result<bool, CategoryError> {
        self.reconcile(&self.config.defaults).await
    }
}

fn sort_for_display(categories: &mut [AgentCategory]) {
    categories.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.label.cmp(&b.label)));
}
