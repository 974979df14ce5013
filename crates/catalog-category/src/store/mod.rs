//! Category collection access
//!
//! [`CategoryStore`] is the explicit handle to the category collection that
//! the repository and synchronizer are constructed with. It exposes the
//! small document-store surface they need: filtered reads, single inserts,
//! filtered updates and deletes, and bulk writes.

mod agents;
mod memory;

pub use agents::MemoryAgentDirectory;
pub use memory::MemoryCategoryStore;

use crate::error::StoreError;
use crate::model::{AgentCategory, CategoryPatch, NewCategory};
use async_trait::async_trait;
use std::collections::HashMap;

/// Document filter over category fields
///
/// Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    /// Exact value
    pub value: Option<String>,
    /// Active flag
    pub is_active: Option<bool>,
    /// Document's `custom` must differ from this
    pub custom_ne: Option<bool>,
}

impl CategoryFilter {
    /// Match every document
    #[inline]
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Match by value
    #[inline]
    #[must_use]
    pub fn by_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Match active documents
    #[inline]
    #[must_use]
    pub fn active() -> Self {
        Self {
            is_active: Some(true),
            ..Self::default()
        }
    }

    /// Additionally exclude custom documents
    #[inline]
    #[must_use]
    pub fn non_custom(mut self) -> Self {
        self.custom_ne = Some(true);
        self
    }

    /// Check a document against the filter
    #[must_use]
    pub fn matches(&self, category: &AgentCategory) -> bool {
        self.value.as_ref().map_or(true, |v| *v == category.value)
            && self.is_active.map_or(true, |a| a == category.is_active)
            && self.custom_ne.map_or(true, |c| c != category.custom)
    }
}

/// Single operation of a bulk write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Patch the first document matching `filter`
    UpdateOne {
        filter: CategoryFilter,
        patch: CategoryPatch,
    },
    /// Insert `on_insert` unless a document matches `filter`
    ///
    /// Existing documents are left untouched.
    UpsertOne {
        filter: CategoryFilter,
        on_insert: NewCategory,
    },
}

/// Bulk write execution options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOptions {
    /// Stop at the first failing operation
    pub ordered: bool,
}

impl BulkOptions {
    /// Ordered execution
    #[inline]
    #[must_use]
    pub fn ordered() -> Self {
        Self { ordered: true }
    }

    /// Unordered execution: every operation is attempted
    #[inline]
    #[must_use]
    pub fn unordered() -> Self {
        Self { ordered: false }
    }
}

impl Default for BulkOptions {
    fn default() -> Self {
        Self::ordered()
    }
}

/// Failure of one bulk operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    /// Index of the operation in the submitted batch
    pub index: usize,
    /// Failure message
    pub message: String,
}

/// Aggregate outcome of a bulk write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkWriteResult {
    /// Operations submitted
    pub attempted: usize,
    /// Documents matched by update or upsert filters
    pub matched: usize,
    /// Documents actually changed
    pub modified: usize,
    /// Documents inserted by upserts
    pub upserted: usize,
    /// Per-operation failures
    pub write_errors: Vec<WriteFailure>,
}

impl BulkWriteResult {
    /// Check if every operation succeeded
    #[inline]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.write_errors.is_empty()
    }

    /// Collapse per-operation failures into one aggregate error
    ///
    /// # Errors
    /// `StoreError::PartialWrite` if any operation failed
    pub fn into_result(self) -> Result<Self, StoreError> {
        match self.write_errors.first() {
            None => Ok(self),
            Some(first) => Err(StoreError::PartialWrite {
                failed: self.write_errors.len(),
                attempted: self.attempted,
                first: first.message.clone(),
            }),
        }
    }
}

/// Handle to the category collection
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All documents matching `filter`, in storage order
    async fn find_all(&self, filter: &CategoryFilter) -> Result<Vec<AgentCategory>, StoreError>;

    /// First document matching `filter`
    async fn find_one(&self, filter: &CategoryFilter)
        -> Result<Option<AgentCategory>, StoreError>;

    /// Document by store identifier
    async fn find_by_id(&self, id: &str) -> Result<Option<AgentCategory>, StoreError>;

    /// Insert one document
    ///
    /// # Errors
    /// `StoreError::DuplicateKey` if the value is taken
    async fn insert(&self, category: NewCategory) -> Result<AgentCategory, StoreError>;

    /// Execute a batch of writes
    ///
    /// Per-operation failures are reported in the result, not as `Err`.
    async fn bulk_write(
        &self,
        ops: Vec<WriteOp>,
        options: BulkOptions,
    ) -> Result<BulkWriteResult, StoreError>;

    /// Patch the first document matching `filter`, returning it after the update
    async fn update_one(
        &self,
        filter: &CategoryFilter,
        patch: CategoryPatch,
    ) -> Result<Option<AgentCategory>, StoreError>;

    /// Delete the first document matching `filter`, returning the number removed
    async fn delete_one(&self, filter: &CategoryFilter) -> Result<u64, StoreError>;
}

/// Source of agent-to-category assignments
#[async_trait]
pub trait AgentCategoryCounter: Send + Sync {
    /// Number of agents per category value
    ///
    /// Agents without a category are not counted.
    async fn count_by_category(&self) -> Result<HashMap<String, u64>, StoreError>;
}
