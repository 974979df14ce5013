//! Catalog Category
//!
//! Agent category documents, the store they live in, and the synchronizer
//! that keeps the default set in place.
//!
//! # Architecture
//!
//! ```text
//! startup / admin tooling
//!          │
//!          ▼
//! CategoryRepository ──► sync::reconcile
//!          │                   │
//!          ▼                   ▼
//!   Arc<dyn CategoryStore>  (find_all, insert, bulk_write)
//! ```
//!
//! # Example
//!
//! ```rust
//! use catalog_category::{CategoryRepository, MemoryCategoryStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), catalog_category::CategoryError> {
//! let repo = CategoryRepository::new(Arc::new(MemoryCategoryStore::new()));
//!
//! assert!(repo.ensure_default_categories().await?);
//! assert!(!repo.ensure_default_categories().await?);
//!
//! let active = repo.get_active_categories().await?;
//! assert_eq!(active[0].value, "business");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod store;
pub mod sync;

// Re-exports for convenience
pub use config::{ConfigFormat, SyncConfig};
pub use error::{CategoryError, ConfigError, StoreError};
pub use model::{
    default_categories, AgentCategory, CategoryPatch, CategorySeed, CategoryWithCount,
    DefaultCategory, NewCategory, DEFAULT_CATEGORY_VALUES, LOCALIZATION_PREFIX,
};
pub use repository::CategoryRepository;
pub use store::{
    AgentCategoryCounter, BulkOptions, BulkWriteResult, CategoryFilter, CategoryStore,
    MemoryAgentDirectory, MemoryCategoryStore, WriteFailure, WriteOp,
};
pub use sync::{reconcile, SyncReport};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with categories
    pub use crate::{
        AgentCategory, CategoryError, CategoryPatch, CategoryRepository, CategoryStore,
        DefaultCategory, MemoryCategoryStore, NewCategory, SyncConfig, SyncReport,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
