//! Catalog CLI
//!
//! Command implementations behind `catalogctl`. Every category command works
//! on a JSON snapshot of the collection, loaded into a
//! [`MemoryCategoryStore`](catalog_category::MemoryCategoryStore) and written
//! back when the command changes it.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod commands;
pub mod export;
pub mod logging;

pub use commands::{
    export_categories, icon_for, list_categories, load_icon_rules, render_table, sync_categories,
    IconQuery,
};
pub use export::{to_csv, to_json, ExportFormat};
pub use logging::init_tracing;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
