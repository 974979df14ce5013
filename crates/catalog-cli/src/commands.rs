//! `catalogctl` subcommands

use crate::export::{to_csv, to_json, ExportFormat};
use anyhow::Context;
use catalog_category::{
    AgentCategory, CategoryRepository, MemoryCategoryStore, SyncConfig, SyncReport,
};
use catalog_icons::{CustomIconRule, EndpointDescriptor, IconResolver, ModelList};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

/// Placeholder printed when no provider icon applies
pub const DEFAULT_ICON: &str = "(default)";

/// Arguments of the `icon` subcommand
#[derive(Debug, Clone, Default)]
pub struct IconQuery {
    pub name: Option<String>,
    pub models: Vec<String>,
    pub base_url: Option<String>,
    pub icon_url: Option<String>,
    pub rules: Vec<CustomIconRule>,
}

impl IconQuery {
    fn into_parts(self) -> (EndpointDescriptor, IconResolver) {
        let mut endpoint = EndpointDescriptor::new();
        endpoint.name = self.name;
        endpoint.base_url = self.base_url;
        endpoint.icon_url = self.icon_url;
        if !self.models.is_empty() {
            endpoint = endpoint.with_models(ModelList::Many(self.models));
        }
        (endpoint, IconResolver::new().with_rules(self.rules))
    }
}

/// Resolve the icon path for the queried endpoint
pub fn icon_for(query: IconQuery) -> String {
    let (endpoint, resolver) = query.into_parts();
    let icon = resolver
        .icon_for(&endpoint)
        .unwrap_or(DEFAULT_ICON)
        .to_string();
    tracing::debug!(?endpoint, custom_rules = resolver.custom_len(), %icon, "resolved endpoint icon");
    icon
}

/// Read extra icon rules from a JSON array of `{keywords, asset}` objects
///
/// Keywords are normalized as they are read.
///
/// # Errors
/// File unreadable or not a rule list
pub async fn load_icon_rules(path: &Path) -> anyhow::Result<Vec<CustomIconRule>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read icon rules {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid icon rules {}", path.display()))
}

async fn open_repository(
    store_path: &Path,
) -> anyhow::Result<CategoryRepository<MemoryCategoryStore>> {
    let store = MemoryCategoryStore::load(store_path)
        .await
        .with_context(|| format!("failed to load category snapshot {}", store_path.display()))?;
    Ok(CategoryRepository::new(Arc::new(store)))
}

/// Reconcile a snapshot against the built-in or file-provided defaults
///
/// The snapshot is only rewritten when something changed.
///
/// # Errors
/// Snapshot or defaults unreadable, or reconciliation failure
pub async fn sync_categories(
    store_path: &Path,
    defaults_path: Option<&Path>,
) -> anyhow::Result<SyncReport> {
    let config = match defaults_path {
        Some(path) => SyncConfig::load(path)
            .await
            .with_context(|| format!("failed to load defaults {}", path.display()))?,
        None => SyncConfig::default(),
    };

    let repo = open_repository(store_path).await?.with_config(config);
    let report = repo
        .reconcile_report(&repo.config().defaults)
        .await
        .context("category reconciliation failed")?;

    if report.changed() {
        repo.store()
            .save(store_path)
            .await
            .with_context(|| format!("failed to save {}", store_path.display()))?;
    }
    Ok(report)
}

/// Categories of a snapshot, active only unless `all`
///
/// # Errors
/// Snapshot unreadable
pub async fn list_categories(store_path: &Path, all: bool) -> anyhow::Result<Vec<AgentCategory>> {
    let repo = open_repository(store_path).await?;
    let categories = if all {
        repo.get_all_categories().await?
    } else {
        repo.get_active_categories().await?
    };
    Ok(categories)
}

/// Write every category of a snapshot to `out`, returning the count
///
/// # Errors
/// Snapshot unreadable or output not writable
pub async fn export_categories(
    store_path: &Path,
    format: ExportFormat,
    out: &Path,
) -> anyhow::Result<usize> {
    let categories = list_categories(store_path, true).await?;
    let body = match format {
        ExportFormat::Json => to_json(&categories)?,
        ExportFormat::Csv => to_csv(&categories),
    };
    tokio::fs::write(out, body)
        .await
        .with_context(|| format!("failed to write {}", out.display()))?;

    tracing::info!(count = categories.len(), out = %out.display(), "exported categories");
    Ok(categories.len())
}

/// Plain-text table for `list`
pub fn render_table(categories: &[AgentCategory]) -> String {
    let width = categories
        .iter()
        .map(|c| c.value.len())
        .max()
        .unwrap_or(0)
        .max("VALUE".len());

    let mut out = format!("{:<5} {:<width$} {:<6} {:<6} LABEL\n", "ORDER", "VALUE", "ACTIVE", "CUSTOM");
    for c in categories {
        let _ = writeln!(
            out,
            "{:<5} {:<width$} {:<6} {:<6} {}",
            c.order,
            c.value,
            yes_no(c.is_active),
            yes_no(c.custom),
            c.label
        );
    }
    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
