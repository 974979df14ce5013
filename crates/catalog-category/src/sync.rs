//! Default category synchronization
//!
//! Reconciles the stored collection against a default set:
//! - missing defaults are inserted active and non-custom
//! - non-custom defaults with unlocalized labels are relabeled
//! - inactive non-custom defaults are reactivated
//! - active non-custom records outside the set are deactivated
//!
//! Custom records are never touched. There is no transaction and no lock;
//! a run interrupted midway converges when re-run, and callers must not run
//! two reconciliations against the same store at once.

use crate::error::CategoryError;
use crate::model::{AgentCategory, CategoryPatch, DefaultCategory};
use crate::store::{BulkOptions, CategoryFilter, CategoryStore, WriteOp};
use std::collections::{HashMap, HashSet};

/// Counts of what a reconciliation did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Defaults inserted
    pub created: usize,
    /// Queued label/description and activation updates
    pub updated: usize,
    /// Stale records deactivated
    pub deactivated: usize,
}

impl SyncReport {
    /// Check if the collection was changed
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        self.created > 0 || self.updated > 0 || self.deactivated > 0
    }
}

/// Update queued for the second bulk pass
#[derive(Debug, Clone, PartialEq, Eq)]
enum QueuedUpdate {
    Localize {
        value: String,
        label: String,
        description: String,
    },
    Activate {
        value: String,
    },
}

impl QueuedUpdate {
    /// Both kinds set the record active; custom records are filtered out
    /// again at write time.
    fn into_op(self) -> WriteOp {
        let (value, patch) = match self {
            Self::Localize {
                value,
                label,
                description,
            } => (
                value,
                CategoryPatch::new()
                    .label(label)
                    .description(description)
                    .active(true),
            ),
            Self::Activate { value } => (value, CategoryPatch::new().active(true)),
        };
        WriteOp::UpdateOne {
            filter: CategoryFilter::by_value(value).non_custom(),
            patch,
        }
    }
}

/// Reconcile the store against `defaults`
///
/// Defaults are processed in list order; when a value repeats, the first
/// entry wins.
///
/// # Errors
/// Store failures propagate. A bulk pass with failed operations surfaces as
/// `StoreError::PartialWrite` after every operation of that pass has been
/// attempted.
pub async fn reconcile<S>(
    store: &S,
    defaults: &[DefaultCategory],
    localization_prefix: &str,
) -> Result<SyncReport, CategoryError>
where
    S: CategoryStore + ?Sized,
{
    let existing = store.find_all(&CategoryFilter::all()).await?;
    let existing_by_value: HashMap<&str, &AgentCategory> =
        existing.iter().map(|c| (c.value.as_str(), c)).collect();
    let default_values: HashSet<&str> = defaults.iter().map(|d| d.value.as_str()).collect();

    let mut report = SyncReport::default();
    let mut updates = Vec::new();
    let mut seen = HashSet::new();

    for default in defaults {
        if !seen.insert(default.value.as_str()) {
            tracing::warn!(value = %default.value, "duplicate default category ignored");
            continue;
        }

        match existing_by_value.get(default.value.as_str()) {
            None => {
                store.insert(default.to_new_category()).await?;
                report.created += 1;
                tracing::debug!(value = %default.value, "created default category");
            }
            Some(current) if current.custom => {
                tracing::debug!(value = %default.value, "skipping custom category");
            }
            Some(current) => {
                if !current.is_localized(localization_prefix) {
                    updates.push(QueuedUpdate::Localize {
                        value: default.value.clone(),
                        label: default.label.clone(),
                        description: default.description.clone(),
                    });
                }
                if !current.is_active {
                    updates.push(QueuedUpdate::Activate {
                        value: default.value.clone(),
                    });
                }
            }
        }
    }

    let stale: Vec<WriteOp> = existing
        .iter()
        .filter(|c| !c.custom && c.is_active && !default_values.contains(c.value.as_str()))
        .map(|c| WriteOp::UpdateOne {
            filter: CategoryFilter::by_value(c.value.clone()),
            patch: CategoryPatch::new().active(false),
        })
        .collect();

    if !stale.is_empty() {
        report.deactivated = stale.len();
        store
            .bulk_write(stale, BulkOptions::unordered())
            .await?
            .into_result()?;
    }

    if !updates.is_empty() {
        report.updated = updates.len();
        let ops = updates.into_iter().map(QueuedUpdate::into_op).collect();
        store
            .bulk_write(ops, BulkOptions::unordered())
            .await?
            .into_result()?;
    }

    tracing::info!(
        created = report.created,
        updated = report.updated,
        deactivated = report.deactivated,
        "category reconciliation finished"
    );
    Ok(report)
}
