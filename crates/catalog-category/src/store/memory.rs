//! In-process category store
//!
//! Documents live in an insertion-ordered map keyed by `value`, which doubles
//! as the unique index. The whole collection can be persisted to and loaded
//! from a JSON snapshot.

use super::{
    BulkOptions, BulkWriteResult, CategoryFilter, CategoryStore, WriteFailure, WriteOp,
};
use crate::error::StoreError;
use crate::model::{AgentCategory, CategoryPatch, NewCategory};
use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::io::ErrorKind;
use std::path::Path;
use ulid::Ulid;

/// Category store held in memory
#[derive(Debug, Default)]
pub struct MemoryCategoryStore {
    docs: RwLock<IndexMap<String, AgentCategory>>,
}

impl MemoryCategoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create store holding `categories`
    ///
    /// Later documents replace earlier ones with the same value.
    #[must_use]
    pub fn from_categories(categories: impl IntoIterator<Item = AgentCategory>) -> Self {
        let docs = categories
            .into_iter()
            .map(|category| (category.value.clone(), category))
            .collect();
        Self {
            docs: RwLock::new(docs),
        }
    }

    /// Copy of every document in storage order
    #[must_use]
    pub fn snapshot(&self) -> Vec<AgentCategory> {
        self.docs.read().values().cloned().collect()
    }

    /// Number of documents
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    /// Load a JSON snapshot; a missing file yields an empty store
    ///
    /// # Errors
    /// IO failures other than not-found, or malformed JSON
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let categories: Vec<AgentCategory> = serde_json::from_slice(&bytes)?;
                tracing::debug!(path = %path.display(), count = categories.len(), "loaded category snapshot");
                Ok(Self::from_categories(categories))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no category snapshot, starting empty");
                Ok(Self::new())
            }
            Err(e) => Err(StoreError::io_error(path, e)),
        }
    }

    /// Write the collection as a pretty-printed JSON snapshot
    ///
    /// # Errors
    /// Serialization or IO failure
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let bytes = serde_json::to_vec_pretty(&self.snapshot())?;
        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| StoreError::io_error(path, e))
    }

    fn insert_doc(
        docs: &mut IndexMap<String, AgentCategory>,
        category: NewCategory,
    ) -> Result<AgentCategory, StoreError> {
        validate_new(&category)?;
        if docs.contains_key(&category.value) {
            return Err(StoreError::DuplicateKey(category.value));
        }
        let doc = category.into_document(Ulid::new().to_string(), Utc::now());
        docs.insert(doc.value.clone(), doc.clone());
        Ok(doc)
    }

    fn first_match<'a>(
        docs: &'a mut IndexMap<String, AgentCategory>,
        filter: &CategoryFilter,
    ) -> Option<&'a mut AgentCategory> {
        match &filter.value {
            Some(value) => docs.get_mut(value).filter(|doc| filter.matches(doc)),
            None => docs.values_mut().find(|doc| filter.matches(doc)),
        }
    }

    /// Returns (matched, modified)
    fn update_doc(
        docs: &mut IndexMap<String, AgentCategory>,
        filter: &CategoryFilter,
        patch: &CategoryPatch,
    ) -> Result<(bool, bool), StoreError> {
        validate_patch(patch)?;
        Ok(match Self::first_match(docs, filter) {
            Some(doc) => (true, patch.apply(doc, Utc::now())),
            None => (false, false),
        })
    }
}

fn validate_new(category: &NewCategory) -> Result<(), StoreError> {
    if category.value.trim().is_empty() {
        return Err(StoreError::InvalidDocument("value must not be blank".into()));
    }
    if category.label.trim().is_empty() {
        return Err(StoreError::InvalidDocument(format!(
            "label of '{}' must not be blank",
            category.value
        )));
    }
    Ok(())
}

fn validate_patch(patch: &CategoryPatch) -> Result<(), StoreError> {
    match &patch.label {
        Some(label) if label.trim().is_empty() => {
            Err(StoreError::InvalidDocument("label must not be blank".into()))
        }
        _ => Ok(()),
    }
}

#[async_trait]
impl CategoryStore for MemoryCategoryStore {
    async fn find_all(&self, filter: &CategoryFilter) -> Result<Vec<AgentCategory>, StoreError> {
        Ok(self
            .docs
            .read()
            .values()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect())
    }

    async fn find_one(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Option<AgentCategory>, StoreError> {
        let docs = self.docs.read();
        Ok(match &filter.value {
            Some(value) => docs.get(value).filter(|doc| filter.matches(doc)).cloned(),
            None => docs.values().find(|doc| filter.matches(doc)).cloned(),
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<AgentCategory>, StoreError> {
        Ok(self.docs.read().values().find(|doc| doc.id == id).cloned())
    }

    async fn insert(&self, category: NewCategory) -> Result<AgentCategory, StoreError> {
        Self::insert_doc(&mut self.docs.write(), category)
    }

    async fn bulk_write(
        &self,
        ops: Vec<WriteOp>,
        options: BulkOptions,
    ) -> Result<BulkWriteResult, StoreError> {
        let mut docs = self.docs.write();
        let mut result = BulkWriteResult {
            attempted: ops.len(),
            ..BulkWriteResult::default()
        };

        for (index, op) in ops.into_iter().enumerate() {
            let outcome = match op {
                WriteOp::UpdateOne { filter, patch } => {
                    Self::update_doc(&mut docs, &filter, &patch).map(|(matched, modified)| {
                        result.matched += usize::from(matched);
                        result.modified += usize::from(modified);
                    })
                }
                WriteOp::UpsertOne { filter, on_insert } => {
                    if Self::first_match(&mut docs, &filter).is_some() {
                        result.matched += 1;
                        Ok(())
                    } else {
                        Self::insert_doc(&mut docs, on_insert).map(|_| result.upserted += 1)
                    }
                }
            };

            if let Err(e) = outcome {
                result.write_errors.push(WriteFailure {
                    index,
                    message: e.to_string(),
                });
                if options.ordered {
                    break;
                }
            }
        }

        Ok(result)
    }

    async fn update_one(
        &self,
        filter: &CategoryFilter,
        patch: CategoryPatch,
    ) -> Result<Option<AgentCategory>, StoreError> {
        validate_patch(&patch)?;
        let mut docs = self.docs.write();
        Ok(Self::first_match(&mut docs, filter).map(|doc| {
            patch.apply(doc, Utc::now());
            doc.clone()
        }))
    }

    async fn delete_one(&self, filter: &CategoryFilter) -> Result<u64, StoreError> {
        let mut docs = self.docs.write();
        let key = match &filter.value {
            Some(value) => docs
                .get(value)
                .filter(|doc| filter.matches(doc))
                .map(|doc| doc.value.clone()),
            None => docs
                .values()
                .find(|doc| filter.matches(doc))
                .map(|doc| doc.value.clone()),
        };
        Ok(key.map_or(0, |key| u64::from(docs.shift_remove(&key).is_some())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_rejects_duplicates_and_blank_values() {
        let store = MemoryCategoryStore::new();
        store.insert(NewCategory::new("hr", "HR")).await.unwrap();

        let dup = store.insert(NewCategory::new("hr", "Other")).await;
        assert!(matches!(dup, Err(StoreError::DuplicateKey(v)) if v == "hr"));

        let blank = store.insert(NewCategory::new("  ", "Blank")).await;
        assert!(matches!(blank, Err(StoreError::InvalidDocument(_))));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn upsert_never_overwrites() {
        let store = MemoryCategoryStore::new();
        store.insert(NewCategory::new("hr", "People")).await.unwrap();

        let result = store
            .bulk_write(
                vec![
                    WriteOp::UpsertOne {
                        filter: CategoryFilter::by_value("hr"),
                        on_insert: NewCategory::new("hr", "HR"),
                    },
                    WriteOp::UpsertOne {
                        filter: CategoryFilter::by_value("legal"),
                        on_insert: NewCategory::new("legal", "Legal"),
                    },
                ],
                BulkOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(result.matched, 1);
        assert_eq!(result.upserted, 1);
        let hr = store
            .find_one(&CategoryFilter::by_value("hr"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hr.label, "People");
    }

    #[tokio::test]
    async fn ordered_bulk_stops_unordered_continues() {
        let ops = || {
            vec![
                WriteOp::UpdateOne {
                    filter: CategoryFilter::by_value("a"),
                    patch: CategoryPatch::new().label(""),
                },
                WriteOp::UpdateOne {
                    filter: CategoryFilter::by_value("b"),
                    patch: CategoryPatch::new().active(false),
                },
            ]
        };
        let seed = || {
            MemoryCategoryStore::from_categories([
                NewCategory::new("a", "A").into_document("1".into(), Utc::now()),
                NewCategory::new("b", "B").into_document("2".into(), Utc::now()),
            ])
        };

        let ordered = seed();
        let result = ordered.bulk_write(ops(), BulkOptions::ordered()).await.unwrap();
        assert_eq!(result.write_errors.len(), 1);
        assert_eq!(result.modified, 0);

        let unordered = seed();
        let result = unordered
            .bulk_write(ops(), BulkOptions::unordered())
            .await
            .unwrap();
        assert_eq!(result.write_errors[0].index, 0);
        assert_eq!(result.modified, 1);
        assert!(!unordered
            .find_one(&CategoryFilter::by_value("b"))
            .await
            .unwrap()
            .unwrap()
            .is_active);
    }

    #[tokio::test]
    async fn delete_respects_filter() {
        let store = MemoryCategoryStore::from_categories([NewCategory::new("a", "A")
            .custom()
            .into_document("1".into(), Utc::now())]);

        let removed = store
            .delete_one(&CategoryFilter::by_value("a").non_custom())
            .await
            .unwrap();
        assert_eq!(removed, 0);
        assert_eq!(store.delete_one(&CategoryFilter::by_value("a")).await.unwrap(), 1);
        assert!(store.is_empty());
    }
}
