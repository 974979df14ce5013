//! In-process agent directory used for category counts

use super::AgentCategoryCounter;
use crate::error::StoreError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;

/// Agent id to category value
#[derive(Debug, Default)]
pub struct MemoryAgentDirectory {
    assignments: DashMap<String, Option<String>>,
}

impl MemoryAgentDirectory {
    /// Create empty directory
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// File an agent under `category`, or clear it with `None`
    pub fn assign(&self, agent_id: impl Into<String>, category: Option<&str>) {
        self.assignments
            .insert(agent_id.into(), category.map(str::to_string));
    }

    /// Remove an agent
    pub fn remove(&self, agent_id: &str) -> bool {
        self.assignments.remove(agent_id).is_some()
    }

    /// Number of agents
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Check if directory is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

#[async_trait]
impl AgentCategoryCounter for MemoryAgentDirectory {
    async fn count_by_category(&self) -> Result<HashMap<String, u64>, StoreError> {
        let mut counts = HashMap::new();
        for entry in &self.assignments {
            if let Some(category) = entry.value() {
                *counts.entry(category.clone()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_skip_uncategorized() {
        let agents = MemoryAgentDirectory::new();
        agents.assign("a1", Some("hr"));
        agents.assign("a2", Some("hr"));
        agents.assign("a3", Some("business"));
        agents.assign("a4", None);

        let counts = agents.count_by_category().await.unwrap();
        assert_eq!(counts.get("hr"), Some(&2));
        assert_eq!(counts.get("business"), Some(&1));
        assert_eq!(counts.len(), 2);

        agents.assign("a3", None);
        assert!(agents.remove("a4"));
        let counts = agents.count_by_category().await.unwrap();
        assert!(!counts.contains_key("business"));
        assert_eq!(agents.len(), 3);
    }
}
