//! Persistence boundary for decision trees.
//!
//! Trees are the sole unit of persistence; rules and recommendations live
//! inside their tree's JSON blob. The store owns identity/audit metadata and
//! the one cross-record invariant: at most one tree is the default, swapped
//! atomically so concurrent set-default calls can never leave two defaults.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{DecisionTree, TreeId};

/// Store record wrapping a tree with audit metadata the engine itself never
/// writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeRecord {
    pub tree: DecisionTree,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TreeRecord {
    pub fn new(tree: DecisionTree) -> Self {
        let now = Utc::now();
        Self {
            tree,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Error enumeration for store failures. Distinct from an empty resolution
/// result, which is a normal outcome.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("a decision tree with that name already exists")]
    Conflict,
    #[error("decision tree not found")]
    NotFound,
    #[error("tree store unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction so the service facade can be exercised in isolation.
pub trait DecisionTreeStore: Send + Sync {
    /// Insert a new record. Tree names are unique within the store.
    fn insert(&self, record: TreeRecord) -> Result<TreeRecord, StoreError>;
    /// Replace an existing record.
    fn update(&self, record: TreeRecord) -> Result<(), StoreError>;
    fn fetch(&self, id: &TreeId) -> Result<Option<TreeRecord>, StoreError>;
    fn delete(&self, id: &TreeId) -> Result<(), StoreError>;
    fn list(&self) -> Result<Vec<TreeRecord>, StoreError>;
    /// Atomically clear every other default flag and mark `id` as the
    /// default, in one unit. Never a read-check-then-write from the caller.
    fn set_default(&self, id: &TreeId) -> Result<(), StoreError>;
    /// The current default tree, if one is set.
    fn default_tree(&self) -> Result<Option<TreeRecord>, StoreError>;
}

/// In-memory reference store. A single mutex covers every record, which is
/// what makes `set_default` an atomic swap.
#[derive(Debug, Default)]
pub struct MemoryTreeStore {
    records: Mutex<HashMap<TreeId, TreeRecord>>,
}

impl MemoryTreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<MutexGuard<'_, HashMap<TreeId, TreeRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("tree store mutex poisoned".to_string()))
    }
}

impl DecisionTreeStore for MemoryTreeStore {
    fn insert(&self, record: TreeRecord) -> Result<TreeRecord, StoreError> {
        let mut records = self.guard()?;
        if records.contains_key(&record.tree.id) {
            return Err(StoreError::Conflict);
        }
        if records
            .values()
            .any(|existing| existing.tree.name == record.tree.name)
        {
            return Err(StoreError::Conflict);
        }
        records.insert(record.tree.id, record.clone());
        Ok(record)
    }

    fn update(&self, mut record: TreeRecord) -> Result<(), StoreError> {
        let mut records = self.guard()?;
        if !records.contains_key(&record.tree.id) {
            return Err(StoreError::NotFound);
        }
        record.updated_at = Utc::now();
        records.insert(record.tree.id, record);
        Ok(())
    }

    fn fetch(&self, id: &TreeId) -> Result<Option<TreeRecord>, StoreError> {
        Ok(self.guard()?.get(id).cloned())
    }

    fn delete(&self, id: &TreeId) -> Result<(), StoreError> {
        match self.guard()?.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    fn list(&self) -> Result<Vec<TreeRecord>, StoreError> {
        let mut records: Vec<TreeRecord> = self.guard()?.values().cloned().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }

    fn set_default(&self, id: &TreeId) -> Result<(), StoreError> {
        let mut records = self.guard()?;
        if !records.contains_key(id) {
            return Err(StoreError::NotFound);
        }
        let now = Utc::now();
        for (key, record) in records.iter_mut() {
            let should_be_default = key == id;
            if record.tree.is_default != should_be_default {
                record.tree.is_default = should_be_default;
                record.updated_at = now;
            }
        }
        Ok(())
    }

    fn default_tree(&self) -> Result<Option<TreeRecord>, StoreError> {
        Ok(self
            .guard()?
            .values()
            .find(|record| record.tree.is_default)
            .cloned())
    }
}
