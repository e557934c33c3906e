use std::sync::Arc;

use super::domain::{ClientProfile, DecisionTree, RuleId, TreeId};
use super::editor::{apply_edit, EditError, TreeCommand};
use super::evaluation::{resolve, RankedRecommendation};
use super::store::{DecisionTreeStore, StoreError, TreeRecord};

/// Service facade composing the tree store, the editor reducer, and the
/// resolver. This is the surface the surrounding application calls.
pub struct UnderwritingService<S> {
    store: Arc<S>,
}

impl<S> UnderwritingService<S>
where
    S: DecisionTreeStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create an empty tree: active, not the default, no rules.
    pub fn create_tree(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<TreeRecord, WizardError> {
        let tree = DecisionTree::new(name, description);
        let record = self.store.insert(TreeRecord::new(tree))?;
        tracing::info!(tree = %record.tree.name, id = %record.tree.id, "created decision tree");
        Ok(record)
    }

    /// Deep-copy an existing tree under a new name. Tree and rule ids are
    /// regenerated so the clone shares no identity with the source.
    pub fn clone_tree(
        &self,
        id: &TreeId,
        new_name: impl Into<String>,
    ) -> Result<TreeRecord, WizardError> {
        let source = self.fetch_tree(id)?;
        let mut tree = source.tree;
        tree.id = TreeId::generate();
        tree.name = new_name.into();
        tree.is_default = false;
        for rule in &mut tree.rules {
            rule.id = RuleId::generate();
        }
        let record = self.store.insert(TreeRecord::new(tree))?;
        tracing::info!(tree = %record.tree.name, source = %id, "cloned decision tree");
        Ok(record)
    }

    /// Apply one authoring command and persist the result.
    pub fn edit(&self, id: &TreeId, command: TreeCommand) -> Result<TreeRecord, WizardError> {
        let mut record = self.fetch_tree(id)?;
        record.tree = apply_edit(&record.tree, command)?;
        self.store.update(record.clone())?;
        Ok(record)
    }

    pub fn get(&self, id: &TreeId) -> Result<TreeRecord, WizardError> {
        Ok(self.fetch_tree(id)?)
    }

    pub fn list(&self) -> Result<Vec<TreeRecord>, WizardError> {
        Ok(self.store.list()?)
    }

    pub fn delete(&self, id: &TreeId) -> Result<(), WizardError> {
        Ok(self.store.delete(id)?)
    }

    /// Make `id` the resolution target. Delegated to the store so the swap
    /// is a single atomic unit.
    pub fn set_default(&self, id: &TreeId) -> Result<(), WizardError> {
        self.store.set_default(id)?;
        tracing::info!(tree = %id, "default decision tree changed");
        Ok(())
    }

    /// Resolve `profile` against the default active tree.
    ///
    /// A missing or inactive default tree surfaces as
    /// [`StoreError::NotFound`]; an empty recommendation list is `Ok` and
    /// must be handled by callers as a normal "no recommendation" outcome.
    pub fn recommend(
        &self,
        profile: &ClientProfile,
    ) -> Result<Vec<RankedRecommendation>, WizardError> {
        let record = match self.store.default_tree()? {
            Some(record) if record.tree.is_active => record,
            _ => return Err(WizardError::Store(StoreError::NotFound)),
        };

        let ranked = resolve(&record.tree, profile);
        tracing::debug!(
            tree = %record.tree.name,
            recommendations = ranked.len(),
            "resolved client profile"
        );
        Ok(ranked)
    }

    fn fetch_tree(&self, id: &TreeId) -> Result<TreeRecord, StoreError> {
        self.store.fetch(id)?.ok_or(StoreError::NotFound)
    }
}

/// Error raised by the service facade.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
