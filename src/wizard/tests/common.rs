use std::sync::Arc;

use crate::wizard::catalog::{FieldKind, Operator};
use crate::wizard::domain::{
    ClientProfile, Condition, ConditionGroup, ConditionValue, DecisionTree, Gender, HealthTier,
    Recommendation, Rule,
};
use crate::wizard::service::UnderwritingService;
use crate::wizard::store::{DecisionTreeStore, MemoryTreeStore, StoreError, TreeRecord};
use crate::wizard::TreeId;

pub(super) fn applicant() -> ClientProfile {
    ClientProfile {
        age: Some(65),
        gender: Some(Gender::Female),
        bmi: Some(27.4),
        tobacco: Some(false),
        health_tier: Some(HealthTier::Standard),
        face_amount: Some(250_000),
        state: Some("IA".to_string()),
        conditions: ["diabetes_type_2".to_string(), "hypertension".to_string()]
            .into_iter()
            .collect(),
        insulin_use: Some(false),
        blood_thinners: Some(false),
        antidepressants: None,
        bp_med_count: Some(1),
        cholesterol_med_count: Some(0),
        pain_medications: None,
    }
}

pub(super) fn blank_profile() -> ClientProfile {
    ClientProfile::default()
}

pub(super) fn condition(field: FieldKind, operator: Operator, value: ConditionValue) -> Condition {
    Condition {
        field,
        operator,
        value,
    }
}

pub(super) fn age_condition(operator: Operator, threshold: f64) -> Condition {
    condition(FieldKind::Age, operator, ConditionValue::Number(threshold))
}

pub(super) fn recommendation(carrier: &str, products: &[&str], priority: u32) -> Recommendation {
    Recommendation {
        carrier_id: carrier.to_string(),
        product_ids: products.iter().map(|product| product.to_string()).collect(),
        priority,
        notes: None,
    }
}

pub(super) fn rule_with(
    name: &str,
    conditions: ConditionGroup,
    recommendations: Vec<Recommendation>,
) -> Rule {
    Rule {
        recommendations,
        conditions,
        ..Rule::new(name)
    }
}

pub(super) fn senior_tree() -> DecisionTree {
    let mut tree = DecisionTree::new("Senior term", "Ages 60 and up");
    tree.rules.push(rule_with(
        "Senior applicants",
        ConditionGroup::All(vec![age_condition(Operator::Ge, 60.0)]),
        vec![recommendation("A", &["p1"], 1)],
    ));
    tree
}

pub(super) fn build_service() -> (UnderwritingService<MemoryTreeStore>, Arc<MemoryTreeStore>) {
    let store = Arc::new(MemoryTreeStore::new());
    let service = UnderwritingService::new(store.clone());
    (service, store)
}

pub(super) struct UnavailableStore;

impl DecisionTreeStore for UnavailableStore {
    fn insert(&self, _record: TreeRecord) -> Result<TreeRecord, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: TreeRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &TreeId) -> Result<Option<TreeRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &TreeId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<TreeRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn set_default(&self, _id: &TreeId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn default_tree(&self) -> Result<Option<TreeRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}
