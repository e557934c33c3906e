//! Underwriting wizard rule engine: catalog, domain model, evaluation,
//! authoring reducer, persistence boundary, and the service facade.

pub mod catalog;
pub mod domain;
pub mod editor;
pub mod evaluation;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use catalog::{
    constraints_for, default_operator_for, default_value_for, operators_for,
    validate_numeric_value, FieldConstraints, FieldKind, NumericValidation, Operator,
    OperatorOption, TypeClass,
};
pub use domain::{
    ClientProfile, Condition, ConditionGroup, ConditionValue, DecisionTree, Gender, GroupLogic,
    HealthTier, Recommendation, Rule, RuleId, TreeId,
};
pub use editor::{apply_edit, EditError, TreeCommand};
pub use evaluation::{
    evaluate_condition, evaluate_group, resolve, rule_matches, RankedRecommendation,
};
pub use service::{UnderwritingService, WizardError};
pub use store::{DecisionTreeStore, MemoryTreeStore, StoreError, TreeRecord};
