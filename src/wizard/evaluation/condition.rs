//! Single-condition and condition-group evaluation.
//!
//! Evaluation is lenient by design: a profile missing the referenced
//! attribute, or a condition whose operator/value shape does not fit the
//! field, evaluates to `false`. Shape problems are configuration errors the
//! editor prevents; the evaluator never raises.

use super::super::catalog::{FieldKind, Operator, TypeClass};
use super::super::domain::{ClientProfile, Condition, ConditionGroup};

/// Evaluate one condition against a profile.
pub fn evaluate_condition(condition: &Condition, profile: &ClientProfile) -> bool {
    match TypeClass::of(condition.field) {
        TypeClass::Numeric => numeric_match(condition, profile),
        TypeClass::Boolean => flag_match(condition, profile),
        TypeClass::Categorical => {
            if condition.field == FieldKind::ConditionPresent {
                presence_match(condition, profile)
            } else {
                categorical_match(condition, profile)
            }
        }
    }
}

/// Evaluate a condition group. An empty condition list matches every
/// profile in both modes: a rule with no conditions is an intentional
/// catch-all, mirroring the authoring surface's "matches all clients" copy.
pub fn evaluate_group(group: &ConditionGroup, profile: &ClientProfile) -> bool {
    if group.conditions().is_empty() {
        return true;
    }
    match group {
        ConditionGroup::All(conditions) => conditions
            .iter()
            .all(|condition| evaluate_condition(condition, profile)),
        ConditionGroup::Any(conditions) => conditions
            .iter()
            .any(|condition| evaluate_condition(condition, profile)),
    }
}

fn numeric_match(condition: &Condition, profile: &ClientProfile) -> bool {
    let Some(actual) = profile.numeric(condition.field) else {
        return false;
    };
    let Some(expected) = condition.value.as_number() else {
        return false;
    };
    match condition.operator {
        Operator::Eq => actual == expected,
        Operator::Ne => actual != expected,
        Operator::Gt => actual > expected,
        Operator::Lt => actual < expected,
        Operator::Ge => actual >= expected,
        Operator::Le => actual <= expected,
        Operator::In | Operator::NotIn => false,
    }
}

fn flag_match(condition: &Condition, profile: &ClientProfile) -> bool {
    let Some(actual) = profile.flag(condition.field) else {
        return false;
    };
    let Some(expected) = condition.value.as_flag() else {
        return false;
    };
    // The catalog only offers equality for boolean fields.
    condition.operator == Operator::Eq && actual == expected
}

fn categorical_match(condition: &Condition, profile: &ClientProfile) -> bool {
    let Some(actual) = profile.categorical(condition.field) else {
        return false;
    };
    match condition.operator {
        Operator::Eq => condition.value.as_text() == Some(actual),
        Operator::Ne => condition
            .value
            .as_text()
            .is_some_and(|expected| expected != actual),
        Operator::In => condition
            .value
            .as_code_set()
            .is_some_and(|codes| codes.contains(&actual)),
        Operator::NotIn => condition
            .value
            .as_code_set()
            .is_some_and(|codes| !codes.contains(&actual)),
        _ => false,
    }
}

/// Membership test against the profile's set of present condition codes,
/// independent of ordering. The code set is always present, so a negated
/// test against an empty set is satisfied.
fn presence_match(condition: &Condition, profile: &ClientProfile) -> bool {
    let Some(codes) = condition.value.as_code_set() else {
        return false;
    };
    match condition.operator {
        Operator::Eq | Operator::In => codes.iter().any(|code| profile.conditions.contains(*code)),
        Operator::Ne | Operator::NotIn => {
            codes.iter().all(|code| !profile.conditions.contains(*code))
        }
        _ => false,
    }
}
