//! Pure command reducer for authoring decision trees.
//!
//! Every mutation the builder UI can perform is expressed as a
//! [`TreeCommand`] applied through [`apply_edit`], which returns a new tree
//! and leaves the input untouched. The reducer owns the editor invariants:
//! type-consistent condition values, contiguous recommendation priorities,
//! carrier-scoped product selections, and fresh identity on duplication.

use super::catalog::{
    self, clamp_numeric, default_operator_for, default_value_for, FieldKind, Operator, TypeClass,
};
use super::domain::{
    Condition, ConditionValue, DecisionTree, GroupLogic, Recommendation, Rule, RuleId,
};

/// One authoring mutation against a decision tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeCommand {
    AddRule {
        name: String,
    },
    RenameRule {
        rule_id: RuleId,
        name: String,
    },
    SetRuleActive {
        rule_id: RuleId,
        active: bool,
    },
    DeleteRule {
        rule_id: RuleId,
    },
    /// Copy a rule under a fresh id, inserted directly after the source.
    DuplicateRule {
        rule_id: RuleId,
    },
    /// Switch ALL/ANY semantics without touching the condition list.
    SetGroupLogic {
        rule_id: RuleId,
        logic: GroupLogic,
    },
    AddCondition {
        rule_id: RuleId,
        field: FieldKind,
    },
    /// Re-target a condition; operator and value reset to the new field's
    /// defaults so no stale cross-type value survives.
    SetConditionField {
        rule_id: RuleId,
        index: usize,
        field: FieldKind,
    },
    SetConditionOperator {
        rule_id: RuleId,
        index: usize,
        operator: Operator,
    },
    SetConditionValue {
        rule_id: RuleId,
        index: usize,
        value: ConditionValue,
    },
    RemoveCondition {
        rule_id: RuleId,
        index: usize,
    },
    AddRecommendation {
        rule_id: RuleId,
        carrier_id: String,
    },
    RemoveRecommendation {
        rule_id: RuleId,
        index: usize,
    },
    MoveRecommendation {
        rule_id: RuleId,
        from: usize,
        to: usize,
    },
    /// Changing the carrier clears the product selection; product identity
    /// is scoped to a carrier.
    SetRecommendationCarrier {
        rule_id: RuleId,
        index: usize,
        carrier_id: String,
    },
    SetRecommendationProducts {
        rule_id: RuleId,
        index: usize,
        product_ids: Vec<String>,
    },
    SetRecommendationNotes {
        rule_id: RuleId,
        index: usize,
        notes: Option<String>,
    },
}

/// Errors raised by the reducer. All are addressing or grammar problems;
/// value-level issues are normalized instead of rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("rule {0} not found in tree")]
    RuleNotFound(RuleId),
    #[error("condition index {index} out of range for rule {rule_id}")]
    ConditionIndexOutOfRange { rule_id: RuleId, index: usize },
    #[error("recommendation index {index} out of range for rule {rule_id}")]
    RecommendationIndexOutOfRange { rule_id: RuleId, index: usize },
    #[error("operator {operator} is not valid for field {field}")]
    OperatorMismatch { operator: Operator, field: FieldKind },
}

/// Apply `command` to `tree`, returning the edited tree.
pub fn apply_edit(tree: &DecisionTree, command: TreeCommand) -> Result<DecisionTree, EditError> {
    let mut next = tree.clone();

    match command {
        TreeCommand::AddRule { name } => {
            next.rules.push(Rule::new(name));
        }
        TreeCommand::RenameRule { rule_id, name } => {
            rule_mut(&mut next, rule_id)?.name = name;
        }
        TreeCommand::SetRuleActive { rule_id, active } => {
            rule_mut(&mut next, rule_id)?.is_active = active;
        }
        TreeCommand::DeleteRule { rule_id } => {
            let position = rule_position(&next, rule_id)?;
            next.rules.remove(position);
        }
        TreeCommand::DuplicateRule { rule_id } => {
            let position = rule_position(&next, rule_id)?;
            let mut copy = next.rules[position].clone();
            copy.id = RuleId::generate();
            copy.name = format!("{} (Copy)", copy.name);
            next.rules.insert(position + 1, copy);
        }
        TreeCommand::SetGroupLogic { rule_id, logic } => {
            let rule = rule_mut(&mut next, rule_id)?;
            rule.conditions = rule.conditions.clone().with_logic(logic);
        }
        TreeCommand::AddCondition { rule_id, field } => {
            rule_mut(&mut next, rule_id)?
                .conditions
                .conditions_mut()
                .push(Condition {
                    field,
                    operator: default_operator_for(field),
                    value: default_value_for(field),
                });
        }
        TreeCommand::SetConditionField {
            rule_id,
            index,
            field,
        } => {
            let condition = condition_mut(&mut next, rule_id, index)?;
            condition.field = field;
            condition.operator = default_operator_for(field);
            condition.value = default_value_for(field);
        }
        TreeCommand::SetConditionOperator {
            rule_id,
            index,
            operator,
        } => {
            let condition = condition_mut(&mut next, rule_id, index)?;
            let allowed = catalog::operators_for(condition.field)
                .iter()
                .any(|option| option.operator == operator);
            if !allowed {
                return Err(EditError::OperatorMismatch {
                    operator,
                    field: condition.field,
                });
            }
            condition.operator = operator;
        }
        TreeCommand::SetConditionValue {
            rule_id,
            index,
            value,
        } => {
            let condition = condition_mut(&mut next, rule_id, index)?;
            condition.value = normalize_value(condition.field, value);
        }
        TreeCommand::RemoveCondition { rule_id, index } => {
            let rule = rule_mut(&mut next, rule_id)?;
            let conditions = rule.conditions.conditions_mut();
            if index >= conditions.len() {
                return Err(EditError::ConditionIndexOutOfRange { rule_id, index });
            }
            conditions.remove(index);
        }
        TreeCommand::AddRecommendation {
            rule_id,
            carrier_id,
        } => {
            let rule = rule_mut(&mut next, rule_id)?;
            rule.recommendations.push(Recommendation {
                carrier_id,
                product_ids: Vec::new(),
                priority: 0,
                notes: None,
            });
            renumber(rule);
        }
        TreeCommand::RemoveRecommendation { rule_id, index } => {
            let rule = rule_mut(&mut next, rule_id)?;
            if index >= rule.recommendations.len() {
                return Err(EditError::RecommendationIndexOutOfRange { rule_id, index });
            }
            rule.recommendations.remove(index);
            renumber(rule);
        }
        TreeCommand::MoveRecommendation { rule_id, from, to } => {
            let rule = rule_mut(&mut next, rule_id)?;
            let len = rule.recommendations.len();
            if from >= len {
                return Err(EditError::RecommendationIndexOutOfRange {
                    rule_id,
                    index: from,
                });
            }
            if to >= len {
                return Err(EditError::RecommendationIndexOutOfRange { rule_id, index: to });
            }
            let recommendation = rule.recommendations.remove(from);
            rule.recommendations.insert(to, recommendation);
            renumber(rule);
        }
        TreeCommand::SetRecommendationCarrier {
            rule_id,
            index,
            carrier_id,
        } => {
            let recommendation = recommendation_mut(&mut next, rule_id, index)?;
            recommendation.carrier_id = carrier_id;
            recommendation.product_ids.clear();
        }
        TreeCommand::SetRecommendationProducts {
            rule_id,
            index,
            product_ids,
        } => {
            recommendation_mut(&mut next, rule_id, index)?.product_ids = product_ids;
        }
        TreeCommand::SetRecommendationNotes {
            rule_id,
            index,
            notes,
        } => {
            recommendation_mut(&mut next, rule_id, index)?.notes = notes;
        }
    }

    Ok(next)
}

/// Coerce a proposed value to the field's type class. Numeric input is
/// clamped to the field bounds; a value of the wrong shape falls back to
/// the field default so the editor always holds something renderable.
fn normalize_value(field: FieldKind, value: ConditionValue) -> ConditionValue {
    match TypeClass::of(field) {
        TypeClass::Numeric => match value {
            ConditionValue::Number(number) if number.is_finite() => {
                ConditionValue::Number(clamp_numeric(field, number))
            }
            _ => default_value_for(field),
        },
        TypeClass::Boolean => match value {
            ConditionValue::Flag(_) => value,
            _ => default_value_for(field),
        },
        TypeClass::Categorical => match value {
            ConditionValue::Text(_) | ConditionValue::List(_) => value,
            _ => default_value_for(field),
        },
    }
}

fn renumber(rule: &mut Rule) {
    for (index, recommendation) in rule.recommendations.iter_mut().enumerate() {
        recommendation.priority = index as u32 + 1;
    }
}

fn rule_position(tree: &DecisionTree, rule_id: RuleId) -> Result<usize, EditError> {
    tree.rules
        .iter()
        .position(|rule| rule.id == rule_id)
        .ok_or(EditError::RuleNotFound(rule_id))
}

fn rule_mut(tree: &mut DecisionTree, rule_id: RuleId) -> Result<&mut Rule, EditError> {
    tree.rules
        .iter_mut()
        .find(|rule| rule.id == rule_id)
        .ok_or(EditError::RuleNotFound(rule_id))
}

fn condition_mut(
    tree: &mut DecisionTree,
    rule_id: RuleId,
    index: usize,
) -> Result<&mut Condition, EditError> {
    rule_mut(tree, rule_id)?
        .conditions
        .conditions_mut()
        .get_mut(index)
        .ok_or(EditError::ConditionIndexOutOfRange { rule_id, index })
}

fn recommendation_mut(
    tree: &mut DecisionTree,
    rule_id: RuleId,
    index: usize,
) -> Result<&mut Recommendation, EditError> {
    rule_mut(tree, rule_id)?
        .recommendations
        .get_mut(index)
        .ok_or(EditError::RecommendationIndexOutOfRange { rule_id, index })
}
