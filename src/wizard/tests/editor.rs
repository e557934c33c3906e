use crate::wizard::catalog::{FieldKind, Operator};
use crate::wizard::domain::{ConditionGroup, ConditionValue, DecisionTree, GroupLogic, RuleId};
use crate::wizard::editor::{apply_edit, EditError, TreeCommand};

fn tree_with_rule() -> (DecisionTree, RuleId) {
    let tree = DecisionTree::new("Editing", "");
    let tree = apply_edit(
        &tree,
        TreeCommand::AddRule {
            name: "Seniors".to_string(),
        },
    )
    .expect("add rule");
    let rule_id = tree.rules[0].id;
    (tree, rule_id)
}

fn with_recommendations(carriers: &[&str]) -> (DecisionTree, RuleId) {
    let (mut tree, rule_id) = tree_with_rule();
    for carrier in carriers {
        tree = apply_edit(
            &tree,
            TreeCommand::AddRecommendation {
                rule_id,
                carrier_id: carrier.to_string(),
            },
        )
        .expect("add recommendation");
    }
    (tree, rule_id)
}

fn priorities(tree: &DecisionTree, rule_id: RuleId) -> Vec<u32> {
    tree.rule(rule_id)
        .expect("rule present")
        .recommendations
        .iter()
        .map(|recommendation| recommendation.priority)
        .collect()
}

#[test]
fn new_rules_start_active_with_an_empty_all_group() {
    let (tree, rule_id) = tree_with_rule();
    let rule = tree.rule(rule_id).expect("rule present");

    assert!(rule.is_active);
    assert_eq!(rule.conditions, ConditionGroup::All(Vec::new()));
    assert!(rule.recommendations.is_empty());
}

#[test]
fn apply_edit_leaves_the_input_tree_untouched() {
    let (tree, rule_id) = tree_with_rule();
    let before = tree.clone();

    apply_edit(&tree, TreeCommand::DeleteRule { rule_id }).expect("delete");

    assert_eq!(tree, before);
}

#[test]
fn added_conditions_use_the_field_defaults() {
    let (tree, rule_id) = tree_with_rule();
    let tree = apply_edit(
        &tree,
        TreeCommand::AddCondition {
            rule_id,
            field: FieldKind::Age,
        },
    )
    .expect("add condition");

    let condition = &tree.rule(rule_id).expect("rule").conditions.conditions()[0];
    assert_eq!(condition.field, FieldKind::Age);
    assert_eq!(condition.operator, Operator::Eq);
    assert_eq!(condition.value, ConditionValue::Number(18.0));
}

#[test]
fn changing_the_field_resets_operator_and_value() {
    let (tree, rule_id) = tree_with_rule();
    let tree = apply_edit(
        &tree,
        TreeCommand::AddCondition {
            rule_id,
            field: FieldKind::State,
        },
    )
    .expect("add condition");
    let tree = apply_edit(
        &tree,
        TreeCommand::SetConditionOperator {
            rule_id,
            index: 0,
            operator: Operator::In,
        },
    )
    .expect("set operator");

    // A categorical string must not survive the switch to a numeric field.
    let tree = apply_edit(
        &tree,
        TreeCommand::SetConditionField {
            rule_id,
            index: 0,
            field: FieldKind::Bmi,
        },
    )
    .expect("set field");

    let condition = &tree.rule(rule_id).expect("rule").conditions.conditions()[0];
    assert_eq!(condition.field, FieldKind::Bmi);
    assert_eq!(condition.operator, Operator::Eq);
    assert_eq!(condition.value, ConditionValue::Number(25.0));
}

#[test]
fn operators_outside_the_field_catalog_are_rejected() {
    let (tree, rule_id) = tree_with_rule();
    let tree = apply_edit(
        &tree,
        TreeCommand::AddCondition {
            rule_id,
            field: FieldKind::Tobacco,
        },
    )
    .expect("add condition");

    let result = apply_edit(
        &tree,
        TreeCommand::SetConditionOperator {
            rule_id,
            index: 0,
            operator: Operator::Gt,
        },
    );

    assert_eq!(
        result,
        Err(EditError::OperatorMismatch {
            operator: Operator::Gt,
            field: FieldKind::Tobacco,
        })
    );
}

#[test]
fn numeric_value_updates_clamp_to_the_field_bounds() {
    let (tree, rule_id) = tree_with_rule();
    let tree = apply_edit(
        &tree,
        TreeCommand::AddCondition {
            rule_id,
            field: FieldKind::Age,
        },
    )
    .expect("add condition");
    let tree = apply_edit(
        &tree,
        TreeCommand::SetConditionValue {
            rule_id,
            index: 0,
            value: ConditionValue::Number(500.0),
        },
    )
    .expect("set value");

    let condition = &tree.rule(rule_id).expect("rule").conditions.conditions()[0];
    assert_eq!(condition.value, ConditionValue::Number(120.0));
}

#[test]
fn mismatched_value_shapes_normalize_to_the_field_default() {
    let (tree, rule_id) = tree_with_rule();
    let tree = apply_edit(
        &tree,
        TreeCommand::AddCondition {
            rule_id,
            field: FieldKind::Age,
        },
    )
    .expect("add condition");
    let tree = apply_edit(
        &tree,
        TreeCommand::SetConditionValue {
            rule_id,
            index: 0,
            value: ConditionValue::Text("sixty".to_string()),
        },
    )
    .expect("set value");

    let condition = &tree.rule(rule_id).expect("rule").conditions.conditions()[0];
    assert_eq!(condition.value, ConditionValue::Number(18.0));
}

#[test]
fn toggling_group_logic_preserves_conditions_and_order() {
    let (tree, rule_id) = tree_with_rule();
    let tree = apply_edit(
        &tree,
        TreeCommand::AddCondition {
            rule_id,
            field: FieldKind::Age,
        },
    )
    .expect("add condition");
    let tree = apply_edit(
        &tree,
        TreeCommand::AddCondition {
            rule_id,
            field: FieldKind::Tobacco,
        },
    )
    .expect("add condition");

    let before = tree.rule(rule_id).expect("rule").conditions.conditions().to_vec();
    let tree = apply_edit(
        &tree,
        TreeCommand::SetGroupLogic {
            rule_id,
            logic: GroupLogic::Any,
        },
    )
    .expect("toggle logic");

    let group = &tree.rule(rule_id).expect("rule").conditions;
    assert_eq!(group.logic(), GroupLogic::Any);
    assert_eq!(group.conditions(), before.as_slice());
}

#[test]
fn duplicated_rules_get_a_fresh_id_and_copy_suffix() {
    let (tree, rule_id) = with_recommendations(&["A"]);
    let tree = apply_edit(&tree, TreeCommand::DuplicateRule { rule_id }).expect("duplicate");

    assert_eq!(tree.rules.len(), 2);
    let copy = &tree.rules[1];
    assert_ne!(copy.id, rule_id);
    assert_eq!(copy.name, "Seniors (Copy)");
    assert_eq!(copy.recommendations, tree.rules[0].recommendations);
}

#[test]
fn mutating_a_duplicate_never_touches_the_source_rule() {
    let (tree, rule_id) = tree_with_rule();
    let tree = apply_edit(
        &tree,
        TreeCommand::AddCondition {
            rule_id,
            field: FieldKind::Age,
        },
    )
    .expect("add condition");
    let tree = apply_edit(&tree, TreeCommand::DuplicateRule { rule_id }).expect("duplicate");
    let copy_id = tree.rules[1].id;
    let source_before = tree.rules[0].clone();

    let tree = apply_edit(
        &tree,
        TreeCommand::SetConditionValue {
            rule_id: copy_id,
            index: 0,
            value: ConditionValue::Number(70.0),
        },
    )
    .expect("edit duplicate");

    assert_eq!(tree.rules[0], source_before);
    assert_eq!(
        tree.rule(copy_id).expect("copy").conditions.conditions()[0].value,
        ConditionValue::Number(70.0)
    );
}

#[test]
fn recommendation_priorities_stay_contiguous_after_every_mutation() {
    let (tree, rule_id) = with_recommendations(&["A", "B", "C"]);
    assert_eq!(priorities(&tree, rule_id), vec![1, 2, 3]);

    let tree = apply_edit(
        &tree,
        TreeCommand::RemoveRecommendation { rule_id, index: 1 },
    )
    .expect("remove");
    assert_eq!(priorities(&tree, rule_id), vec![1, 2]);

    let tree = apply_edit(
        &tree,
        TreeCommand::MoveRecommendation {
            rule_id,
            from: 1,
            to: 0,
        },
    )
    .expect("move");
    assert_eq!(priorities(&tree, rule_id), vec![1, 2]);
    let rule = tree.rule(rule_id).expect("rule");
    assert_eq!(rule.recommendations[0].carrier_id, "C");
    assert_eq!(rule.recommendations[1].carrier_id, "A");
}

#[test]
fn changing_the_carrier_clears_the_product_selection() {
    let (tree, rule_id) = with_recommendations(&["A"]);
    let tree = apply_edit(
        &tree,
        TreeCommand::SetRecommendationProducts {
            rule_id,
            index: 0,
            product_ids: vec!["p1".to_string(), "p2".to_string()],
        },
    )
    .expect("set products");

    let tree = apply_edit(
        &tree,
        TreeCommand::SetRecommendationCarrier {
            rule_id,
            index: 0,
            carrier_id: "B".to_string(),
        },
    )
    .expect("set carrier");

    let recommendation = &tree.rule(rule_id).expect("rule").recommendations[0];
    assert_eq!(recommendation.carrier_id, "B");
    assert!(recommendation.product_ids.is_empty());
}

#[test]
fn commands_against_unknown_rules_report_rule_not_found() {
    let (tree, _) = tree_with_rule();
    let stranger = RuleId::generate();

    let result = apply_edit(&tree, TreeCommand::DeleteRule { rule_id: stranger });

    assert_eq!(result, Err(EditError::RuleNotFound(stranger)));
}

#[test]
fn out_of_range_indexes_are_reported() {
    let (tree, rule_id) = with_recommendations(&["A"]);

    let result = apply_edit(
        &tree,
        TreeCommand::RemoveRecommendation { rule_id, index: 5 },
    );
    assert_eq!(
        result,
        Err(EditError::RecommendationIndexOutOfRange { rule_id, index: 5 })
    );

    let result = apply_edit(&tree, TreeCommand::RemoveCondition { rule_id, index: 0 });
    assert_eq!(
        result,
        Err(EditError::ConditionIndexOutOfRange { rule_id, index: 0 })
    );
}
