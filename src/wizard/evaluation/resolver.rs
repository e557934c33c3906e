use serde::{Deserialize, Serialize};

use super::super::domain::{ClientProfile, DecisionTree, Rule, RuleId};
use super::condition::evaluate_group;

/// Resolver output entry, annotated with the rule that produced it so two
/// rules recommending the same carrier keep their own notes and context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRecommendation {
    pub carrier_id: String,
    pub product_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub rule_id: RuleId,
    pub rule_name: String,
}

/// Whether `rule` applies to `profile`. Inactive rules are skipped outright,
/// before their conditions are looked at.
pub fn rule_matches(rule: &Rule, profile: &ClientProfile) -> bool {
    if !rule.is_active {
        return false;
    }
    evaluate_group(&rule.conditions, profile)
}

/// Evaluate every rule of `tree` against `profile` in stored order and
/// concatenate the recommendations of the rules that match.
///
/// Stored rule order is the priority order; within a matched rule the
/// recommendations are already ranked. Duplicate carrier/product pairs from
/// independently matching rules are preserved, not merged. An empty result
/// is a normal outcome, not an error.
pub fn resolve(tree: &DecisionTree, profile: &ClientProfile) -> Vec<RankedRecommendation> {
    let mut ranked = Vec::new();

    for rule in &tree.rules {
        if !rule_matches(rule, profile) {
            continue;
        }
        tracing::debug!(
            rule = %rule.name,
            recommendations = rule.recommendations.len(),
            "rule matched profile"
        );
        for recommendation in &rule.recommendations {
            ranked.push(RankedRecommendation {
                carrier_id: recommendation.carrier_id.clone(),
                product_ids: recommendation.product_ids.clone(),
                notes: recommendation.notes.clone(),
                rule_id: rule.id,
                rule_name: rule.name.clone(),
            });
        }
    }

    ranked
}
