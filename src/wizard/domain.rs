//! Domain model for decision trees and the client profiles they evaluate.
//!
//! Trees persist as JSON: tree metadata uses snake_case columns while the
//! `rules` blob keeps the camelCase layout the authoring UI reads and writes
//! (`isActive`, `carrierId`, `{"all": [...]}`).

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{FieldKind, Operator};

/// Identifier wrapper for rules. Generated fresh at creation, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId(pub Uuid);

impl RuleId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier wrapper for decision trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeId(pub Uuid);

impl TreeId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Typed condition value, discriminated by the field's type class rather
/// than inspected at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl ConditionValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ConditionValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ConditionValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConditionValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// View the value as a code set: a single text value reads as a
    /// one-element set so `in` works against either shape.
    pub fn as_code_set(&self) -> Option<Vec<&str>> {
        match self {
            ConditionValue::Text(text) => Some(vec![text.as_str()]),
            ConditionValue::List(codes) => Some(codes.iter().map(String::as_str).collect()),
            _ => None,
        }
    }
}

/// One field/operator/value test against a client profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: FieldKind,
    pub operator: Operator,
    pub value: ConditionValue,
}

/// How a group combines its conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupLogic {
    All,
    Any,
}

/// Conditions combined under conjunction (`all`) or disjunction (`any`).
/// An empty list in either mode is a deliberate catch-all match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionGroup {
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

impl ConditionGroup {
    pub fn conditions(&self) -> &[Condition] {
        match self {
            ConditionGroup::All(conditions) | ConditionGroup::Any(conditions) => conditions,
        }
    }

    pub fn conditions_mut(&mut self) -> &mut Vec<Condition> {
        match self {
            ConditionGroup::All(conditions) | ConditionGroup::Any(conditions) => conditions,
        }
    }

    pub fn logic(&self) -> GroupLogic {
        match self {
            ConditionGroup::All(_) => GroupLogic::All,
            ConditionGroup::Any(_) => GroupLogic::Any,
        }
    }

    /// Re-wrap the same condition list under `logic`, order preserved.
    pub fn with_logic(self, logic: GroupLogic) -> Self {
        let conditions = match self {
            ConditionGroup::All(conditions) | ConditionGroup::Any(conditions) => conditions,
        };
        match logic {
            GroupLogic::All => ConditionGroup::All(conditions),
            GroupLogic::Any => ConditionGroup::Any(conditions),
        }
    }
}

/// Carrier/product suggestion carried by a rule. `priority` is the 1-based
/// rank within the owning rule and stays contiguous after every edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub carrier_id: String,
    pub product_ids: Vec<String>,
    pub priority: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Named, toggleable pairing of a condition group with ranked
/// recommendations. Inactive rules stay in the tree but are invisible to
/// resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    pub conditions: ConditionGroup,
    pub recommendations: Vec<Recommendation>,
    pub is_active: bool,
}

impl Rule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RuleId::generate(),
            name: name.into(),
            conditions: ConditionGroup::All(Vec::new()),
            recommendations: Vec::new(),
            is_active: true,
        }
    }
}

/// Ordered ruleset and unit of persistence. Stored rule order is the
/// priority order used during resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub id: TreeId,
    pub name: String,
    pub description: String,
    pub rules: Vec<Rule>,
    pub is_active: bool,
    pub is_default: bool,
}

impl DecisionTree {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: TreeId::generate(),
            name: name.into(),
            description: description.into(),
            rules: Vec::new(),
            is_active: true,
            is_default: false,
        }
    }

    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }
}

/// Applicant gender as captured by the wizard intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Underwriting health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthTier {
    PreferredPlus,
    Preferred,
    StandardPlus,
    Standard,
    Substandard,
}

impl HealthTier {
    pub const fn label(self) -> &'static str {
        match self {
            HealthTier::PreferredPlus => "preferred_plus",
            HealthTier::Preferred => "preferred",
            HealthTier::StandardPlus => "standard_plus",
            HealthTier::Standard => "standard",
            HealthTier::Substandard => "substandard",
        }
    }
}

/// Input record describing an applicant. Every attribute a condition can
/// reference is optional; a missing attribute never satisfies a condition.
/// The condition-code set is always present and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientProfile {
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub bmi: Option<f32>,
    pub tobacco: Option<bool>,
    pub health_tier: Option<HealthTier>,
    pub face_amount: Option<u32>,
    pub state: Option<String>,
    pub conditions: BTreeSet<String>,
    pub insulin_use: Option<bool>,
    pub blood_thinners: Option<bool>,
    pub antidepressants: Option<bool>,
    pub bp_med_count: Option<u8>,
    pub cholesterol_med_count: Option<u8>,
    pub pain_medications: Option<bool>,
}

impl ClientProfile {
    /// Numeric attribute for `field`, when the field is numeric and present.
    pub fn numeric(&self, field: FieldKind) -> Option<f64> {
        match field {
            FieldKind::Age => self.age.map(f64::from),
            FieldKind::Bmi => self.bmi.map(f64::from),
            FieldKind::FaceAmount => self.face_amount.map(f64::from),
            FieldKind::BpMedCount => self.bp_med_count.map(f64::from),
            FieldKind::CholesterolMedCount => self.cholesterol_med_count.map(f64::from),
            _ => None,
        }
    }

    /// Boolean attribute for `field`, when the field is boolean and present.
    pub fn flag(&self, field: FieldKind) -> Option<bool> {
        match field {
            FieldKind::Tobacco => self.tobacco,
            FieldKind::InsulinUse => self.insulin_use,
            FieldKind::BloodThinners => self.blood_thinners,
            FieldKind::Antidepressants => self.antidepressants,
            FieldKind::PainMedications => self.pain_medications,
            _ => None,
        }
    }

    /// Categorical attribute for `field` as its stable label.
    pub fn categorical(&self, field: FieldKind) -> Option<&str> {
        match field {
            FieldKind::Gender => self.gender.map(Gender::label),
            FieldKind::HealthTier => self.health_tier.map(HealthTier::label),
            FieldKind::State => self.state.as_deref(),
            _ => None,
        }
    }
}
