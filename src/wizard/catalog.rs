//! Field and operator catalog backing the condition editor.
//!
//! The catalog is the single source of truth for which operators a condition
//! field accepts, what a freshly added condition should hold, and how numeric
//! input is bounded. Everything here is a pure lookup so the editor and the
//! evaluator agree on the grammar without sharing state.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::ConditionValue;

/// Closed set of profile attributes a condition may test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Age,
    Bmi,
    Gender,
    Tobacco,
    HealthTier,
    FaceAmount,
    State,
    ConditionPresent,
    InsulinUse,
    BloodThinners,
    Antidepressants,
    BpMedCount,
    CholesterolMedCount,
    PainMedications,
}

impl FieldKind {
    pub const fn label(self) -> &'static str {
        match self {
            FieldKind::Age => "age",
            FieldKind::Bmi => "bmi",
            FieldKind::Gender => "gender",
            FieldKind::Tobacco => "tobacco",
            FieldKind::HealthTier => "health_tier",
            FieldKind::FaceAmount => "face_amount",
            FieldKind::State => "state",
            FieldKind::ConditionPresent => "condition_present",
            FieldKind::InsulinUse => "insulin_use",
            FieldKind::BloodThinners => "blood_thinners",
            FieldKind::Antidepressants => "antidepressants",
            FieldKind::BpMedCount => "bp_med_count",
            FieldKind::CholesterolMedCount => "cholesterol_med_count",
            FieldKind::PainMedications => "pain_medications",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Comparison grammar shared by every condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "not_in")]
    NotIn,
}

impl Operator {
    pub const fn token(self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::In => "in",
            Operator::NotIn => "not_in",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Value shape a field expects, driving both operator choice and evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    Numeric,
    Boolean,
    Categorical,
}

impl TypeClass {
    pub const fn of(field: FieldKind) -> Self {
        match field {
            FieldKind::Age
            | FieldKind::Bmi
            | FieldKind::FaceAmount
            | FieldKind::BpMedCount
            | FieldKind::CholesterolMedCount => TypeClass::Numeric,
            FieldKind::Tobacco
            | FieldKind::InsulinUse
            | FieldKind::BloodThinners
            | FieldKind::Antidepressants
            | FieldKind::PainMedications => TypeClass::Boolean,
            FieldKind::Gender
            | FieldKind::HealthTier
            | FieldKind::State
            | FieldKind::ConditionPresent => TypeClass::Categorical,
        }
    }
}

/// One selectable operator entry the condition editor can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperatorOption {
    pub operator: Operator,
    pub label: &'static str,
}

const NUMERIC_OPERATORS: &[OperatorOption] = &[
    OperatorOption {
        operator: Operator::Eq,
        label: "equals",
    },
    OperatorOption {
        operator: Operator::Ne,
        label: "does not equal",
    },
    OperatorOption {
        operator: Operator::Gt,
        label: "greater than",
    },
    OperatorOption {
        operator: Operator::Lt,
        label: "less than",
    },
    OperatorOption {
        operator: Operator::Ge,
        label: "at least",
    },
    OperatorOption {
        operator: Operator::Le,
        label: "at most",
    },
];

const BOOLEAN_OPERATORS: &[OperatorOption] = &[OperatorOption {
    operator: Operator::Eq,
    label: "is",
}];

const CATEGORICAL_OPERATORS: &[OperatorOption] = &[
    OperatorOption {
        operator: Operator::Eq,
        label: "is",
    },
    OperatorOption {
        operator: Operator::Ne,
        label: "is not",
    },
    OperatorOption {
        operator: Operator::In,
        label: "is one of",
    },
    OperatorOption {
        operator: Operator::NotIn,
        label: "is not one of",
    },
];

/// Operators legal for `field`, keyed off its type class. Total over the
/// field enumeration.
pub fn operators_for(field: FieldKind) -> &'static [OperatorOption] {
    match TypeClass::of(field) {
        TypeClass::Numeric => NUMERIC_OPERATORS,
        TypeClass::Boolean => BOOLEAN_OPERATORS,
        TypeClass::Categorical => CATEGORICAL_OPERATORS,
    }
}

/// The operator a condition receives when its field changes.
pub fn default_operator_for(field: FieldKind) -> Operator {
    operators_for(field)[0].operator
}

/// Type-correct starting value for a freshly added or re-targeted condition.
pub fn default_value_for(field: FieldKind) -> ConditionValue {
    match field {
        FieldKind::Age => ConditionValue::Number(18.0),
        FieldKind::Bmi => ConditionValue::Number(25.0),
        FieldKind::FaceAmount => ConditionValue::Number(100_000.0),
        FieldKind::BpMedCount | FieldKind::CholesterolMedCount => ConditionValue::Number(0.0),
        FieldKind::Tobacco
        | FieldKind::InsulinUse
        | FieldKind::BloodThinners
        | FieldKind::Antidepressants
        | FieldKind::PainMedications => ConditionValue::Flag(false),
        FieldKind::Gender => ConditionValue::Text("male".to_string()),
        FieldKind::HealthTier => ConditionValue::Text("standard".to_string()),
        FieldKind::State => ConditionValue::Text("IA".to_string()),
        FieldKind::ConditionPresent => ConditionValue::List(Vec::new()),
    }
}

/// Inclusive bounds applied to numeric condition input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldConstraints {
    pub min: f64,
    pub max: f64,
}

pub const fn constraints_for(field: FieldKind) -> Option<FieldConstraints> {
    match field {
        FieldKind::Age => Some(FieldConstraints {
            min: 0.0,
            max: 120.0,
        }),
        FieldKind::Bmi => Some(FieldConstraints {
            min: 10.0,
            max: 80.0,
        }),
        FieldKind::FaceAmount => Some(FieldConstraints {
            min: 10_000.0,
            max: 10_000_000.0,
        }),
        FieldKind::BpMedCount | FieldKind::CholesterolMedCount => Some(FieldConstraints {
            min: 0.0,
            max: 20.0,
        }),
        _ => None,
    }
}

/// Outcome of validating raw numeric input. The value is always usable so
/// the editor never blocks on a bad keystroke.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericValidation {
    pub is_valid: bool,
    pub value: f64,
    pub error: Option<String>,
}

/// Validate raw numeric input for `field`. Out-of-range values are clamped
/// to the nearest bound; unparseable input falls back to the field default.
pub fn validate_numeric_value(field: FieldKind, raw: &str) -> NumericValidation {
    let number = match raw.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => number,
        _ => {
            return NumericValidation {
                is_valid: false,
                value: default_numeric(field),
                error: Some(format!("Enter a valid number for {field}")),
            }
        }
    };

    if let Some(bounds) = constraints_for(field) {
        if number < bounds.min {
            return NumericValidation {
                is_valid: false,
                value: bounds.min,
                error: Some(format!("Minimum value is {}", bounds.min)),
            };
        }
        if number > bounds.max {
            return NumericValidation {
                is_valid: false,
                value: bounds.max,
                error: Some(format!("Maximum value is {}", bounds.max)),
            };
        }
    }

    NumericValidation {
        is_valid: true,
        value: number,
        error: None,
    }
}

pub(crate) fn clamp_numeric(field: FieldKind, value: f64) -> f64 {
    match constraints_for(field) {
        Some(bounds) => value.clamp(bounds.min, bounds.max),
        None => value,
    }
}

fn default_numeric(field: FieldKind) -> f64 {
    match default_value_for(field) {
        ConditionValue::Number(number) => number,
        _ => 0.0,
    }
}
