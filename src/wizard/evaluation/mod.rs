//! Pure evaluation pipeline: condition, group, rule, and tree resolution.
//!
//! No I/O and no shared state; resolution completes in time proportional to
//! `rules x conditions`.

mod condition;
mod resolver;

pub use condition::{evaluate_condition, evaluate_group};
pub use resolver::{resolve, rule_matches, RankedRecommendation};
