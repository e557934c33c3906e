//! Decision-tree rule engine for the agency underwriting wizard.
//!
//! A decision tree is an ordered list of rules, each pairing a boolean
//! condition group with ranked carrier/product recommendations. The engine
//! evaluates a client profile against the active tree and returns the
//! recommendations of every matching rule, in authored order. Authoring
//! happens through a pure command reducer so the editor invariants can be
//! exercised without any UI framework.

pub mod wizard;

pub use wizard::{
    apply_edit, resolve, rule_matches, ClientProfile, DecisionTree, DecisionTreeStore, EditError,
    MemoryTreeStore, RankedRecommendation, StoreError, TreeCommand, TreeRecord,
    UnderwritingService, WizardError,
};
