//! Property-Based Test Generators
//!
//! Provides proptest strategies for random sequences of ledger edits.

use domain_claims::{DashboardAction, Severity};
use proptest::prelude::*;

/// Strategy for generating Severity values
pub fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Minor),
        Just(Severity::Moderate),
        Just(Severity::Major),
        Just(Severity::Severe),
    ]
}

/// Strategy for damage type labels the agent might type
pub fn damage_label_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,10}( [A-Z][a-z]{2,10}){0,2}"
}

/// An edit to the damage list with an index not yet bound to a list length
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerOp {
    Add,
    Remove(usize),
    UpdateSeverity(usize, Severity),
    UpdateType(usize, String),
}

impl LedgerOp {
    /// Maps the op onto a list of `len` entries
    ///
    /// Indices wrap around the length. Index-addressed ops on an empty list
    /// yield `None`, matching a UI that has no row to click.
    pub fn to_action(&self, len: usize) -> Option<DashboardAction> {
        match self {
            LedgerOp::Add => Some(DashboardAction::AddDamage),
            _ if len == 0 => None,
            LedgerOp::Remove(i) => Some(DashboardAction::RemoveDamage { index: i % len }),
            LedgerOp::UpdateSeverity(i, severity) => Some(DashboardAction::UpdateSeverity {
                index: i % len,
                severity: *severity,
            }),
            LedgerOp::UpdateType(i, label) => Some(DashboardAction::UpdateType {
                index: i % len,
                damage_type: label.clone(),
            }),
        }
    }

    /// The index this op targets on a list of `len` entries
    pub fn target(&self, len: usize) -> Option<usize> {
        match self {
            LedgerOp::Add => None,
            _ if len == 0 => None,
            LedgerOp::Remove(i) | LedgerOp::UpdateSeverity(i, _) | LedgerOp::UpdateType(i, _) => {
                Some(i % len)
            }
        }
    }
}

/// Strategy for a single ledger op
pub fn ledger_op_strategy() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        Just(LedgerOp::Add),
        (0usize..16).prop_map(LedgerOp::Remove),
        (0usize..16, severity_strategy()).prop_map(|(i, s)| LedgerOp::UpdateSeverity(i, s)),
        (0usize..16, damage_label_strategy()).prop_map(|(i, l)| LedgerOp::UpdateType(i, l)),
    ]
}

/// Strategy for a sequence of ledger ops
pub fn ledger_ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<LedgerOp>> {
    prop::collection::vec(ledger_op_strategy(), 0..max_len)
}
