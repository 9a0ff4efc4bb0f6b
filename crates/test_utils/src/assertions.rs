//! Custom Test Assertions
//!
//! Assertion helpers for dashboard types with messages that name the
//! offending entry.

use domain_claims::{
    recalculate_cost, AuditLog, ClaimStatus, CostEstimate, DamageAssessment, DashboardState,
    StatusHistoryEntry,
};
use rust_decimal::Decimal;

/// Asserts that the derived estimate equals the table sum over the damages
pub fn assert_estimate_matches_ledger(state: &DashboardState) {
    let expected = recalculate_cost(state.ledger().table(), state.damages())
        .expect("Cost table and estimate share a currency");
    assert_eq!(
        state.cost_estimate(),
        expected,
        "Estimate {} does not match table sum {} over {} damages",
        state.cost_estimate().display_range(),
        expected.display_range(),
        state.damages().len()
    );
}

/// Asserts an estimate's bounds in whole currency units
pub fn assert_estimate_eq(estimate: &CostEstimate, min: i64, max: i64) {
    assert_eq!(
        (estimate.min.amount(), estimate.max.amount()),
        (Decimal::from(min), Decimal::from(max)),
        "Expected estimate {} - {}, got {}",
        min,
        max,
        estimate.display_range()
    );
}

/// Asserts that `edited` is set exactly on the entries listed
pub fn assert_edited_exactly(damages: &[DamageAssessment], edited: &[usize]) {
    for (i, damage) in damages.iter().enumerate() {
        assert_eq!(
            damage.edited,
            edited.contains(&i),
            "Damage #{} ({}) has edited={}, expected {}",
            i,
            damage.damage_type,
            damage.edited,
            edited.contains(&i)
        );
    }
}

/// Asserts the statuses recorded in history, oldest first
pub fn assert_status_path(history: &[StatusHistoryEntry], expected: &[ClaimStatus]) {
    let actual: Vec<ClaimStatus> = history.iter().map(|h| h.status).collect();
    assert_eq!(actual, expected, "Unexpected status history");
}

/// Asserts that history timestamps never go backwards
pub fn assert_history_chronological(history: &[StatusHistoryEntry]) {
    for pair in history.windows(2) {
        assert!(
            pair[0].timestamp <= pair[1].timestamp,
            "History out of order: {} at {} before {} at {}",
            pair[0].status,
            pair[0].timestamp,
            pair[1].status,
            pair[1].timestamp
        );
    }
}

/// Asserts that audit entries are ordered newest first
pub fn assert_audit_newest_first(log: &AuditLog) {
    let entries: Vec<_> = log.iter().collect();
    for pair in entries.windows(2) {
        assert!(
            pair[0].timestamp >= pair[1].timestamp,
            "Audit log out of order: '{}' at {} precedes '{}' at {}",
            pair[0].action,
            pair[0].timestamp,
            pair[1].action,
            pair[1].timestamp
        );
    }
}

/// Returns the audit actions newest first, for compact comparisons
pub fn audit_actions(log: &AuditLog) -> Vec<String> {
    log.iter().map(|e| e.action.clone()).collect()
}
