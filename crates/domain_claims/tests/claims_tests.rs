//! Comprehensive tests for domain_claims

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use core_kernel::Timezone;

use domain_claims::{
    AgentAction, ClaimStatus, DashboardAction, DashboardState, FinalEstimatePolicy, Severity,
    StatusActions, TaskKind, SYSTEM_USER,
};
use test_utils::{
    assert_audit_newest_first, assert_edited_exactly, assert_estimate_eq,
    assert_estimate_matches_ledger, assert_history_chronological, assert_status_path,
    audit_actions, ledger_ops_strategy, DashboardStateBuilder, TemporalFixtures,
    SAMPLE_POLICY_NUMBER,
};

fn open() -> DashboardState {
    DashboardStateBuilder::new().build()
}

// ============================================================================
// Status Lifecycle Tests
// ============================================================================

mod status_lifecycle_tests {
    use super::*;

    #[test]
    fn test_change_status_appends_history_and_audit() {
        let state = open();
        let at = TemporalFixtures::afternoon();
        let next = state
            .apply(DashboardAction::ChangeStatus(ClaimStatus::Pending), at)
            .unwrap();

        assert_eq!(next.status(), ClaimStatus::Pending);
        assert_status_path(next.history(), &[ClaimStatus::UnderReview, ClaimStatus::Pending]);

        let latest = next.audit_log().latest().unwrap();
        assert_eq!(latest.action, "Status Changed to PENDING");
        assert_eq!(latest.user, "Agent A-4782");
        assert_eq!(latest.details, "Claim submitted for approval - awaiting adjuster review");
        assert!(!latest.ai_used);
        assert_eq!(latest.timestamp, at);
    }

    #[test]
    fn test_change_status_twice_same_message_distinct_timestamps() {
        let state = open();
        let first = TemporalFixtures::afternoon();
        let second = first + Duration::milliseconds(250);

        let next = state
            .apply(DashboardAction::ChangeStatus(ClaimStatus::Approved), first)
            .and_then(|s| s.apply(DashboardAction::ChangeStatus(ClaimStatus::Approved), second))
            .unwrap();

        let approved: Vec<_> = next
            .history()
            .iter()
            .filter(|h| h.status == ClaimStatus::Approved)
            .collect();
        assert_eq!(approved.len(), 2);
        assert_eq!(approved[0].message, approved[1].message);
        assert_ne!(approved[0].timestamp, approved[1].timestamp);
    }

    #[test]
    fn test_any_transition_is_allowed() {
        let state = open();
        let at = TemporalFixtures::afternoon();

        let next = state
            .apply(DashboardAction::SendRepairAuthorization, at)
            .and_then(|s| s.apply(DashboardAction::ChangeStatus(ClaimStatus::UnderReview), at))
            .and_then(|s| s.apply(DashboardAction::Approve, at))
            .unwrap();

        assert_status_path(
            next.history(),
            &[
                ClaimStatus::UnderReview,
                ClaimStatus::Closed,
                ClaimStatus::UnderReview,
                ClaimStatus::Approved,
            ],
        );
    }

    #[test]
    fn test_status_change_shows_banner_and_schedules_dismissal() {
        let state = open();
        let reduction = state
            .reduce(DashboardAction::Approve, TemporalFixtures::afternoon())
            .unwrap();

        let banner = reduction.state.banner().unwrap();
        assert_eq!(
            banner.message,
            "Claim approved by adjuster - repair authorization being prepared"
        );
        assert_eq!(reduction.scheduled.len(), 1);
        assert_eq!(reduction.scheduled[0].after, std::time::Duration::from_secs(5));
        assert_eq!(
            reduction.scheduled[0].kind,
            TaskKind::DismissBanner { sequence: banner.sequence }
        );
    }

    #[test]
    fn test_stale_banner_dismissal_keeps_newer_banner() {
        let at = TemporalFixtures::afternoon();
        let first = open().reduce(DashboardAction::Approve, at).unwrap();
        let first_sequence = first.state.banner().unwrap().sequence;

        let second = first
            .state
            .apply(DashboardAction::SendRepairAuthorization, at)
            .unwrap();
        let after_dismiss = second
            .apply(DashboardAction::DismissBanner { sequence: first_sequence }, at)
            .unwrap();

        assert_eq!(
            after_dismiss.banner().map(|b| b.message.as_str()),
            Some(ClaimStatus::Closed.message())
        );

        let current = after_dismiss.banner().unwrap().sequence;
        let cleared = after_dismiss
            .apply(DashboardAction::DismissBanner { sequence: current }, at)
            .unwrap();
        assert!(cleared.banner().is_none());
    }

    #[test]
    fn test_available_actions_by_status() {
        assert_eq!(
            ClaimStatus::UnderReview.available_actions(),
            StatusActions::Actions(vec![
                AgentAction::SubmitForApproval,
                AgentAction::RequestMorePhotos
            ])
        );
        assert_eq!(
            ClaimStatus::Pending.available_actions(),
            StatusActions::Notice("Awaiting adjuster approval...")
        );
        assert_eq!(
            ClaimStatus::Closed.available_actions(),
            StatusActions::Actions(vec![AgentAction::DownloadRepairAuthorization])
        );
    }
}

// ============================================================================
// Approval Cascade Tests
// ============================================================================

mod approval_cascade_tests {
    use super::*;

    /// Fires the first cascade step in `scheduled`, as the runtime would
    fn fire_cascade(
        state: &DashboardState,
        scheduled: &[domain_claims::ScheduledTask],
        at: chrono::DateTime<Utc>,
    ) -> domain_claims::Reduction {
        let task = scheduled
            .iter()
            .find(|t| matches!(t.kind, TaskKind::CascadeStep { .. }))
            .copied()
            .expect("a cascade step is scheduled");
        state.reduce(task.into_action(), at).unwrap()
    }

    #[test]
    fn test_cascade_reaches_closed_through_pending_and_approved() {
        let t0 = TemporalFixtures::afternoon();
        let submitted = open().reduce(DashboardAction::SubmitForApproval, t0).unwrap();
        let approved = fire_cascade(&submitted.state, &submitted.scheduled, t0 + Duration::seconds(3));
        let closed = fire_cascade(&approved.state, &approved.scheduled, t0 + Duration::seconds(6));

        assert_eq!(closed.state.status(), ClaimStatus::Closed);
        assert_status_path(
            closed.state.history(),
            &[
                ClaimStatus::UnderReview,
                ClaimStatus::Pending,
                ClaimStatus::Approved,
                ClaimStatus::Closed,
            ],
        );
        assert_history_chronological(closed.state.history());

        let actions = audit_actions(closed.state.audit_log());
        assert_eq!(
            &actions[..3],
            &[
                "Status Changed to CLOSED".to_string(),
                "Status Changed to APPROVED".to_string(),
                "Status Changed to PENDING".to_string(),
            ]
        );
        assert!(!closed
            .scheduled
            .iter()
            .any(|t| matches!(t.kind, TaskKind::CascadeStep { .. })));
    }

    #[test]
    fn test_each_step_waits_three_seconds() {
        let t0 = TemporalFixtures::afternoon();
        let submitted = open().reduce(DashboardAction::SubmitForApproval, t0).unwrap();
        let step = submitted
            .scheduled
            .iter()
            .find(|t| matches!(t.kind, TaskKind::CascadeStep { .. }))
            .unwrap();

        assert_eq!(step.after, std::time::Duration::from_secs(3));
    }

    #[test]
    fn test_manual_change_voids_pending_cascade_step() {
        let t0 = TemporalFixtures::afternoon();
        let submitted = open().reduce(DashboardAction::SubmitForApproval, t0).unwrap();

        // Agent sends the claim back before the timer fires
        let manual = submitted
            .state
            .apply(DashboardAction::ChangeStatus(ClaimStatus::UnderReview), t0 + Duration::seconds(1))
            .unwrap();
        let late = fire_cascade(&manual, &submitted.scheduled, t0 + Duration::seconds(3));

        assert_eq!(late.state.status(), ClaimStatus::UnderReview);
        assert_eq!(late.state.history().len(), manual.history().len());
        assert!(late.scheduled.is_empty());
    }
}

// ============================================================================
// Damage Ledger Tests
// ============================================================================

mod damage_ledger_tests {
    use super::*;

    #[test]
    fn test_initial_estimate_from_seed() {
        let state = open();
        assert_estimate_eq(&state.cost_estimate(), 2100, 4700);
        assert_eq!(state.final_estimate().value(), "3400");
        assert_eq!(state.cost_estimate().display_range(), "$2,100 - $4,700");
    }

    #[test]
    fn test_remove_major_recomputes() {
        let state = open()
            .apply(DashboardAction::RemoveDamage { index: 2 }, TemporalFixtures::afternoon())
            .unwrap();

        assert_eq!(state.damages().len(), 3);
        assert_estimate_eq(&state.cost_estimate(), 900, 2200);
        assert_eq!(state.final_estimate().value(), "1550");
        assert!(state.has_model_feedback());
    }

    #[test]
    fn test_remove_writes_no_audit_entry_by_default() {
        let state = open();
        let before = state.audit_log().len();
        let next = state
            .apply(DashboardAction::RemoveDamage { index: 0 }, TemporalFixtures::afternoon())
            .and_then(|s| s.apply(DashboardAction::AddDamage, TemporalFixtures::afternoon()))
            .unwrap();

        assert_eq!(next.audit_log().len(), before);
    }

    #[test]
    fn test_list_change_auditing_when_enabled() {
        let at = TemporalFixtures::afternoon();
        let state = DashboardStateBuilder::new().auditing_list_changes().build();
        let next = state
            .apply(DashboardAction::RemoveDamage { index: 1 }, at)
            .and_then(|s| s.apply(DashboardAction::AddDamage, at))
            .unwrap();

        let actions = audit_actions(next.audit_log());
        assert_eq!(actions[0], "Damage Added");
        assert_eq!(actions[1], "Damage Removed");
        assert_eq!(
            next.audit_log().iter().nth(1).unwrap().details,
            "Removed \"Hood Dent\" from the assessment (will train automated system)"
        );
    }

    #[test]
    fn test_update_severity_audit_and_flags() {
        let at = TemporalFixtures::afternoon();
        let state = open()
            .apply(DashboardAction::UpdateSeverity { index: 3, severity: Severity::Moderate }, at)
            .unwrap();

        assert_edited_exactly(state.damages(), &[3]);
        assert!(state.has_model_feedback());
        assert_estimate_eq(&state.cost_estimate(), 2400, 5400);

        let latest = state.audit_log().latest().unwrap();
        assert_eq!(latest.action, "Damage Assessment Edited");
        assert_eq!(
            latest.details,
            "Severity changed to Moderate for Paint Scratches (will train automated system)"
        );
    }

    #[test]
    fn test_update_type_audit() {
        let state = open()
            .apply(
                DashboardAction::UpdateType { index: 1, damage_type: "Roof Dent".to_string() },
                TemporalFixtures::afternoon(),
            )
            .unwrap();

        assert_edited_exactly(state.damages(), &[1]);
        assert_eq!(state.damages()[1].damage_type, "Roof Dent");
        assert_eq!(state.damages()[1].displayed_confidence(), None);
        assert_eq!(state.audit_log().latest().unwrap().action, "Damage Type Edited");
    }

    #[test]
    fn test_add_damage_defaults() {
        let state = open()
            .apply(DashboardAction::AddDamage, TemporalFixtures::afternoon())
            .unwrap();

        let added = state.damages().last().unwrap();
        assert_eq!(added.damage_type, "New Damage");
        assert_eq!(added.severity, Severity::Minor);
        assert_eq!(added.confidence, 0);
        assert!(added.edited);
        assert_estimate_eq(&state.cost_estimate(), 2300, 5200);
    }

    #[test]
    fn test_out_of_range_edit_is_reported() {
        let result = open().apply(
            DashboardAction::UpdateSeverity { index: 4, severity: Severity::Major },
            TemporalFixtures::afternoon(),
        );
        assert!(result.is_err());
    }
}

// ============================================================================
// Final Estimate Policy Tests
// ============================================================================

mod final_estimate_tests {
    use super::*;

    #[test]
    fn test_overwrite_policy_replaces_agent_value() {
        let at = TemporalFixtures::afternoon();
        let state = open()
            .apply(DashboardAction::SetFinalEstimate("3150".to_string()), at)
            .and_then(|s| s.apply(DashboardAction::AddDamage, at))
            .unwrap();

        assert_eq!(state.final_estimate().value(), "3750");
    }

    #[test]
    fn test_seed_once_policy_keeps_agent_value() {
        let at = TemporalFixtures::afternoon();
        let state = DashboardStateBuilder::new()
            .with_final_estimate_policy(FinalEstimatePolicy::SeedOnce)
            .build()
            .apply(DashboardAction::AddDamage, at)
            .unwrap();
        // Not yet typed by the agent: still follows the midpoint
        assert_eq!(state.final_estimate().value(), "3750");

        let state = state
            .apply(DashboardAction::SetFinalEstimate("3150".to_string()), at)
            .and_then(|s| s.apply(DashboardAction::RemoveDamage { index: 0 }, at))
            .unwrap();
        assert_eq!(state.final_estimate().value(), "3150");
    }

    #[test]
    fn test_initial_final_estimate_preset() {
        let state = DashboardStateBuilder::new()
            .with_initial_final_estimate("3150")
            .build();
        assert_eq!(state.final_estimate().value(), "3150");
        assert!(!state.final_estimate().is_agent_entered());
    }

    #[test]
    fn test_repair_authorization_embeds_final_estimate() {
        let at = Utc.with_ymd_and_hms(2025, 1, 7, 9, 15, 0).unwrap();
        let state = open()
            .apply(DashboardAction::SetFinalEstimate("3150".to_string()), at)
            .unwrap();

        let body = state.repair_authorization(at).render(&Timezone::default());
        assert!(body.contains("3150"));
        assert!(body.contains(SAMPLE_POLICY_NUMBER));
        assert!(body.contains("Authorization Date: 1/7/2025"));
    }
}

// ============================================================================
// Assessment Tests
// ============================================================================

mod assessment_tests {
    use super::*;

    #[test]
    fn test_rerun_replaces_list_after_completion() {
        let t0 = TemporalFixtures::afternoon();
        let edited = open()
            .apply(DashboardAction::RemoveDamage { index: 0 }, t0)
            .unwrap();
        let started = edited.reduce(DashboardAction::RunAssessment, t0).unwrap();

        assert!(started.state.is_analyzing());
        assert_eq!(started.state.damages().len(), 3);
        let task = started.scheduled[0];
        assert_eq!(task.after, std::time::Duration::from_secs(2));

        let done = started
            .state
            .apply(task.into_action(), t0 + Duration::seconds(2))
            .unwrap();
        assert!(!done.is_analyzing());
        assert!(!done.has_model_feedback());
        assert_eq!(done.damages(), domain_claims::seed_assessments().as_slice());
        assert_estimate_eq(&done.cost_estimate(), 2100, 4700);
        assert_eq!(done.assessment_label().as_deref(), Some("4:30 PM"));

        let latest = done.audit_log().latest().unwrap();
        assert_eq!(latest.action, "Automated Assessment Re-run");
        assert!(latest.ai_used);
    }

    #[test]
    fn test_rerun_ignored_while_analyzing() {
        let t0 = TemporalFixtures::afternoon();
        let started = open().reduce(DashboardAction::RunAssessment, t0).unwrap();
        let again = started.state.reduce(DashboardAction::RunAssessment, t0).unwrap();

        assert!(again.scheduled.is_empty());
    }

    #[test]
    fn test_upload_during_run_supersedes_it() {
        let t0 = TemporalFixtures::afternoon();
        let image = core_kernel::ImageRef {
            id: core_kernel::ImageId::new(),
            file_name: "rear.jpg".to_string(),
            uri: "memory://rear.jpg".to_string(),
        };
        let first = open().reduce(DashboardAction::RunAssessment, t0).unwrap();
        let upload = first
            .state
            .reduce(DashboardAction::AttachImages(vec![image]), t0 + Duration::milliseconds(1500))
            .unwrap();

        assert!(upload.state.is_analyzing());
        assert_eq!(upload.scheduled.len(), 1);
        assert_eq!(upload.scheduled[0].after, std::time::Duration::from_secs(2));

        // The first run's completion no longer applies
        let stale = upload
            .state
            .apply(first.scheduled[0].into_action(), t0 + Duration::seconds(2))
            .unwrap();
        assert!(stale.is_analyzing());

        let done = stale
            .apply(upload.scheduled[0].into_action(), t0 + Duration::milliseconds(3500))
            .unwrap();
        assert!(!done.is_analyzing());
        assert_eq!(
            audit_actions(done.audit_log())[0],
            "Automated Assessment Re-run"
        );
    }

    #[test]
    fn test_image_upload_triggers_rerun() {
        let t0 = TemporalFixtures::afternoon();
        let image = core_kernel::ImageRef {
            id: core_kernel::ImageId::new(),
            file_name: "rear.jpg".to_string(),
            uri: "memory://rear.jpg".to_string(),
        };
        let reduction = open()
            .reduce(DashboardAction::AttachImages(vec![image.clone()]), t0)
            .unwrap();

        assert_eq!(reduction.state.images(), &[image]);
        assert!(reduction.state.is_analyzing());
        assert!(matches!(
            reduction.scheduled[0].kind,
            TaskKind::AssessmentComplete { .. }
        ));
    }

    #[test]
    fn test_empty_upload_does_nothing() {
        let state = open();
        let reduction = state
            .reduce(DashboardAction::AttachImages(Vec::new()), TemporalFixtures::afternoon())
            .unwrap();
        assert_eq!(reduction.state, state);
        assert!(reduction.scheduled.is_empty());
    }

    #[test]
    fn test_confidence_override_clamps_and_flags() {
        let at = TemporalFixtures::afternoon();
        let state = open()
            .apply(DashboardAction::OverrideConfidence("140".to_string()), at)
            .unwrap();
        assert_eq!(state.overall_confidence().value(), 100);
        assert!(state.has_model_feedback());

        let state = state
            .apply(DashboardAction::OverrideConfidence("n/a".to_string()), at)
            .unwrap();
        assert_eq!(state.overall_confidence().value(), 0);
    }

    #[test]
    fn test_initial_audit_entries() {
        let state = open();
        let entries: Vec<_> = state.audit_log().iter().collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].details, "Claim POL-2024-8847392 assigned for review");
        assert_eq!(entries[1].user, SYSTEM_USER);
        assert!(entries[1].ai_used);
        assert_eq!(
            entries[1].details,
            "Automated damage assessment completed with 92% confidence"
        );
        assert_audit_newest_first(state.audit_log());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn estimate_always_equals_table_sum(ops in ledger_ops_strategy(40)) {
        let at = TemporalFixtures::afternoon();
        let mut state = open();
        for op in ops {
            if let Some(action) = op.to_action(state.damages().len()) {
                state = state.apply(action, at).unwrap();
            }
            assert_estimate_matches_ledger(&state);
        }
    }

    #[test]
    fn edits_mark_only_their_target(
        index in 0usize..4,
        severity in test_utils::severity_strategy()
    ) {
        let at = TemporalFixtures::afternoon();
        let state = open();
        let next = state
            .apply(DashboardAction::UpdateSeverity { index, severity }, at)
            .unwrap();

        for (i, damage) in next.damages().iter().enumerate() {
            prop_assert_eq!(damage.edited, i == index);
        }
    }

    #[test]
    fn audit_log_stays_newest_first(ops in ledger_ops_strategy(30)) {
        let mut at = TemporalFixtures::afternoon();
        let mut state = open();
        for op in ops {
            at += Duration::seconds(1);
            if let Some(action) = op.to_action(state.damages().len()) {
                state = state.apply(action, at).unwrap();
            }
        }
        assert_audit_newest_first(state.audit_log());
    }
}
