//! Plain-text rendering of dashboard state for the console

use std::fmt::Write;

use domain_claims::{AgentAction, DashboardState, StatusActions};

fn action_label(action: AgentAction) -> &'static str {
    match action {
        AgentAction::SubmitForApproval => "Submit for Approval (submit)",
        AgentAction::RequestMorePhotos => "Request More Photos (upload)",
        AgentAction::DownloadRepairAuthorization => "Download Repair Authorization (download)",
    }
}

/// Claim header, status, damage ledger and estimate
pub fn render_summary(state: &DashboardState) -> String {
    let claim = state.claim();
    let mut out = String::new();

    let _ = writeln!(out, "Claim {} [{}]", claim.policy_number, state.status().badge_label());
    let _ = writeln!(
        out,
        "  {} | {} | VIN {} | {} | incident {} | limit {}",
        claim.policyholder,
        claim.vehicle.description(),
        claim.vehicle.vin,
        claim.loss_type.label(),
        claim.incident_date.format("%-m/%-d/%Y"),
        claim.coverage_limit.to_grouped_string(),
    );
    if let Some(banner) = state.banner() {
        let _ = writeln!(out, "  >> {}", banner.message);
    }

    let confidence = state.overall_confidence();
    let _ = writeln!(
        out,
        "Automated assessment{} | confidence {} ({})",
        state
            .assessment_label()
            .map(|label| format!(" generated {}", label))
            .unwrap_or_default(),
        confidence,
        confidence.band().guidance(),
    );
    if state.is_analyzing() {
        let _ = writeln!(out, "  analyzing...");
    }
    if state.has_model_feedback() {
        let _ = writeln!(out, "  edits will be used as model feedback");
    }

    for (i, damage) in state.damages().iter().enumerate() {
        let confidence = damage
            .displayed_confidence()
            .map(|c| format!("{}%", c))
            .unwrap_or_else(|| "edited".to_string());
        let _ = writeln!(
            out,
            "  [{}] {:<28} {:<9} {}",
            i,
            damage.damage_type,
            damage.severity.label(),
            confidence
        );
    }

    let _ = writeln!(out, "Estimated cost {}", state.cost_estimate().display_range());
    let _ = writeln!(out, "Final estimate ${}", state.final_estimate().value());
    if !state.agent_notes().is_empty() {
        let _ = writeln!(out, "Notes: {}", state.agent_notes());
    }
    if !state.images().is_empty() {
        let _ = writeln!(out, "Images: {}", state.images().len());
    }

    match state.available_actions() {
        StatusActions::Actions(actions) => {
            let labels: Vec<_> = actions.into_iter().map(action_label).collect();
            let _ = writeln!(out, "Actions: {}", labels.join(", "));
        }
        StatusActions::Notice(notice) => {
            let _ = writeln!(out, "{}", notice);
        }
    }

    out
}

/// Audit log, newest first
pub fn render_audit(state: &DashboardState) -> String {
    let tz = &state.settings().timezone;
    let log = state.audit_log();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} entries, {} with automated involvement",
        log.len(),
        log.ai_involved().count()
    );
    for entry in log.iter() {
        let _ = writeln!(
            out,
            "{} {} | {} | {}{}\n    {}",
            tz.date_label(entry.timestamp),
            tz.time_label(entry.timestamp),
            entry.action,
            entry.user,
            if entry.ai_used { " | AI" } else { "" },
            entry.details,
        );
    }
    out
}

/// Status history, oldest first
pub fn render_history(state: &DashboardState) -> String {
    let tz = &state.settings().timezone;
    let mut out = String::new();
    for entry in state.history() {
        let _ = writeln!(
            out,
            "{} {} | {} | {}",
            tz.date_label(entry.timestamp),
            tz.time_label(entry.timestamp),
            entry.status.code(),
            entry.message,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use domain_claims::{ClaimDetails, DashboardSettings};

    fn state() -> DashboardState {
        DashboardState::open(
            ClaimDetails::collision_sample(),
            DashboardSettings::default(),
            Utc.with_ymd_and_hms(2025, 1, 6, 14, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_summary_shows_estimate_and_actions() {
        let text = render_summary(&state());

        assert!(text.contains("Claim POL-2024-8847392 [Under Review]"));
        assert!(text.contains("$2,100 - $4,700"));
        assert!(text.contains("Final estimate $3400"));
        assert!(text.contains("High confidence - assessment is reliable"));
        assert!(text.contains("Submit for Approval"));
    }

    #[test]
    fn test_audit_lists_newest_first() {
        let text = render_audit(&state());
        let opened = text.find("Claim Opened").unwrap();
        let generated = text.find("Automated Assessment Generated").unwrap();
        assert!(opened < generated);
        assert!(text.contains("1:57 PM"));
        assert!(text.starts_with("2 entries, 1 with automated involvement"));
    }

    #[test]
    fn test_history_starts_under_review() {
        let text = render_history(&state());
        assert!(text.starts_with("1/6/2025 2:00 PM | UNDER_REVIEW"));
    }
}
