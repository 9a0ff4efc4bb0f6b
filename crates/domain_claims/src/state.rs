//! Dashboard state and its reducer
//!
//! [`DashboardState`] holds everything the agent sees for one claim. It is
//! only changed through [`DashboardState::reduce`], which leaves the input
//! untouched and returns the next state together with any follow-up tasks
//! the runtime has to schedule.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ImageRef, Timezone};

use crate::audit::{AuditLog, AuditLogEntry};
use crate::authorization::RepairAuthorization;
use crate::claim::ClaimDetails;
use crate::confidence::OverallConfidence;
use crate::damage::{DamageAssessment, Severity};
use crate::error::ClaimError;
use crate::estimate::{CostEstimate, FinalEstimate, FinalEstimatePolicy, SeverityCostTable};
use crate::ledger::DamageLedger;
use crate::status::{ClaimStatus, StatusActions, StatusHistoryEntry};
use crate::workflow::{cascade_successor, ScheduledTask, Timings};

/// Default acting user for agent-driven entries
pub const DEFAULT_AGENT_ID: &str = "Agent A-4782";

/// Behavioural knobs for one dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Recorded as the user on agent-driven audit entries
    pub agent_id: String,
    /// Zone used for human-readable times and dates
    pub timezone: Timezone,
    pub timings: Timings,
    pub final_estimate_policy: FinalEstimatePolicy,
    /// Write audit entries for damage additions and removals
    pub audit_damage_list_changes: bool,
    /// Starting final estimate; the seed midpoint when absent
    pub initial_final_estimate: Option<String>,
    pub cost_table: SeverityCostTable,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            agent_id: DEFAULT_AGENT_ID.to_string(),
            timezone: Timezone::default(),
            timings: Timings::default(),
            final_estimate_policy: FinalEstimatePolicy::default(),
            audit_damage_list_changes: false,
            initial_final_estimate: None,
            cost_table: SeverityCostTable::default(),
        }
    }
}

/// Transient notice shown after a status change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBanner {
    pub message: String,
    pub sequence: u64,
    pub shown_at: DateTime<Utc>,
}

/// Everything the agent can do to the dashboard, plus timer callbacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashboardAction {
    /// Force a status, no legality check
    ChangeStatus(ClaimStatus),
    /// Move to PENDING and start the automatic approval cascade
    SubmitForApproval,
    Approve,
    SendRepairAuthorization,
    /// Scheduled cascade step issued under `epoch`
    CascadeStepDue { target: ClaimStatus, epoch: u64 },
    /// Start a re-run of the automated assessment
    RunAssessment,
    /// Scheduled completion of the run started under `epoch`
    AssessmentDue { epoch: u64 },
    /// Newly stored uploads; a non-empty batch re-runs the assessment
    AttachImages(Vec<ImageRef>),
    UpdateSeverity { index: usize, severity: Severity },
    UpdateType { index: usize, damage_type: String },
    RemoveDamage { index: usize },
    AddDamage,
    SetFinalEstimate(String),
    SetAgentNotes(String),
    /// Raw agent input for the overall confidence score
    OverrideConfidence(String),
    RecordRepairAuthorizationDownload,
    DismissBanner { sequence: u64 },
}

/// Result of reducing one action
#[derive(Debug, Clone)]
pub struct Reduction {
    pub state: DashboardState,
    pub scheduled: Vec<ScheduledTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    claim: ClaimDetails,
    settings: DashboardSettings,
    status: ClaimStatus,
    /// Bumped on every status change; cascade steps from older epochs are void
    status_epoch: u64,
    history: Vec<StatusHistoryEntry>,
    audit_log: AuditLog,
    banner: Option<StatusBanner>,
    banner_sequence: u64,
    ledger: DamageLedger,
    final_estimate: FinalEstimate,
    overall_confidence: OverallConfidence,
    /// Agent edits pending use as model training feedback
    has_model_feedback: bool,
    analyzing: bool,
    assessment_epoch: u64,
    assessment_generated_at: Option<DateTime<Utc>>,
    agent_notes: String,
    images: Vec<ImageRef>,
}

impl DashboardState {
    /// State of a freshly opened dashboard
    ///
    /// The claim starts UNDER_REVIEW with the model's seed assessment and two
    /// earlier audit entries: the automated assessment (five minutes before
    /// `opened_at`) and the claim assignment (three minutes before).
    pub fn open(
        claim: ClaimDetails,
        settings: DashboardSettings,
        opened_at: DateTime<Utc>,
    ) -> Result<Self, ClaimError> {
        let ledger = DamageLedger::seeded(settings.cost_table.clone())?;
        let final_estimate = match &settings.initial_final_estimate {
            Some(preset) => FinalEstimate::preset(preset.clone()),
            None => FinalEstimate::seeded(ledger.estimate().midpoint()?),
        };
        let overall_confidence = OverallConfidence::INITIAL;

        let mut audit_log = AuditLog::new();
        audit_log.record(AuditLogEntry::assessment_generated(
            opened_at - ChronoDuration::minutes(5),
            overall_confidence.value(),
        ));
        audit_log.record(AuditLogEntry::claim_opened(
            opened_at - ChronoDuration::minutes(3),
            &settings.agent_id,
            &claim.policy_number,
        ));

        Ok(Self {
            claim,
            settings,
            status: ClaimStatus::UnderReview,
            status_epoch: 0,
            history: vec![StatusHistoryEntry::new(ClaimStatus::UnderReview, opened_at)],
            audit_log,
            banner: None,
            banner_sequence: 0,
            ledger,
            final_estimate,
            overall_confidence,
            has_model_feedback: false,
            analyzing: false,
            assessment_epoch: 0,
            assessment_generated_at: Some(opened_at),
            agent_notes: String::new(),
            images: Vec::new(),
        })
    }

    /// Applies one action and returns the next state with its follow-ups
    pub fn reduce(&self, action: DashboardAction, at: DateTime<Utc>) -> Result<Reduction, ClaimError> {
        let mut next = self.clone();
        let mut scheduled = Vec::new();
        next.dispatch(action, at, &mut scheduled)?;
        Ok(Reduction {
            state: next,
            scheduled,
        })
    }

    /// Like [`reduce`](Self::reduce), discarding follow-up tasks
    pub fn apply(&self, action: DashboardAction, at: DateTime<Utc>) -> Result<Self, ClaimError> {
        self.reduce(action, at).map(|reduction| reduction.state)
    }

    fn dispatch(
        &mut self,
        action: DashboardAction,
        at: DateTime<Utc>,
        scheduled: &mut Vec<ScheduledTask>,
    ) -> Result<(), ClaimError> {
        match action {
            DashboardAction::ChangeStatus(status) => self.enter_status(status, at, scheduled),
            DashboardAction::Approve => self.enter_status(ClaimStatus::Approved, at, scheduled),
            DashboardAction::SendRepairAuthorization => {
                self.enter_status(ClaimStatus::Closed, at, scheduled)
            }
            DashboardAction::SubmitForApproval => {
                self.enter_status(ClaimStatus::Pending, at, scheduled);
                self.schedule_cascade_after(ClaimStatus::Pending, scheduled);
            }
            DashboardAction::CascadeStepDue { target, epoch } => {
                if epoch != self.status_epoch {
                    tracing::debug!(
                        target_status = %target,
                        task_epoch = epoch,
                        current_epoch = self.status_epoch,
                        "dropping stale cascade step"
                    );
                    return Ok(());
                }
                self.enter_status(target, at, scheduled);
                self.schedule_cascade_after(target, scheduled);
            }
            DashboardAction::RunAssessment => self.start_assessment(scheduled),
            DashboardAction::AssessmentDue { epoch } => self.complete_assessment(epoch, at)?,
            DashboardAction::AttachImages(images) => {
                if images.is_empty() {
                    return Ok(());
                }
                tracing::debug!(count = images.len(), "images attached");
                self.images.extend(images);
                self.begin_assessment(scheduled);
            }
            DashboardAction::UpdateSeverity { index, severity } => {
                let damage_type = self.ledger.update_severity(index, severity)?.damage_type.clone();
                self.after_list_change()?;
                self.audit_log.record(AuditLogEntry::severity_edited(
                    at,
                    &self.settings.agent_id,
                    severity,
                    &damage_type,
                ));
            }
            DashboardAction::UpdateType { index, damage_type } => {
                self.ledger.update_type(index, damage_type.clone())?;
                self.after_list_change()?;
                self.audit_log.record(AuditLogEntry::type_edited(
                    at,
                    &self.settings.agent_id,
                    &damage_type,
                ));
            }
            DashboardAction::RemoveDamage { index } => {
                let removed = self.ledger.remove(index)?;
                self.after_list_change()?;
                if self.settings.audit_damage_list_changes {
                    self.audit_log.record(AuditLogEntry::damage_removed(
                        at,
                        &self.settings.agent_id,
                        &removed.damage_type,
                    ));
                }
            }
            DashboardAction::AddDamage => {
                let damage_type = self.ledger.add()?.damage_type.clone();
                self.after_list_change()?;
                if self.settings.audit_damage_list_changes {
                    self.audit_log.record(AuditLogEntry::damage_added(
                        at,
                        &self.settings.agent_id,
                        &damage_type,
                    ));
                }
            }
            DashboardAction::SetFinalEstimate(value) => {
                self.final_estimate = FinalEstimate::entered(value);
            }
            DashboardAction::SetAgentNotes(notes) => {
                self.agent_notes = notes;
            }
            DashboardAction::OverrideConfidence(input) => {
                self.overall_confidence = OverallConfidence::parse_lenient(&input);
                self.has_model_feedback = true;
            }
            DashboardAction::RecordRepairAuthorizationDownload => {
                self.audit_log.record(AuditLogEntry::repair_authorization_downloaded(
                    at,
                    &self.settings.agent_id,
                ));
            }
            DashboardAction::DismissBanner { sequence } => {
                if self.banner.as_ref().map(|b| b.sequence) == Some(sequence) {
                    self.banner = None;
                }
            }
        }
        Ok(())
    }

    fn enter_status(
        &mut self,
        status: ClaimStatus,
        at: DateTime<Utc>,
        scheduled: &mut Vec<ScheduledTask>,
    ) {
        tracing::info!(
            policy = %self.claim.policy_number,
            from = %self.status,
            to = %status,
            "claim status changed"
        );
        self.status = status;
        self.status_epoch += 1;
        self.history.push(StatusHistoryEntry::new(status, at));
        self.audit_log.record(AuditLogEntry::status_changed(
            at,
            &self.settings.agent_id,
            status,
        ));

        self.banner_sequence += 1;
        self.banner = Some(StatusBanner {
            message: status.message().to_string(),
            sequence: self.banner_sequence,
            shown_at: at,
        });
        scheduled.push(ScheduledTask::dismiss_banner(
            self.banner_sequence,
            self.settings.timings.status_banner_ttl,
        ));
    }

    fn schedule_cascade_after(&self, current: ClaimStatus, scheduled: &mut Vec<ScheduledTask>) {
        if let Some(target) = cascade_successor(current) {
            scheduled.push(ScheduledTask::cascade_step(
                target,
                self.status_epoch,
                self.settings.timings.approval_step_delay,
            ));
        }
    }

    /// Re-run requested by the agent; ignored while a run is in flight
    fn start_assessment(&mut self, scheduled: &mut Vec<ScheduledTask>) {
        if self.analyzing {
            tracing::debug!("assessment already running, ignoring re-run");
            return;
        }
        self.begin_assessment(scheduled);
    }

    /// Starts a fresh run, superseding any run still in flight
    fn begin_assessment(&mut self, scheduled: &mut Vec<ScheduledTask>) {
        self.analyzing = true;
        self.assessment_epoch += 1;
        scheduled.push(ScheduledTask::assessment_complete(
            self.assessment_epoch,
            self.settings.timings.assessment_delay,
        ));
    }

    fn complete_assessment(&mut self, epoch: u64, at: DateTime<Utc>) -> Result<(), ClaimError> {
        if !self.analyzing || epoch != self.assessment_epoch {
            tracing::debug!(
                task_epoch = epoch,
                current_epoch = self.assessment_epoch,
                "dropping stale assessment completion"
            );
            return Ok(());
        }
        self.ledger.reseed()?;
        self.analyzing = false;
        self.has_model_feedback = false;
        self.assessment_generated_at = Some(at);
        self.reseed_final_estimate()?;
        self.audit_log.record(AuditLogEntry::assessment_rerun(at, &self.settings.agent_id));
        tracing::info!(
            policy = %self.claim.policy_number,
            estimate = %self.ledger.estimate().display_range(),
            "automated assessment regenerated"
        );
        Ok(())
    }

    fn after_list_change(&mut self) -> Result<(), ClaimError> {
        self.has_model_feedback = true;
        self.reseed_final_estimate()
    }

    fn reseed_final_estimate(&mut self) -> Result<(), ClaimError> {
        let midpoint = self.ledger.estimate().midpoint()?;
        self.final_estimate
            .reseed(midpoint, self.settings.final_estimate_policy);
        Ok(())
    }

    pub fn claim(&self) -> &ClaimDetails {
        &self.claim
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn status(&self) -> ClaimStatus {
        self.status
    }

    pub fn status_epoch(&self) -> u64 {
        self.status_epoch
    }

    /// Oldest first
    pub fn history(&self) -> &[StatusHistoryEntry] {
        &self.history
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit_log
    }

    pub fn banner(&self) -> Option<&StatusBanner> {
        self.banner.as_ref()
    }

    pub fn damages(&self) -> &[DamageAssessment] {
        self.ledger.damages()
    }

    pub fn ledger(&self) -> &DamageLedger {
        &self.ledger
    }

    pub fn cost_estimate(&self) -> CostEstimate {
        self.ledger.estimate()
    }

    pub fn final_estimate(&self) -> &FinalEstimate {
        &self.final_estimate
    }

    pub fn overall_confidence(&self) -> OverallConfidence {
        self.overall_confidence
    }

    pub fn has_model_feedback(&self) -> bool {
        self.has_model_feedback
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn assessment_generated_at(&self) -> Option<DateTime<Utc>> {
        self.assessment_generated_at
    }

    /// Generation time in the agent's zone, e.g. `2:05 PM`
    pub fn assessment_label(&self) -> Option<String> {
        self.assessment_generated_at
            .map(|at| self.settings.timezone.time_label(at))
    }

    pub fn agent_notes(&self) -> &str {
        &self.agent_notes
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn available_actions(&self) -> StatusActions {
        self.status.available_actions()
    }

    /// Authorization document as it would be issued at `at`
    pub fn repair_authorization(&self, at: DateTime<Utc>) -> RepairAuthorization {
        RepairAuthorization::new(&self.claim, &self.final_estimate, at)
    }
}
