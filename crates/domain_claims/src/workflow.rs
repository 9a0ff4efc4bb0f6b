//! Timer-driven follow-ups
//!
//! The reducer never sleeps. When an action needs something to happen later
//! it returns a [`ScheduledTask`]; the runtime waits `after` and then feeds
//! [`ScheduledTask::into_action`] back into the reducer. Each task carries the
//! epoch or sequence number it was issued under, and the reducer drops tasks
//! whose number is no longer current.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::state::DashboardAction;
use crate::status::ClaimStatus;

/// Delays used by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    /// Simulated inference time for a re-run
    pub assessment_delay: Duration,
    /// Gap between the automatic approval steps
    pub approval_step_delay: Duration,
    /// How long a status banner stays up
    pub status_banner_ttl: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            assessment_delay: Duration::from_secs(2),
            approval_step_delay: Duration::from_secs(3),
            status_banner_ttl: Duration::from_secs(5),
        }
    }
}

/// What a scheduled task does once it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Next automatic step of the approval cascade
    CascadeStep { target: ClaimStatus, epoch: u64 },
    /// Inference finished for the run started under `epoch`
    AssessmentComplete { epoch: u64 },
    /// Hide the banner shown with `sequence`
    DismissBanner { sequence: u64 },
}

/// A delayed follow-up action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub after: Duration,
    pub kind: TaskKind,
}

impl ScheduledTask {
    pub fn cascade_step(target: ClaimStatus, epoch: u64, after: Duration) -> Self {
        Self {
            after,
            kind: TaskKind::CascadeStep { target, epoch },
        }
    }

    pub fn assessment_complete(epoch: u64, after: Duration) -> Self {
        Self {
            after,
            kind: TaskKind::AssessmentComplete { epoch },
        }
    }

    pub fn dismiss_banner(sequence: u64, after: Duration) -> Self {
        Self {
            after,
            kind: TaskKind::DismissBanner { sequence },
        }
    }

    /// The action to dispatch when the delay has elapsed
    pub fn into_action(self) -> DashboardAction {
        match self.kind {
            TaskKind::CascadeStep { target, epoch } => {
                DashboardAction::CascadeStepDue { target, epoch }
            }
            TaskKind::AssessmentComplete { epoch } => {
                DashboardAction::AssessmentDue { epoch }
            }
            TaskKind::DismissBanner { sequence } => DashboardAction::DismissBanner { sequence },
        }
    }
}

/// Status the approval cascade moves to after `current`, if any
///
/// The cascade runs PENDING -> APPROVED -> CLOSED and stops there.
pub fn cascade_successor(current: ClaimStatus) -> Option<ClaimStatus> {
    match current {
        ClaimStatus::Pending => Some(ClaimStatus::Approved),
        ClaimStatus::Approved => Some(ClaimStatus::Closed),
        ClaimStatus::UnderReview | ClaimStatus::Closed => None,
    }
}
