//! Claim status lifecycle
//!
//! ```text
//! UNDER_REVIEW -> PENDING -> APPROVED -> CLOSED
//! ```
//!
//! The arrow is the nominal direction only. No transition is rejected; the
//! agent (or a scheduled step) may set any status from any other.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClaimError;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    /// Agent is reviewing the automated assessment
    UnderReview,
    /// Submitted, waiting for the adjuster
    Pending,
    /// Adjuster approved; repair authorization in preparation
    Approved,
    /// Repair authorization sent; terminal
    Closed,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 4] = [
        ClaimStatus::UnderReview,
        ClaimStatus::Pending,
        ClaimStatus::Approved,
        ClaimStatus::Closed,
    ];

    /// Wire/audit code, e.g. `UNDER_REVIEW`
    pub fn code(&self) -> &'static str {
        match self {
            ClaimStatus::UnderReview => "UNDER_REVIEW",
            ClaimStatus::Pending => "PENDING",
            ClaimStatus::Approved => "APPROVED",
            ClaimStatus::Closed => "CLOSED",
        }
    }

    /// Fixed message recorded in history whenever this status is entered
    pub fn message(&self) -> &'static str {
        match self {
            ClaimStatus::UnderReview => {
                "Assessment in progress - claim under initial review by agent"
            }
            ClaimStatus::Pending => "Claim submitted for approval - awaiting adjuster review",
            ClaimStatus::Approved => {
                "Claim approved by adjuster - repair authorization being prepared"
            }
            ClaimStatus::Closed => {
                "Repair Authorization sent to policyholder - claim processing complete"
            }
        }
    }

    /// Badge label shown next to the claim header
    pub fn badge_label(&self) -> &'static str {
        match self {
            ClaimStatus::UnderReview => "Under Review",
            ClaimStatus::Pending => "Pending Approval",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Closed => "Closed",
        }
    }

    /// What the agent can do, or is told, while the claim sits in this status
    pub fn available_actions(&self) -> StatusActions {
        match self {
            ClaimStatus::UnderReview => StatusActions::Actions(vec![
                AgentAction::SubmitForApproval,
                AgentAction::RequestMorePhotos,
            ]),
            ClaimStatus::Pending => StatusActions::Notice("Awaiting adjuster approval..."),
            ClaimStatus::Approved => StatusActions::Notice("Preparing Repair Authorization..."),
            ClaimStatus::Closed => {
                StatusActions::Actions(vec![AgentAction::DownloadRepairAuthorization])
            }
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        ClaimStatus::ALL
            .into_iter()
            .find(|status| status.code() == normalized)
            .ok_or_else(|| ClaimError::invalid_input("status", s))
    }
}

/// Agent-facing actions offered for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentAction {
    SubmitForApproval,
    RequestMorePhotos,
    DownloadRepairAuthorization,
}

/// Either buttons the agent may press, or a passive notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StatusActions {
    Actions(Vec<AgentAction>),
    Notice(&'static str),
}

/// One entry of the status history. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: ClaimStatus,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl StatusHistoryEntry {
    pub fn new(status: ClaimStatus, timestamp: DateTime<Utc>) -> Self {
        Self {
            status,
            timestamp,
            message: status.message().to_string(),
        }
    }
}
