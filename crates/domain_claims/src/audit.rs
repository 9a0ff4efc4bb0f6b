//! Audit trail of agent and system actions
//!
//! Entries are prepended, so iteration yields the newest entry first.
//! Nothing is ever edited or removed.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::AuditEventId;

use crate::damage::Severity;
use crate::status::ClaimStatus;

/// Acting user recorded for automated entries
pub const SYSTEM_USER: &str = "System";

/// A single audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: AuditEventId,
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub user: String,
    /// True when automated inference produced or drove the change
    pub ai_used: bool,
    pub details: String,
}

impl AuditLogEntry {
    pub fn new(
        timestamp: DateTime<Utc>,
        action: impl Into<String>,
        user: impl Into<String>,
        ai_used: bool,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: AuditEventId::new_v7(),
            timestamp,
            action: action.into(),
            user: user.into(),
            ai_used,
            details: details.into(),
        }
    }

    pub fn status_changed(at: DateTime<Utc>, user: &str, status: ClaimStatus) -> Self {
        Self::new(
            at,
            format!("Status Changed to {}", status.code()),
            user,
            false,
            status.message(),
        )
    }

    pub fn assessment_generated(at: DateTime<Utc>, overall_confidence: u8) -> Self {
        Self::new(
            at,
            "Automated Assessment Generated",
            SYSTEM_USER,
            true,
            format!(
                "Automated damage assessment completed with {}% confidence",
                overall_confidence
            ),
        )
    }

    pub fn claim_opened(at: DateTime<Utc>, user: &str, policy_number: &str) -> Self {
        Self::new(
            at,
            "Claim Opened",
            user,
            false,
            format!("Claim {} assigned for review", policy_number),
        )
    }

    pub fn assessment_rerun(at: DateTime<Utc>, user: &str) -> Self {
        Self::new(
            at,
            "Automated Assessment Re-run",
            user,
            true,
            "Damage assessment regenerated using automated vision model",
        )
    }

    pub fn severity_edited(
        at: DateTime<Utc>,
        user: &str,
        severity: Severity,
        damage_type: &str,
    ) -> Self {
        Self::new(
            at,
            "Damage Assessment Edited",
            user,
            false,
            format!(
                "Severity changed to {} for {} (will train automated system)",
                severity, damage_type
            ),
        )
    }

    pub fn type_edited(at: DateTime<Utc>, user: &str, damage_type: &str) -> Self {
        Self::new(
            at,
            "Damage Type Edited",
            user,
            false,
            format!(
                "Damage type changed to \"{}\" (will train automated system)",
                damage_type
            ),
        )
    }

    pub fn damage_added(at: DateTime<Utc>, user: &str, damage_type: &str) -> Self {
        Self::new(
            at,
            "Damage Added",
            user,
            false,
            format!("Added \"{}\" to the assessment (will train automated system)", damage_type),
        )
    }

    pub fn damage_removed(at: DateTime<Utc>, user: &str, damage_type: &str) -> Self {
        Self::new(
            at,
            "Damage Removed",
            user,
            false,
            format!(
                "Removed \"{}\" from the assessment (will train automated system)",
                damage_type
            ),
        )
    }

    pub fn repair_authorization_downloaded(at: DateTime<Utc>, user: &str) -> Self {
        Self::new(
            at,
            "RA Downloaded",
            user,
            false,
            "Repair Authorization document downloaded",
        )
    }
}

/// Newest-first, append-only audit log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    entries: VecDeque<AuditLogEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an entry as the newest one
    pub fn record(&mut self, entry: AuditLogEntry) {
        tracing::debug!(action = %entry.action, user = %entry.user, ai_used = entry.ai_used, "audit entry recorded");
        self.entries.push_front(entry);
    }

    /// Most recent entry, if any
    pub fn latest(&self) -> Option<&AuditLogEntry> {
        self.entries.front()
    }

    /// Iterates newest first
    pub fn iter(&self) -> impl Iterator<Item = &AuditLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that involved automated inference
    pub fn ai_involved(&self) -> impl Iterator<Item = &AuditLogEntry> {
        self.entries.iter().filter(|e| e.ai_used)
    }
}
