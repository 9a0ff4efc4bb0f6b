//! Claims Dashboard Domain
//!
//! This crate holds the domain logic behind the claims agent dashboard: the
//! claim status lifecycle and the damage assessment ledger, plus the audit
//! trail both write to.
//!
//! # Claim Lifecycle
//!
//! ```text
//! UNDER_REVIEW -> PENDING -(3s)-> APPROVED -(3s)-> CLOSED
//! ```
//!
//! All state lives in [`DashboardState`]. It changes only through
//! [`DashboardState::reduce`], which returns the next state and the delayed
//! follow-ups the runtime should schedule.

pub mod claim;
pub mod status;
pub mod audit;
pub mod damage;
pub mod estimate;
pub mod ledger;
pub mod confidence;
pub mod authorization;
pub mod workflow;
pub mod state;
pub mod error;

pub use claim::{ClaimDetails, LossType, Vehicle};
pub use status::{AgentAction, ClaimStatus, StatusActions, StatusHistoryEntry};
pub use audit::{AuditLog, AuditLogEntry, SYSTEM_USER};
pub use damage::{seed_assessments, DamageAssessment, Severity};
pub use estimate::{
    recalculate_cost, CostEstimate, CostRange, FinalEstimate, FinalEstimatePolicy,
    SeverityCostTable,
};
pub use ledger::DamageLedger;
pub use confidence::{ConfidenceBand, OverallConfidence};
pub use authorization::RepairAuthorization;
pub use workflow::{ScheduledTask, TaskKind, Timings};
pub use state::{
    DashboardAction, DashboardSettings, DashboardState, Reduction, StatusBanner,
    DEFAULT_AGENT_ID,
};
pub use error::ClaimError;
