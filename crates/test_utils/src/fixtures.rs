//! Pre-built Test Fixtures
//!
//! Ready-to-use values for the sample collision claim. They are fixed so
//! assertions can compare against literals.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{Currency, Money};
use domain_claims::{ClaimDetails, DamageAssessment, Severity};

/// Policy number of the sample claim
pub const SAMPLE_POLICY_NUMBER: &str = "POL-2024-8847392";

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Moment the dashboard is opened in tests (Jan 6, 2025 14:00 UTC)
    pub fn opened_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 6, 14, 0, 0).unwrap()
    }

    /// A later moment on the same day
    pub fn afternoon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 6, 16, 30, 0).unwrap()
    }
}

/// Fixture for claim data
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// The collision claim the dashboard opens with
    pub fn collision() -> ClaimDetails {
        ClaimDetails::collision_sample()
    }
}

/// Fixture for damage data
pub struct DamageFixtures;

impl DamageFixtures {
    pub fn minor(label: &str) -> DamageAssessment {
        DamageAssessment::detected(label, Severity::Minor, 80)
    }

    pub fn severe(label: &str) -> DamageAssessment {
        DamageAssessment::detected(label, Severity::Severe, 70)
    }
}

/// Fixture for money data
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn usd(units: i64) -> Money {
        Money::from_whole(units, Currency::USD)
    }
}
