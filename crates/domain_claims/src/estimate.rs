//! Repair cost estimation
//!
//! The cost estimate is a pure function of the damage list: the sum of a
//! fixed per-severity range. The final estimate is a separate, agent-owned
//! figure that is only seeded from the estimate's midpoint.

use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, MoneyError};

use crate::damage::{DamageAssessment, Severity};

/// Inclusive cost range for one damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRange {
    pub min: Money,
    pub max: Money,
}

impl CostRange {
    pub fn whole(min: i64, max: i64, currency: Currency) -> Self {
        Self {
            min: Money::from_whole(min, currency),
            max: Money::from_whole(max, currency),
        }
    }
}

/// Lookup from severity to repair cost range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCostTable {
    currency: Currency,
    minor: CostRange,
    moderate: CostRange,
    major: CostRange,
    severe: CostRange,
}

impl SeverityCostTable {
    /// Standard table: Minor 200-500, Moderate 500-1200, Major 1200-2500,
    /// Severe 2500-5000
    pub fn standard(currency: Currency) -> Self {
        Self {
            currency,
            minor: CostRange::whole(200, 500, currency),
            moderate: CostRange::whole(500, 1200, currency),
            major: CostRange::whole(1200, 2500, currency),
            severe: CostRange::whole(2500, 5000, currency),
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn range_for(&self, severity: Severity) -> CostRange {
        match severity {
            Severity::Minor => self.minor,
            Severity::Moderate => self.moderate,
            Severity::Major => self.major,
            Severity::Severe => self.severe,
        }
    }
}

impl Default for SeverityCostTable {
    fn default() -> Self {
        Self::standard(Currency::USD)
    }
}

/// Derived cost estimate for the whole damage list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub min: Money,
    pub max: Money,
}

impl CostEstimate {
    pub fn zero(currency: Currency) -> Self {
        Self {
            min: Money::zero(currency),
            max: Money::zero(currency),
        }
    }

    /// `round((min + max) / 2)` with halves rounded up
    pub fn midpoint(&self) -> Result<Money, MoneyError> {
        self.min.midpoint(&self.max)
    }

    /// Display form, e.g. `$2,100 - $4,700`
    pub fn display_range(&self) -> String {
        format!(
            "{} - {}",
            self.min.to_grouped_string(),
            self.max.to_grouped_string()
        )
    }
}

/// Sums the table over the damages
pub fn recalculate_cost(
    table: &SeverityCostTable,
    damages: &[DamageAssessment],
) -> Result<CostEstimate, MoneyError> {
    damages
        .iter()
        .try_fold(CostEstimate::zero(table.currency()), |acc, damage| {
            let range = table.range_for(damage.severity);
            Ok(CostEstimate {
                min: acc.min.checked_add(&range.min)?,
                max: acc.max.checked_add(&range.max)?,
            })
        })
}

/// When a damage-list recalculation may replace the final estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalEstimatePolicy {
    /// Every recalculation writes the midpoint, discarding agent input
    #[default]
    OverwriteOnRecalculate,
    /// Recalculations write the midpoint only until the agent types a value
    SeedOnce,
}

/// Agent-owned final figure, kept as the text the agent typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalEstimate {
    value: String,
    agent_entered: bool,
}

impl FinalEstimate {
    /// A value seeded by the system
    pub fn seeded(amount: Money) -> Self {
        Self {
            value: amount.amount().round().to_string(),
            agent_entered: false,
        }
    }

    /// A configured starting value that recalculations may still replace
    pub fn preset(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            agent_entered: false,
        }
    }

    /// A value typed by the agent
    pub fn entered(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            agent_entered: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_agent_entered(&self) -> bool {
        self.agent_entered
    }

    /// Parses the text as money; free text that is not a number yields an error
    pub fn amount(&self, currency: Currency) -> Result<Money, MoneyError> {
        Money::parse(&self.value, currency)
    }

    /// Applies a recalculated midpoint according to the policy
    ///
    /// Returns true if the midpoint was written.
    pub fn reseed(&mut self, midpoint: Money, policy: FinalEstimatePolicy) -> bool {
        match policy {
            FinalEstimatePolicy::SeedOnce if self.agent_entered => false,
            _ => {
                *self = Self::seeded(midpoint);
                true
            }
        }
    }
}
