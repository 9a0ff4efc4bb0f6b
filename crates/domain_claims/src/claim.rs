//! Claim metadata shown in the dashboard header

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Currency, Money};

/// Type of loss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossType {
    Collision,
    Comprehensive,
    Vandalism,
    Weather,
}

impl LossType {
    pub fn label(&self) -> &'static str {
        match self {
            LossType::Collision => "Collision Damage",
            LossType::Comprehensive => "Comprehensive",
            LossType::Vandalism => "Vandalism",
            LossType::Weather => "Weather Damage",
        }
    }
}

/// The insured vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub year: u16,
    pub make: String,
    pub model: String,
    pub vin: String,
}

impl Vehicle {
    /// `2022 Honda Accord`
    pub fn description(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

/// Read-only facts about the claim under review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDetails {
    pub id: ClaimId,
    pub policy_number: String,
    pub policyholder: String,
    pub incident_date: NaiveDate,
    pub vehicle: Vehicle,
    pub loss_type: LossType,
    pub coverage_limit: Money,
}

impl ClaimDetails {
    /// The collision claim the dashboard opens with
    pub fn collision_sample() -> Self {
        Self {
            id: ClaimId::new_v7(),
            policy_number: "POL-2024-8847392".to_string(),
            policyholder: "Sarah Mitchell".to_string(),
            incident_date: NaiveDate::from_ymd_opt(2024, 12, 28).unwrap_or_default(),
            vehicle: Vehicle {
                year: 2022,
                make: "Honda".to_string(),
                model: "Accord".to_string(),
                vin: "1HGCV1F3XMA123456".to_string(),
            },
            loss_type: LossType::Collision,
            coverage_limit: Money::from_whole(50_000, Currency::USD),
        }
    }

    pub fn currency(&self) -> Currency {
        self.coverage_limit.currency()
    }

    /// File name used for the exported repair authorization
    pub fn repair_authorization_file_name(&self) -> String {
        format!("RA_{}.pdf", self.policy_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_claim() {
        let claim = ClaimDetails::collision_sample();
        assert_eq!(claim.policy_number, "POL-2024-8847392");
        assert_eq!(claim.vehicle.description(), "2022 Honda Accord");
        assert_eq!(claim.loss_type.label(), "Collision Damage");
        assert_eq!(claim.coverage_limit.to_grouped_string(), "$50,000");
        assert_eq!(claim.incident_date.to_string(), "2024-12-28");
    }

    #[test]
    fn test_ra_file_name() {
        let claim = ClaimDetails::collision_sample();
        assert_eq!(claim.repair_authorization_file_name(), "RA_POL-2024-8847392.pdf");
    }
}
