//! Repair authorization document
//!
//! The export is plain text under a `.pdf` name. Consumers must not expect
//! PDF structure.

use chrono::{DateTime, Utc};

use core_kernel::{ExportDocument, Timezone};

use crate::claim::ClaimDetails;
use crate::estimate::FinalEstimate;

pub const CONTENT_TYPE: &str = "text/plain";

/// Snapshot of the figures printed on the authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairAuthorization {
    pub policy_number: String,
    pub policyholder: String,
    pub vehicle: String,
    /// Final estimate exactly as the agent left it
    pub approved_amount: String,
    pub authorized_at: DateTime<Utc>,
}

impl RepairAuthorization {
    pub fn new(claim: &ClaimDetails, final_estimate: &FinalEstimate, at: DateTime<Utc>) -> Self {
        Self {
            policy_number: claim.policy_number.clone(),
            policyholder: claim.policyholder.clone(),
            vehicle: claim.vehicle.description(),
            approved_amount: final_estimate.value().to_string(),
            authorized_at: at,
        }
    }

    pub fn file_name(&self) -> String {
        format!("RA_{}.pdf", self.policy_number)
    }

    /// Renders the document body; the date is the agent's local date
    pub fn render(&self, timezone: &Timezone) -> String {
        format!(
            "Repair Authorization\n\
             Policy: {}\n\
             Policyholder: {}\n\
             Vehicle: {}\n\
             Approved Amount: ${}\n\
             Authorization Date: {}\n",
            self.policy_number,
            self.policyholder,
            self.vehicle,
            self.approved_amount,
            timezone.date_label(self.authorized_at),
        )
    }

    pub fn to_document(&self, timezone: &Timezone) -> ExportDocument {
        ExportDocument {
            file_name: self.file_name(),
            content_type: CONTENT_TYPE.to_string(),
            body: self.render(timezone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_render_embeds_literal_amount() {
        let claim = ClaimDetails::collision_sample();
        let at = Utc.with_ymd_and_hms(2025, 1, 6, 15, 0, 0).unwrap();
        let ra = RepairAuthorization::new(&claim, &FinalEstimate::entered("3150"), at);

        let body = ra.render(&Timezone::default());
        assert_eq!(
            body,
            "Repair Authorization\n\
             Policy: POL-2024-8847392\n\
             Policyholder: Sarah Mitchell\n\
             Vehicle: 2022 Honda Accord\n\
             Approved Amount: $3150\n\
             Authorization Date: 1/6/2025\n"
        );
    }

    #[test]
    fn test_document_metadata() {
        let claim = ClaimDetails::collision_sample();
        let ra = RepairAuthorization::new(&claim, &FinalEstimate::entered("3150"), Utc::now());
        let doc = ra.to_document(&Timezone::default());

        assert_eq!(doc.file_name, "RA_POL-2024-8847392.pdf");
        assert_eq!(doc.content_type, "text/plain");
    }
}
