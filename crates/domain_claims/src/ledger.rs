//! Damage assessment ledger
//!
//! Owns the damage list and keeps the derived cost estimate in step with it.
//! Every mutating method recalculates before returning, so `estimate()` is
//! always the table sum over `damages()`.

use serde::{Deserialize, Serialize};

use crate::damage::{seed_assessments, DamageAssessment, Severity};
use crate::error::ClaimError;
use crate::estimate::{recalculate_cost, CostEstimate, SeverityCostTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageLedger {
    damages: Vec<DamageAssessment>,
    estimate: CostEstimate,
    table: SeverityCostTable,
}

impl DamageLedger {
    pub fn new(table: SeverityCostTable, damages: Vec<DamageAssessment>) -> Result<Self, ClaimError> {
        let estimate = recalculate_cost(&table, &damages)?;
        Ok(Self {
            damages,
            estimate,
            table,
        })
    }

    /// Ledger holding the mocked model output
    pub fn seeded(table: SeverityCostTable) -> Result<Self, ClaimError> {
        Self::new(table, seed_assessments())
    }

    pub fn damages(&self) -> &[DamageAssessment] {
        &self.damages
    }

    pub fn estimate(&self) -> CostEstimate {
        self.estimate
    }

    pub fn table(&self) -> &SeverityCostTable {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.damages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.damages.is_empty()
    }

    /// Replaces the whole list with the model output
    pub fn reseed(&mut self) -> Result<CostEstimate, ClaimError> {
        self.damages = seed_assessments();
        self.recalculate()
    }

    /// Sets the severity of one entry and marks it edited
    pub fn update_severity(
        &mut self,
        index: usize,
        severity: Severity,
    ) -> Result<&DamageAssessment, ClaimError> {
        let entry = self.entry_mut(index)?;
        entry.severity = severity;
        entry.edited = true;
        self.recalculate()?;
        Ok(&self.damages[index])
    }

    /// Sets the type label of one entry and marks it edited
    pub fn update_type(
        &mut self,
        index: usize,
        damage_type: impl Into<String>,
    ) -> Result<&DamageAssessment, ClaimError> {
        let entry = self.entry_mut(index)?;
        entry.damage_type = damage_type.into();
        entry.edited = true;
        self.recalculate()?;
        Ok(&self.damages[index])
    }

    /// Removes one entry and returns it
    pub fn remove(&mut self, index: usize) -> Result<DamageAssessment, ClaimError> {
        if index >= self.damages.len() {
            return Err(self.not_found(index));
        }
        let removed = self.damages.remove(index);
        self.recalculate()?;
        Ok(removed)
    }

    /// Appends a blank agent-added entry
    pub fn add(&mut self) -> Result<&DamageAssessment, ClaimError> {
        self.damages.push(DamageAssessment::agent_added());
        self.recalculate()?;
        let last = self.damages.len() - 1;
        Ok(&self.damages[last])
    }

    fn recalculate(&mut self) -> Result<CostEstimate, ClaimError> {
        self.estimate = recalculate_cost(&self.table, &self.damages)?;
        tracing::debug!(
            damages = self.damages.len(),
            estimate = %self.estimate.display_range(),
            "cost estimate recalculated"
        );
        Ok(self.estimate)
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut DamageAssessment, ClaimError> {
        let len = self.damages.len();
        self.damages
            .get_mut(index)
            .ok_or(ClaimError::DamageNotFound { index, len })
    }

    fn not_found(&self, index: usize) -> ClaimError {
        ClaimError::DamageNotFound {
            index,
            len: self.damages.len(),
        }
    }
}
