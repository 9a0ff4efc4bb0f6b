//! Detected vehicle damage

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClaimError;

/// Four-level ordinal classification of damage extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Moderate,
    Major,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Minor,
        Severity::Moderate,
        Severity::Major,
        Severity::Severe,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Minor => "Minor",
            Severity::Moderate => "Moderate",
            Severity::Major => "Major",
            Severity::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClaimError::invalid_input("severity", s))
    }
}

/// Label given to damages the agent adds by hand
pub const NEW_DAMAGE_LABEL: &str = "New Damage";

/// One detected (or agent-added) damage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageAssessment {
    pub damage_type: String,
    pub severity: Severity,
    /// Inference confidence, 0-100
    pub confidence: u8,
    /// Set once the agent has touched this entry
    pub edited: bool,
}

impl DamageAssessment {
    /// An entry as produced by automated inference
    pub fn detected(damage_type: impl Into<String>, severity: Severity, confidence: u8) -> Self {
        Self {
            damage_type: damage_type.into(),
            severity,
            confidence: confidence.min(100),
            edited: false,
        }
    }

    /// A blank entry added by the agent
    pub fn agent_added() -> Self {
        Self {
            damage_type: NEW_DAMAGE_LABEL.to_string(),
            severity: Severity::Minor,
            confidence: 0,
            edited: true,
        }
    }

    /// Confidence to show; an edited entry no longer carries the model's figure
    pub fn displayed_confidence(&self) -> Option<u8> {
        if self.edited {
            None
        } else {
            Some(self.confidence)
        }
    }
}

/// Fixed result of the mocked vision model
pub fn seed_assessments() -> Vec<DamageAssessment> {
    vec![
        DamageAssessment::detected("Front Bumper Damage", Severity::Moderate, 94),
        DamageAssessment::detected("Hood Dent", Severity::Minor, 87),
        DamageAssessment::detected("Headlight Crack", Severity::Major, 96),
        DamageAssessment::detected("Paint Scratches", Severity::Minor, 91),
    ]
}
