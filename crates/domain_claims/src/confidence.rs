//! Overall confidence score of the automated assessment

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ClaimError;

/// Percentage in 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverallConfidence(u8);

impl OverallConfidence {
    /// Score reported by the model for the seeded assessment
    pub const INITIAL: OverallConfidence = OverallConfidence(92);

    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Lenient parse of agent input
    ///
    /// Reads an optional sign and the leading run of digits, ignoring whatever
    /// follows (`"85%"` is 85, `"12.7"` is 12). Input with no leading digits
    /// is 0. The result is clamped to 0..=100.
    pub fn parse_lenient(input: &str) -> Self {
        let trimmed = input.trim_start();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() || negative {
            return Self(0);
        }
        // Anything too long to fit is far above the ceiling anyway
        let value = digits.parse::<u64>().unwrap_or(u64::MAX);
        Self(value.min(100) as u8)
    }

    /// Strict parse: the whole input must be an integer in 0..=100
    pub fn parse_strict(input: &str) -> Result<Self, ClaimError> {
        input
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|v| *v <= 100)
            .map(Self)
            .ok_or_else(|| ClaimError::invalid_input("overall_confidence", input))
    }

    pub fn band(&self) -> ConfidenceBand {
        match self.0 {
            90..=100 => ConfidenceBand::High,
            75..=89 => ConfidenceBand::Moderate,
            _ => ConfidenceBand::Low,
        }
    }
}

impl Default for OverallConfidence {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for OverallConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Reliability band derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceBand {
    High,
    Moderate,
    Low,
}

impl ConfidenceBand {
    pub fn guidance(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "High confidence - assessment is reliable",
            ConfidenceBand::Moderate => "Moderate confidence - review recommended",
            ConfidenceBand::Low => "Low confidence - manual review required",
        }
    }
}
