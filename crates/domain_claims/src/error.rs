//! Claims dashboard domain errors

use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur in the claims domain
///
/// Dashboard actions are total in normal use. These variants cover callers
/// that address a damage entry the ledger no longer holds, and the strict
/// parsers offered alongside the lenient ones.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("No damage entry at index {index} (ledger holds {len})")]
    DamageNotFound { index: usize, len: usize },

    #[error("Invalid input for {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl ClaimError {
    pub fn invalid_input(field: &'static str, value: impl Into<String>) -> Self {
        ClaimError::InvalidInput {
            field,
            value: value.into(),
        }
    }
}
