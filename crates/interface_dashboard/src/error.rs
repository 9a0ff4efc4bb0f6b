//! Dashboard error handling

use core_kernel::{PortError, TemporalError};
use domain_claims::ClaimError;
use thiserror::Error;

/// Errors surfaced by the dashboard runtime
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Claim error: {0}")]
    Claim(#[from] ClaimError),

    #[error("Port error: {0}")]
    Port(#[from] PortError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl From<TemporalError> for DashboardError {
    fn from(err: TemporalError) -> Self {
        DashboardError::InvalidConfig(err.to_string())
    }
}

impl DashboardError {
    /// Returns true if retrying the same operation may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, DashboardError::Port(err) if err.is_transient())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_error_converts() {
        let err: DashboardError = ClaimError::DamageNotFound { index: 7, len: 4 }.into();
        assert!(matches!(err, DashboardError::Claim(_)));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_io_port_error_is_transient() {
        let err: DashboardError = PortError::io(
            "write failed",
            std::io::Error::new(std::io::ErrorKind::Other, "EIO"),
        )
        .into();
        assert!(err.is_transient());
    }
}
