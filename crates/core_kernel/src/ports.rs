//! Ports for the capabilities the dashboard consumes but does not implement
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Dashboard controller                        │
//! │     (status lifecycle, damage ledger, scheduled tasks)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Port Traits                             │
//! │            Clock, ImageStore, DocumentSink                   │
//! └─────────────────────────────────────────────────────────────┘
//!                    ▲                         ▲
//!                    │                         │
//!         ┌─────────┴─────────┐     ┌────────┴────────┐
//!         │  Local adapters   │     │ In-memory        │
//!         │  (filesystem)     │     │ adapters (tests) │
//!         └───────────────────┘     └──────────────────┘
//! ```
//!
//! The clock is synchronous since reading it cannot fail. Image storage and
//! document export touch the outside world and are async.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifiers::ImageId;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Reading from or writing to the underlying medium failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The backing service is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a Validation error with field information
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Wraps an I/O failure
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        PortError::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Io { .. } | PortError::ServiceUnavailable { .. }
        )
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all ports
///
/// Ports are shared with spawned timer tasks, so they must be thread-safe.
pub trait DomainPort: Send + Sync + 'static {}

/// Source of the current instant
pub trait Clock: DomainPort {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl DomainPort for SystemClock {}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// An image handed over by the agent, before it has been stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Name the file had on the agent's machine
    pub file_name: String,
    /// Raw bytes, if the caller already read them
    pub bytes: Option<Vec<u8>>,
}

impl ImageUpload {
    /// An upload that refers to a file by name only
    pub fn from_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: None,
        }
    }

    /// An upload with its content already in memory
    pub fn with_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: Some(bytes),
        }
    }
}

/// A locally resolvable reference to a stored image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: ImageId,
    pub file_name: String,
    /// URI the display layer can resolve, e.g. `file:///...` or `memory://...`
    pub uri: String,
}

/// Stores uploaded images and hands back display references
#[async_trait]
pub trait ImageStore: DomainPort {
    async fn store(&self, upload: ImageUpload) -> Result<ImageRef, PortError>;
}

/// A rendered document ready for export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub file_name: String,
    pub content_type: String,
    pub body: String,
}

/// Where an exported document ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReceipt {
    pub location: String,
    pub bytes_written: usize,
}

/// Receives exported documents, e.g. a download directory
#[async_trait]
pub trait DocumentSink: DomainPort {
    async fn export(&self, document: ExportDocument) -> Result<ExportReceipt, PortError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_classification() {
        let io = PortError::io(
            "disk full",
            std::io::Error::new(std::io::ErrorKind::Other, "ENOSPC"),
        );
        assert!(io.is_transient());
        assert!(!io.is_not_found());

        let missing = PortError::not_found("image", "front.jpg");
        assert!(missing.is_not_found());
        assert!(!missing.is_transient());
        assert_eq!(missing.to_string(), "Not found: image with id front.jpg");
    }

    #[test]
    fn test_validation_field_is_recorded() {
        match PortError::validation_field("empty file name", "file_name") {
            PortError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("file_name")),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
