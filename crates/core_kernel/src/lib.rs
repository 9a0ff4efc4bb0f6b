//! Core Kernel - Foundational types for the claims dashboard
//!
//! This crate provides the building blocks shared by the domain and the
//! dashboard shell:
//! - Money types with precise decimal arithmetic
//! - Timezone-aware labels for timestamps
//! - Strongly-typed identifiers
//! - Ports for the clock, image storage and document export

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{Timezone, TemporalError};
pub use identifiers::{ClaimId, AuditEventId, ImageId};
pub use ports::{
    Clock, SystemClock, DomainPort, PortError,
    ImageStore, ImageUpload, ImageRef,
    DocumentSink, ExportDocument, ExportReceipt,
};
pub use error::CoreError;
