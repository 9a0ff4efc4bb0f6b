//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims dashboard test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for the sample claim
//! - `builders`: Builder for dashboard states with non-default settings
//! - `clock`: A manually advanced clock
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod clock;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use clock::*;
pub use assertions::*;
pub use generators::*;
