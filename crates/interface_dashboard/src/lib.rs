//! Claims Dashboard Runtime
//!
//! This crate runs the claims agent dashboard on tokio.
//!
//! # Architecture
//!
//! - **Controller**: owns the dashboard state and runs its timers
//! - **Adapters**: filesystem and in-memory image stores and export sinks
//! - **Command / View**: the console shell's input parser and text output
//! - **Error Handling**: one error type wrapping domain, port and config errors
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_dashboard::{ClaimsDashboard, InMemoryExportSink, InMemoryImageStore};
//!
//! let dashboard = ClaimsDashboard::open(claim, settings, clock, images, documents)?;
//! dashboard.submit_for_approval().await?;
//! ```

pub mod adapters;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod view;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use adapters::{FileExportSink, InMemoryExportSink, InMemoryImageStore, LocalImageStore};
pub use command::Command;
pub use config::DashboardConfig;
pub use controller::ClaimsDashboard;
pub use error::DashboardError;

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` wins over `log_level`; anything unparseable falls back to `info`.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}
