//! Acta Log System
//!
//! Hierarchical, severity-gated diagnostic logging.
//!
//! # Overview
//!
//! The log system provides:
//! - **Severity**: seven ordered levels, `INSPECT` between `DEBUG` and
//!   `INFO` for state-change probes
//! - **FilterConfig**: dotted-prefix thresholds with additive merge and an
//!   explicit unset sentinel
//! - **LogRegistry / Log**: shared configuration injected into per-subsystem
//!   handles; every call resolves its threshold, gates, and only then
//!   renders its message
//!
//! # Example
//!
//! ```rust
//! use acta_log::{FilterDirective, LogRegistry, Severity};
//!
//! let registry = LogRegistry::new();
//! registry.configure([("store", FilterDirective::Level(Severity::Debug))]);
//!
//! let log = registry.log("store.session").unwrap();
//! log.debug(|| "rebuilt session cache".to_string());
//! ```

#![warn(missing_docs)]

pub mod filter;
pub mod registry;
pub mod severity;

// Re-exports
pub use filter::{FilterConfig, FilterDirective, BASELINE, ROOT_FILTER};
pub use registry::{FormatterFn, Log, LogError, LogRecord, LogRegistry, SinkFn};
pub use severity::{Severity, UnknownSeverity};

use once_cell::sync::Lazy;

static GLOBAL: Lazy<LogRegistry> = Lazy::new(LogRegistry::new);

/// Process-wide default registry
///
/// Explicit injection of a [`LogRegistry`] is the primary API; this accessor
/// exists for boundary ergonomics where threading one through is overkill.
#[must_use]
pub fn global() -> &'static LogRegistry {
    &GLOBAL
}

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for diagnostic logging
    pub use crate::{FilterDirective, Log, LogRegistry, Severity};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
