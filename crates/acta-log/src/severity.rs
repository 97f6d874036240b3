//! Severity levels
//!
//! Seven ordered levels. `Inspect` exists specifically for state-change
//! probes and ranks between `Debug` and `Info`.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Ordered diagnostic severity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Finest-grained flow tracing
    Trace,
    /// Developer diagnostics
    Debug,
    /// State-change probes
    Inspect,
    /// Normal operational messages
    Info,
    /// Suspicious but recoverable conditions
    Warn,
    /// Failures of an operation
    Error,
    /// Unrecoverable process-level failures
    Fatal,
}

impl Severity {
    /// All levels, lowest to highest
    pub const ALL: [Severity; 7] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Inspect,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Uppercase name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Inspect => "INSPECT",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INSPECT" => Ok(Self::Inspect),
            "INFO" => Ok(Self::Info),
            "WARN" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            "FATAL" => Ok(Self::Fatal),
            other => Err(UnknownSeverity(other.to_string())),
        }
    }
}

/// Unrecognized severity name
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown severity: {0}")]
pub struct UnknownSeverity(pub String);
