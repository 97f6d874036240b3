//! Log registry and log instances
//!
//! Provides [`LogRegistry`] — the shared severity-filter configuration,
//! formatter, sink, and Log factory — and [`Log`], the per-subsystem handle.
//! Every emission follows the same state machine: resolve threshold → gate →
//! lazily render → emit or drop. A suppressed message is never constructed.

use parking_lot::RwLock;
use std::fmt::{self, Debug, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use acta_path::{ActionPath, PathError};

use crate::filter::{FilterConfig, FilterDirective};
use crate::severity::Severity;

/// One diagnostic record handed to the formatter
#[derive(Debug)]
pub struct LogRecord<'a> {
    /// Filter name of the emitting log
    pub name: &'a str,
    /// Severity of this call
    pub severity: Severity,
    /// Rendered message text
    pub message: &'a str,
    /// Optional structured payload
    pub payload: Option<&'a Value>,
}

/// Pluggable line formatter
pub type FormatterFn = Box<dyn Fn(&LogRecord<'_>) -> String + Send + Sync>;

/// Pluggable output sink, receiving fully formatted lines
pub type SinkFn = Box<dyn Fn(&str) + Send + Sync>;

fn default_formatter() -> FormatterFn {
    Box::new(|record| match record.payload {
        Some(payload) => format!(
            "[{}] {}: {} {}",
            record.severity, record.name, record.message, payload
        ),
        None => format!("[{}] {}: {}", record.severity, record.name, record.message),
    })
}

fn default_sink() -> SinkFn {
    // Standard diagnostic stream.
    Box::new(|line| eprintln!("{line}"))
}

struct RegistryInner {
    filters: RwLock<FilterConfig>,
    formatter: RwLock<FormatterFn>,
    sink: RwLock<SinkFn>,
    names: RwLock<IndexMap<String, Arc<str>>>,
}

/// Process-wide severity-filter configuration and Log factory
///
/// The configuration is injected into each [`Log`] at construction (clones
/// share one inner state); a change made through [`LogRegistry::configure`]
/// takes effect for every subsequently evaluated call.
#[derive(Clone)]
pub struct LogRegistry {
    inner: Arc<RegistryInner>,
}

impl LogRegistry {
    /// Registry with built-in defaults: root threshold INFO, plain-text
    /// formatter, standard diagnostic stream sink
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                filters: RwLock::new(FilterConfig::new()),
                formatter: RwLock::new(default_formatter()),
                sink: RwLock::new(default_sink()),
                names: RwLock::new(IndexMap::new()),
            }),
        }
    }

    /// Create (or fetch) the Log bound to `name`
    ///
    /// The same name always yields the same logical instance: Logs compare
    /// equal when they share a name and a registry.
    ///
    /// # Errors
    /// [`LogError::InvalidFilterName`] when `name` is empty or not a valid
    /// dotted name — the only user-facing construction error here, fatal at
    /// startup.
    pub fn log(&self, name: &str) -> Result<Log, LogError> {
        name.parse::<ActionPath>()
            .map_err(|reason| LogError::InvalidFilterName {
                name: name.to_string(),
                reason,
            })?;

        let shared = {
            let mut names = self.inner.names.write();
            Arc::clone(
                names
                    .entry(name.to_string())
                    .or_insert_with(|| Arc::from(name)),
            )
        };
        Ok(Log {
            name: shared,
            inner: Arc::clone(&self.inner),
        })
    }

    /// Previously created Log for `name`, without creating one
    #[must_use]
    pub fn existing(&self, name: &str) -> Option<Log> {
        let names = self.inner.names.read();
        names.get(name).map(|shared| Log {
            name: Arc::clone(shared),
            inner: Arc::clone(&self.inner),
        })
    }

    /// Additively merge filter entries into the live configuration
    ///
    /// Entries not named in `partial` keep their value; a
    /// [`FilterDirective::Unset`] entry clears the threshold for that exact
    /// name without hiding the key.
    pub fn configure<I, K>(&self, partial: I)
    where
        I: IntoIterator<Item = (K, FilterDirective)>,
        K: Into<String>,
    {
        self.inner.filters.write().merge(partial);
    }

    /// Replace the line formatter
    pub fn set_formatter(&self, formatter: impl Fn(&LogRecord<'_>) -> String + Send + Sync + 'static) {
        *self.inner.formatter.write() = Box::new(formatter);
    }

    /// Replace the output sink
    pub fn set_sink(&self, sink: impl Fn(&str) + Send + Sync + 'static) {
        *self.inner.sink.write() = Box::new(sink);
    }

    /// Effective threshold the configuration currently resolves for a name
    #[must_use]
    pub fn threshold(&self, name: &str) -> Severity {
        self.inner.filters.read().resolve(name)
    }

    /// Snapshot of the current filter entries
    #[must_use]
    pub fn filters(&self) -> FilterConfig {
        self.inner.filters.read().clone()
    }
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for LogRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRegistry")
            .field("filters", &*self.inner.filters.read())
            .finish_non_exhaustive()
    }
}

/// Handle bound to one filter name
///
/// Stateless beyond its name and the shared registry state. Cheap to clone;
/// clones of the same name are the same logical instance.
#[derive(Clone)]
pub struct Log {
    name: Arc<str>,
    inner: Arc<RegistryInner>,
}

impl Log {
    /// Filter name this Log is bound to
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a call at `severity` would currently emit
    #[must_use]
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.inner.filters.read().resolve(&self.name)
    }

    /// Resolve → gate → lazily render → emit or drop
    ///
    /// `produce` runs at most once, and only when gating permits emission;
    /// a suppressed call never constructs its message. Formatter or sink
    /// panics are caught and discarded — emission can never propagate
    /// failure to the caller.
    pub fn emit_with<F: FnOnce() -> String>(
        &self,
        severity: Severity,
        produce: F,
        payload: Option<&Value>,
    ) {
        if !self.enabled(severity) {
            return;
        }
        let message = produce();
        let _ = catch_unwind(AssertUnwindSafe(|| {
            let record = LogRecord {
                name: &self.name,
                severity,
                message: &message,
                payload,
            };
            let line = (self.inner.formatter.read())(&record);
            (self.inner.sink.read())(&line);
        }));
    }

    /// Emit without payload
    #[inline]
    pub fn emit<F: FnOnce() -> String>(&self, severity: Severity, produce: F) {
        self.emit_with(severity, produce, None);
    }

    /// Emit at TRACE
    #[inline]
    pub fn trace<F: FnOnce() -> String>(&self, produce: F) {
        self.emit(Severity::Trace, produce);
    }

    /// Emit at DEBUG
    #[inline]
    pub fn debug<F: FnOnce() -> String>(&self, produce: F) {
        self.emit(Severity::Debug, produce);
    }

    /// Emit at INSPECT
    #[inline]
    pub fn inspect<F: FnOnce() -> String>(&self, produce: F) {
        self.emit(Severity::Inspect, produce);
    }

    /// Emit at INFO
    #[inline]
    pub fn info<F: FnOnce() -> String>(&self, produce: F) {
        self.emit(Severity::Info, produce);
    }

    /// Emit at WARN
    #[inline]
    pub fn warn<F: FnOnce() -> String>(&self, produce: F) {
        self.emit(Severity::Warn, produce);
    }

    /// Emit at ERROR
    #[inline]
    pub fn error<F: FnOnce() -> String>(&self, produce: F) {
        self.emit(Severity::Error, produce);
    }

    /// Emit at FATAL
    #[inline]
    pub fn fatal<F: FnOnce() -> String>(&self, produce: F) {
        self.emit(Severity::Fatal, produce);
    }

    /// Emit at TRACE with a structured payload
    #[inline]
    pub fn trace_with<F: FnOnce() -> String>(&self, produce: F, payload: Option<&Value>) {
        self.emit_with(Severity::Trace, produce, payload);
    }

    /// Emit at DEBUG with a structured payload
    #[inline]
    pub fn debug_with<F: FnOnce() -> String>(&self, produce: F, payload: Option<&Value>) {
        self.emit_with(Severity::Debug, produce, payload);
    }

    /// Emit at INSPECT with a structured payload
    #[inline]
    pub fn inspect_with<F: FnOnce() -> String>(&self, produce: F, payload: Option<&Value>) {
        self.emit_with(Severity::Inspect, produce, payload);
    }

    /// Emit at INFO with a structured payload
    #[inline]
    pub fn info_with<F: FnOnce() -> String>(&self, produce: F, payload: Option<&Value>) {
        self.emit_with(Severity::Info, produce, payload);
    }

    /// Emit at WARN with a structured payload
    #[inline]
    pub fn warn_with<F: FnOnce() -> String>(&self, produce: F, payload: Option<&Value>) {
        self.emit_with(Severity::Warn, produce, payload);
    }

    /// Emit at ERROR with a structured payload
    #[inline]
    pub fn error_with<F: FnOnce() -> String>(&self, produce: F, payload: Option<&Value>) {
        self.emit_with(Severity::Error, produce, payload);
    }

    /// Emit at FATAL with a structured payload
    #[inline]
    pub fn fatal_with<F: FnOnce() -> String>(&self, produce: F, payload: Option<&Value>) {
        self.emit_with(Severity::Fatal, produce, payload);
    }
}

impl PartialEq for Log {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Debug for Log {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Log").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Log construction failures
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Filter name empty or malformed
    #[error("invalid log filter name '{name}': {reason}")]
    InvalidFilterName {
        /// The rejected name
        name: String,
        /// Why path validation rejected it
        reason: PathError,
    },
}
