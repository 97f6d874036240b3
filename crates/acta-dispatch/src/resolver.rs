//! Action log resolution
//!
//! Provides [`action_log`]: map an action identifier — in any accepted
//! textual form — to the Log instance owning its leading namespace segment.

use acta_log::{Log, LogRegistry};
use acta_path::{ActionKey, SEPARATOR};

/// Resolve the Log that owns an action's leading segment
///
/// The identifier is normalized to canonical text first, so a bare `&str`,
/// an owned/boxed/shared string, an `ActionPath`, or a namespace node all
/// resolve identically when value-equal. The canonical text is split on the
/// first namespace separator and the leading segment looked up among the
/// registry's created Logs.
///
/// # Errors
/// [`LookupError::NoLogForNamespace`] when no Log was created under the
/// leading segment.
pub fn action_log(registry: &LogRegistry, key: impl ActionKey) -> Result<Log, LookupError> {
    let canonical = key.canonical_key();
    let canonical = canonical.as_ref();
    let leading = match canonical.split_once(SEPARATOR) {
        Some((head, _)) => head,
        None => canonical,
    };
    registry
        .existing(leading)
        .ok_or_else(|| LookupError::NoLogForNamespace {
            segment: leading.to_string(),
            action: canonical.to_string(),
        })
}

/// Action-to-log resolution failures
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LookupError {
    /// Leading segment has no registered Log
    #[error("no log registered for namespace '{segment}' (resolving '{action}')")]
    NoLogForNamespace {
        /// The leading segment that failed to resolve
        segment: String,
        /// The full identifier as received
        action: String,
    },
}
