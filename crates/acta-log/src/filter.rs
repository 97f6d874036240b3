//! Severity-filter configuration
//!
//! Provides [`FilterConfig`], the process-wide mapping from dotted-name
//! prefix to threshold directive, with additive merge and hierarchical
//! resolution: exact name, then each shorter dotted prefix, then the root
//! entry, then the built-in baseline.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use acta_path::SEPARATOR;

use crate::severity::Severity;

/// Key of the implicit root filter entry
///
/// The empty name can never be a Log's filter name (path validation rejects
/// it), so the root entry never collides with a genuine top-level namespace.
pub const ROOT_FILTER: &str = "";

/// Baseline threshold used when nothing at all is configured
pub const BASELINE: Severity = Severity::Info;

/// One configured filter entry
///
/// `Unset` is the explicit sentinel: it clears a previously configured
/// threshold for that exact name — the key stays visible in the
/// configuration — and forces fallback to an ancestor or the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterDirective {
    /// Gate at this severity
    Level(Severity),
    /// No threshold here; fall back to ancestor/baseline
    Unset,
}

/// Ordered map of filter entries
///
/// Mutated only through [`FilterConfig::merge`]: entries not named in an
/// update retain their value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    entries: IndexMap<String, FilterDirective>,
}

impl FilterConfig {
    /// Built-in defaults: root entry at INFO
    #[must_use]
    pub fn new() -> Self {
        let mut entries = IndexMap::new();
        entries.insert(ROOT_FILTER.to_string(), FilterDirective::Level(BASELINE));
        Self { entries }
    }

    /// Additively merge a partial map into the live configuration
    pub fn merge<I, K>(&mut self, partial: I)
    where
        I: IntoIterator<Item = (K, FilterDirective)>,
        K: Into<String>,
    {
        for (name, directive) in partial {
            self.entries.insert(name.into(), directive);
        }
    }

    /// Directive configured for an exact name, if any
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FilterDirective> {
        self.entries.get(name).copied()
    }

    /// Effective threshold for a dotted name
    ///
    /// Checks the exact name, then each successively shorter dotted prefix,
    /// then the root entry; the first non-`Unset` directive wins. Always
    /// terminates, at worst at the built-in baseline.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Severity {
        let mut candidate = name;
        loop {
            if let Some(FilterDirective::Level(level)) = self.entries.get(candidate).copied() {
                return level;
            }
            match candidate.rsplit_once(SEPARATOR) {
                Some((prefix, _)) => candidate = prefix,
                None => break,
            }
        }
        match self.entries.get(ROOT_FILTER).copied() {
            Some(FilterDirective::Level(level)) => level,
            _ => BASELINE,
        }
    }

    /// Configured entries in insertion order, `Unset` keys included
    pub fn entries(&self) -> impl Iterator<Item = (&str, FilterDirective)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_resolve_to_info_baseline() {
        let config = FilterConfig::new();
        assert_eq!(config.resolve("anything.at.all"), Severity::Info);
    }

    #[test]
    fn exact_name_wins() {
        let mut config = FilterConfig::new();
        config.merge([("slice.op", FilterDirective::Level(Severity::Error))]);
        assert_eq!(config.resolve("slice.op"), Severity::Error);
    }

    #[test]
    fn child_inherits_nearest_ancestor() {
        let mut config = FilterConfig::new();
        config.merge([("parent", FilterDirective::Level(Severity::Debug))]);

        assert_eq!(config.resolve("parent.child"), Severity::Debug);
        assert_eq!(config.resolve("parent.child.grandchild"), Severity::Debug);
        assert_eq!(config.resolve("other"), Severity::Info);
    }

    #[test]
    fn child_override_leaves_parent_untouched() {
        let mut config = FilterConfig::new();
        config.merge([("parent", FilterDirective::Level(Severity::Debug))]);
        config.merge([("parent.child", FilterDirective::Level(Severity::Error))]);

        assert_eq!(config.resolve("parent.child"), Severity::Error);
        assert_eq!(config.resolve("parent"), Severity::Debug);
        assert_eq!(config.resolve("parent.sibling"), Severity::Debug);
    }

    #[test]
    fn merge_is_additive() {
        let mut config = FilterConfig::new();
        config.merge([("a", FilterDirective::Level(Severity::Warn))]);
        config.merge([("b", FilterDirective::Level(Severity::Trace))]);

        assert_eq!(config.resolve("a"), Severity::Warn);
        assert_eq!(config.resolve("b"), Severity::Trace);
    }

    #[test]
    fn unset_clears_without_hiding_the_key() {
        let mut config = FilterConfig::new();
        config.merge([("parent", FilterDirective::Level(Severity::Debug))]);
        config.merge([("parent.child", FilterDirective::Level(Severity::Error))]);
        config.merge([("parent.child", FilterDirective::Unset)]);

        // Falls back to the ancestor, and the key stays visible.
        assert_eq!(config.resolve("parent.child"), Severity::Debug);
        assert_eq!(config.get("parent.child"), Some(FilterDirective::Unset));
    }

    #[test]
    fn unset_root_still_terminates_at_baseline() {
        let mut config = FilterConfig::new();
        config.merge([(ROOT_FILTER, FilterDirective::Unset)]);
        assert_eq!(config.resolve("deep.dotted.name"), Severity::Info);
    }

    #[test]
    fn root_entry_replaces_baseline() {
        let mut config = FilterConfig::new();
        config.merge([(ROOT_FILTER, FilterDirective::Level(Severity::Warn))]);
        assert_eq!(config.resolve("unconfigured"), Severity::Warn);
    }

    #[test]
    fn namespace_named_root_is_an_ordinary_entry() {
        let mut config = FilterConfig::new();
        config.merge([("root", FilterDirective::Level(Severity::Error))]);

        // Gates only the `root` namespace; the baseline entry is untouched.
        assert_eq!(config.resolve("root"), Severity::Error);
        assert_eq!(config.resolve("root.child"), Severity::Error);
        assert_eq!(config.resolve("other"), Severity::Info);
        assert_eq!(config.get(ROOT_FILTER), Some(FilterDirective::Level(Severity::Info)));
    }

    #[test]
    fn directive_serde_round_trip() {
        let level = FilterDirective::Level(Severity::Inspect);
        let json = serde_json::to_string(&level).unwrap();
        let back: FilterDirective = serde_json::from_str(&json).unwrap();
        assert_eq!(back, level);

        let unset_json = serde_json::to_string(&FilterDirective::Unset).unwrap();
        let back: FilterDirective = serde_json::from_str(&unset_json).unwrap();
        assert_eq!(back, FilterDirective::Unset);
    }
}
