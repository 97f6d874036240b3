//! Declarative namespace specification
//!
//! Provides [`NamespaceSpec`], the write-once nested description the trees
//! are built from. The spec itself performs no validation; malformations
//! (duplicate paths, invalid segments) fail at build time.

use crate::creator::CreatorDef;

/// One entry of a namespace specification
#[derive(Debug, Clone)]
pub enum SpecEntry {
    /// Leaf: an action creator definition
    Creator(CreatorDef),
    /// Nested namespace
    Group(NamespaceSpec),
}

/// Declarative, order-preserving namespace description
///
/// Built once with [`NamespaceSpec::creator`] and [`NamespaceSpec::group`]
/// chains, then materialized with [`crate::build`].
#[derive(Debug, Clone, Default)]
pub struct NamespaceSpec {
    entries: Vec<(String, SpecEntry)>,
}

impl NamespaceSpec {
    /// Empty specification
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a leaf creator under `name`
    #[must_use]
    pub fn creator(mut self, name: impl Into<String>, def: CreatorDef) -> Self {
        self.entries.push((name.into(), SpecEntry::Creator(def)));
        self
    }

    /// Declare a nested namespace under `name`
    #[must_use]
    pub fn group(mut self, name: impl Into<String>, spec: NamespaceSpec) -> Self {
        self.entries.push((name.into(), SpecEntry::Group(spec)));
        self
    }

    /// Entries in declaration order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[(String, SpecEntry)] {
        &self.entries
    }

    /// True when no entries are declared
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_preserves_declaration_order() {
        let spec = NamespaceSpec::new()
            .creator("b", CreatorDef::text("msg"))
            .creator("a", CreatorDef::text("msg"));

        let names: Vec<_> = spec.entries().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn spec_can_declare_duplicates() {
        // Duplicates are representable; rejection happens at build time.
        let spec = NamespaceSpec::new()
            .creator("same", CreatorDef::text("msg"))
            .creator("same", CreatorDef::text("msg"));
        assert_eq!(spec.entries().len(), 2);
    }
}
