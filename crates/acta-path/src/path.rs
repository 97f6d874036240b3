//! Dotted action paths
//!
//! Provides [`ActionPath`] for hierarchical addressing of actions and logs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::SEPARATOR;

/// Hierarchical action identifier
///
/// A validated sequence of segments whose canonical form joins them with `.`.
/// The same path addresses an action type, a namespace node, and the log
/// filter name that owns it.
///
/// # Examples
/// - `["userMsg", "display"]` → `userMsg.display`
/// - `["calendar", "term", "select"]` → `calendar.term.select`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionPath(Vec<String>);

impl ActionPath {
    /// Create a path from pre-validated segments
    ///
    /// # Errors
    /// Returns an error if any segment is empty or contains characters
    /// outside alphanumerics and underscore.
    pub fn new(segments: Vec<String>) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        for seg in &segments {
            validate_segment(seg)?;
        }
        Ok(Self(segments))
    }

    /// Create a single-segment path
    ///
    /// # Errors
    /// Returns an error if the segment is invalid.
    pub fn single(segment: impl Into<String>) -> Result<Self, PathError> {
        Self::new(vec![segment.into()])
    }

    /// Path segments, root to leaf
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Paths are never empty; present for container-API symmetry
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Leading (outermost) segment
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(|s| s.as_str())
    }

    /// Final (leaf) segment
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(|s| s.as_str())
    }

    /// Parent path, if this path has more than one segment
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.len() <= 1 {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Append a segment, returning the child path
    ///
    /// # Errors
    /// Returns an error if the segment is invalid.
    pub fn child(&self, segment: impl Into<String>) -> Result<Self, PathError> {
        let segment = segment.into();
        validate_segment(&segment)?;
        let mut new = self.0.clone();
        new.push(segment);
        Ok(Self(new))
    }

    /// Check if this path is a prefix of another
    ///
    /// # Examples
    /// - `userMsg` is prefix of `userMsg.display`
    /// - `userMsg` is NOT prefix of `calendar.term`
    #[inline]
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        if self.0.len() > other.0.len() {
            return false;
        }
        self.0 == other.0[..self.0.len()]
    }

    /// Check if this path is an ancestor of another (strict prefix)
    #[inline]
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.0.len() < other.0.len() && self.is_prefix_of(other)
    }

    /// Iterator over segments from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }

    /// Canonical dotted form
    #[inline]
    #[must_use]
    pub fn canonical(&self) -> String {
        self.0.join(".")
    }
}

fn validate_segment(segment: &str) -> Result<(), PathError> {
    if segment.is_empty() {
        return Err(PathError::EmptySegment);
    }
    if segment
        .contains(|c: char| !c.is_alphanumeric() && c != '_')
    {
        return Err(PathError::InvalidSegment(segment.to_string()));
    }
    Ok(())
}

impl Display for ActionPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for ActionPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }
        let segments: Vec<String> = s
            .split(SEPARATOR)
            .map(|seg| validate_segment(seg).map(|()| seg.to_string()))
            .collect::<Result<_, _>>()?;
        Ok(Self(segments))
    }
}

impl Serialize for ActionPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ActionPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors related to action paths
///
/// All of these are construction-time defects: a malformed path should fail
/// process initialization, never surface as a runtime condition.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    /// Path has no segments at all
    #[error("action path cannot be empty")]
    Empty,

    /// Empty segment in path
    #[error("action path contains empty segment")]
    EmptySegment,

    /// Invalid segment characters
    #[error("invalid segment: {0} (must be alphanumeric or underscore)")]
    InvalidSegment(String),
}
