//! Identifier normalization
//!
//! Provides [`ActionKey`] so lookups accept any textual identifier form —
//! borrowed, owned, boxed, shared, or an [`ActionPath`] — and see only
//! canonical text. Value-equal inputs always normalize to equal keys.

use std::borrow::Cow;
use std::sync::Arc;

use crate::ActionPath;

/// Anything that names an action or namespace node
///
/// Implementations normalize to the canonical dotted text at the boundary;
/// downstream lookup code never special-cases wrapper types.
pub trait ActionKey {
    /// Canonical dotted identifier text
    fn canonical_key(&self) -> Cow<'_, str>;
}

impl ActionKey for str {
    fn canonical_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl ActionKey for String {
    fn canonical_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl ActionKey for Box<str> {
    fn canonical_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl ActionKey for Arc<str> {
    fn canonical_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl ActionKey for Cow<'_, str> {
    fn canonical_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_ref())
    }
}

impl ActionKey for ActionPath {
    fn canonical_key(&self) -> Cow<'_, str> {
        Cow::Owned(self.canonical())
    }
}

impl<K: ActionKey + ?Sized> ActionKey for &K {
    fn canonical_key(&self) -> Cow<'_, str> {
        (**self).canonical_key()
    }
}
