//! Action records and their field values
//!
//! Provides [`Action`] (the record creators produce) and [`ActionValue`]
//! (the dynamic field values that flow through creator validation).

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use acta_path::ActionPath;

/// Placeholder text a callback renders as in serialized/diagnostic output
pub const CALLBACK_PLACEHOLDER: &str = "<callback>";

/// Shared callable carried inside an action
///
/// Callbacks are opaque to serialization; they render as
/// [`CALLBACK_PLACEHOLDER`] wherever a textual form is needed.
#[derive(Clone)]
pub struct ActionCallback(Arc<dyn Fn() + Send + Sync>);

impl ActionCallback {
    /// Wrap a closure
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Run the callback
    #[inline]
    pub fn run(&self) {
        (self.0)();
    }

    /// Pointer identity, used for value equality
    #[inline]
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for ActionCallback {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(CALLBACK_PLACEHOLDER)
    }
}

/// Dynamic field value inside an action record
///
/// `Absent` is the explicit absent-value marker: an omitted optional
/// parameter is recorded as `Absent` (serialized `null`) rather than left
/// out of the record.
#[derive(Debug, Clone)]
pub enum ActionValue {
    /// Plain text
    Text(String),
    /// Nested record of named values
    Record(IndexMap<String, ActionValue>),
    /// Opaque callable
    Callback(ActionCallback),
    /// Explicit absent-value marker
    Absent,
}

impl ActionValue {
    /// Text value
    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Record value from (name, value) pairs
    pub fn record<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, ActionValue)>,
        K: Into<String>,
    {
        Self::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Callback value from a closure
    pub fn callback(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self::Callback(ActionCallback::new(f))
    }

    /// True for the explicit absent marker
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Short name of the value's kind, for diagnostics
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Record(_) => "record",
            Self::Callback(_) => "callback",
            Self::Absent => "absent",
        }
    }

    /// Deterministic JSON rendering, used in validation diagnostics
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "<unrenderable>".to_string())
    }
}

impl Serialize for ActionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            Self::Callback(_) => serializer.serialize_str(CALLBACK_PLACEHOLDER),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

impl PartialEq for ActionValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Callback(a), Self::Callback(b)) => a.same_as(b),
            (Self::Absent, Self::Absent) => true,
            _ => false,
        }
    }
}

impl From<&str> for ActionValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ActionValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Structured action record
///
/// The boundary form handed to reducers and any serialization layer:
/// `{ "type": <dotted path>, <declared fields> }`. The `type` field is plain
/// text past this boundary; its dual-usage origin is invisible.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    kind: String,
    fields: IndexMap<String, ActionValue>,
}

impl Action {
    /// Build an action record
    #[must_use]
    pub fn new(kind: &ActionPath, fields: IndexMap<String, ActionValue>) -> Self {
        Self {
            kind: kind.canonical(),
            fields,
        }
    }

    /// Full dotted action type
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Declared field by name
    #[inline]
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ActionValue> {
        self.fields.get(name)
    }

    /// All declared fields in declaration order
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, ActionValue> {
        &self.fields
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("type", &self.kind)?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
