//! Validated action creators
//!
//! Provides [`CreatorDef`] (the declarative leaf definition) and
//! [`ActionCreator`] (the validated factory materialized from it). Creators
//! are pure: no side effects, and every failure carries deterministic,
//! substring-matchable text naming the creator's full dotted path and a JSON
//! rendering of the offending data.

use indexmap::IndexMap;

use acta_path::ActionPath;

use crate::value::{Action, ActionValue};

/// Declarative definition of one action creator
///
/// General shape: one required text parameter plus one optional structured
/// parameter whose sub-fields are each required when the structure is
/// supplied.
#[derive(Debug, Clone)]
pub struct CreatorDef {
    scalar: String,
    structured: Option<StructParam>,
}

#[derive(Debug, Clone)]
struct StructParam {
    name: String,
    fields: Vec<SubField>,
}

/// Required sub-field of the structured parameter
#[derive(Debug, Clone)]
pub struct SubField {
    name: String,
    kind: SubFieldKind,
}

/// Expected kind of a structured sub-field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubFieldKind {
    /// Plain text
    Text,
    /// Opaque callable
    Callback,
}

impl SubFieldKind {
    fn matches(self, value: &ActionValue) -> bool {
        match self {
            Self::Text => matches!(value, ActionValue::Text(_)),
            Self::Callback => matches!(value, ActionValue::Callback(_)),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Callback => "callback",
        }
    }
}

impl SubField {
    /// Required text sub-field
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SubFieldKind::Text,
        }
    }

    /// Required callback sub-field
    pub fn callback(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SubFieldKind::Callback,
        }
    }

    /// Sub-field name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl CreatorDef {
    /// Creator with one required text parameter
    pub fn text(scalar: impl Into<String>) -> Self {
        Self {
            scalar: scalar.into(),
            structured: None,
        }
    }

    /// Add the optional structured parameter with its required sub-fields
    #[must_use]
    pub fn with_record(
        mut self,
        name: impl Into<String>,
        fields: impl IntoIterator<Item = SubField>,
    ) -> Self {
        self.structured = Some(StructParam {
            name: name.into(),
            fields: fields.into_iter().collect(),
        });
        self
    }

    /// Name of the required text parameter
    #[inline]
    #[must_use]
    pub fn scalar_name(&self) -> &str {
        &self.scalar
    }
}

/// Validated factory for one action type
///
/// Materialized at namespace build time as the leaf payload of the creator
/// tree; `invoke` is the only runtime entry point.
#[derive(Debug, Clone)]
pub struct ActionCreator {
    path: ActionPath,
    canonical: String,
    def: CreatorDef,
}

impl ActionCreator {
    /// Bind a definition to its full dotted path
    #[must_use]
    pub fn new(path: ActionPath, def: CreatorDef) -> Self {
        Self {
            canonical: path.canonical(),
            path,
            def,
        }
    }

    /// Full dotted action type this creator produces
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.canonical
    }

    /// Path of this creator
    #[inline]
    #[must_use]
    pub fn path(&self) -> &ActionPath {
        &self.path
    }

    /// Produce the action record, validating both parameters
    ///
    /// The required parameter must be text. When the structured parameter is
    /// supplied, every declared sub-field is checked independently and in
    /// order; the diagnostic for a later field embeds the JSON form of the
    /// fields validated before it. An omitted structured parameter is
    /// recorded as the explicit absent marker.
    ///
    /// # Errors
    /// [`ValidationError`] with deterministic message text; this is a caller
    /// precondition failure, recoverable by the caller.
    pub fn invoke(
        &self,
        scalar: impl Into<ActionValue>,
        structured: Option<ActionValue>,
    ) -> Result<Action, ValidationError> {
        let scalar_text = match scalar.into() {
            ActionValue::Text(text) => text,
            other => {
                return Err(ValidationError::InvalidParam {
                    creator: self.canonical.clone(),
                    param: self.def.scalar.clone(),
                    got: other.to_json(),
                });
            }
        };

        let mut fields = IndexMap::new();
        fields.insert(self.def.scalar.clone(), ActionValue::Text(scalar_text));

        if let Some(param) = &self.def.structured {
            let value = match structured {
                Some(value) => self.validate_record(param, value)?,
                None => ActionValue::Absent,
            };
            fields.insert(param.name.clone(), value);
        }

        Ok(Action::new(&self.path, fields))
    }

    /// Check each declared sub-field against the supplied record, carrying
    /// the already-validated fields into every diagnostic.
    fn validate_record(
        &self,
        param: &StructParam,
        value: ActionValue,
    ) -> Result<ActionValue, ValidationError> {
        let supplied = match value {
            ActionValue::Record(fields) => fields,
            other => {
                return Err(ValidationError::NotARecord {
                    creator: self.canonical.clone(),
                    param: param.name.clone(),
                    got: other.to_json(),
                });
            }
        };

        let mut validated: IndexMap<String, ActionValue> = IndexMap::new();
        for sub in &param.fields {
            match supplied.get(&sub.name) {
                Some(v) if sub.kind.matches(v) => {
                    validated.insert(sub.name.clone(), v.clone());
                }
                other => {
                    return Err(ValidationError::InvalidField {
                        creator: self.canonical.clone(),
                        param: param.name.clone(),
                        field: sub.name.clone(),
                        expected: sub.kind.name(),
                        got: other.map_or_else(|| "null".to_string(), ActionValue::to_json),
                        partial: ActionValue::Record(validated).to_json(),
                    });
                }
            }
        }

        // Undeclared extra fields are ignored; validated fields only.
        Ok(ActionValue::Record(validated))
    }
}

/// Caller precondition failures raised by [`ActionCreator::invoke`]
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text parameter missing or mistyped
    #[error(
        "creator {creator}: required text parameter '{param}' is missing or not text, got {got}"
    )]
    InvalidParam {
        /// Full dotted path of the creator
        creator: String,
        /// Declared parameter name
        param: String,
        /// JSON rendering of the value actually received
        got: String,
    },

    /// Structured parameter supplied but not a record
    #[error("creator {creator}: parameter '{param}' must be a record, got {got}")]
    NotARecord {
        /// Full dotted path of the creator
        creator: String,
        /// Declared parameter name
        param: String,
        /// JSON rendering of the value actually received
        got: String,
    },

    /// Required sub-field missing or mistyped
    #[error(
        "creator {creator}: field '{field}' of '{param}' is missing or invalid \
         (expected {expected}, got {got}), validated so far: {partial}"
    )]
    InvalidField {
        /// Full dotted path of the creator
        creator: String,
        /// Structured parameter name
        param: String,
        /// The specific failing sub-field
        field: String,
        /// Expected sub-field kind
        expected: &'static str,
        /// JSON rendering of the value actually received
        got: String,
        /// JSON rendering of the fields validated before this one
        partial: String,
    },
}
