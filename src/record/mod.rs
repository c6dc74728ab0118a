//! Case-insensitive container for exported Zotero records.
//!
//! Better BibTeX's `jzon` export yields one JSON object per item, with
//! mixed-case field names (`citationKey`, `accessDate`, ...). Users name
//! fields in any case, so a [`Record`] stores every field under a canonical
//! key (lower case, with `citekey` folded into `citationkey`) and performs
//! all lookups through the same canonicalization. The first spelling seen
//! for a field is kept for display only.

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Field name and value used for identifiers that could not be resolved.
pub const PLACEHOLDER_FIELD: &str = "Unknown";

/// Canonical name of the citation key field.
pub const CITATION_KEY_FIELD: &str = "citationkey";

const CITATION_KEY_ALIASES: [&str; 2] = ["citationkey", "citekey"];

/// Returns the canonical form of a field name.
#[must_use]
pub fn canonical_field_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    if is_citation_key_alias(&lowered) {
        CITATION_KEY_FIELD.to_string()
    } else {
        lowered
    }
}

/// Returns true if `name` refers to the citation key field, in any case.
#[must_use]
pub fn is_citation_key_alias(name: &str) -> bool {
    let lowered = name.trim().to_lowercase();
    CITATION_KEY_ALIASES.contains(&lowered.as_str())
}

/// A field value from an exported record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// String, number, boolean or null, already rendered as text
    Scalar(String),
    /// Ordered sequence, usually of nested records (creators, tags, notes)
    List(Vec<FieldValue>),
    /// Nested record
    Record(Record),
}

impl FieldValue {
    /// Converts a decoded JSON value.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Scalar(text),
            Value::Number(number) => Self::Scalar(number.to_string()),
            Value::Bool(flag) => Self::Scalar(flag.to_string()),
            Value::Null => Self::Scalar(String::new()),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Record(Record::from(map)),
        }
    }

    /// Returns the scalar text, if this is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text),
            Self::List(_) | Self::Record(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    /// Single-line rendering: lists joined by `; `, records as `name: value` pairs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(text) => f.write_str(text),
            Self::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Record(record) => write!(f, "{record}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Field {
    name: String,
    value: FieldValue,
}

/// An exported record keyed by case-insensitive field name.
///
/// Field order follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Field>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the `{"Unknown": "Unknown"}` record used for unresolved identifiers.
    #[must_use]
    pub fn placeholder() -> Self {
        let mut record = Self::new();
        record.insert(
            PLACEHOLDER_FIELD,
            FieldValue::Scalar(PLACEHOLDER_FIELD.to_string()),
        );
        record
    }

    /// Converts a decoded JSON value; returns `None` unless it is an object.
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::from(map)),
            _ => None,
        }
    }

    /// Inserts a field. A later insert under an equivalent name replaces the
    /// value but keeps the first spelling.
    pub fn insert(&mut self, name: &str, value: FieldValue) {
        let key = canonical_field_name(name);
        match self.fields.get_mut(&key) {
            Some(field) => field.value = value,
            None => {
                self.fields.insert(
                    key,
                    Field {
                        name: name.to_string(),
                        value,
                    },
                );
            }
        }
    }

    /// Looks up a field by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .get(&canonical_field_name(name))
            .map(|field| &field.value)
    }

    /// Returns true if the record has a field with this name, ignoring case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&canonical_field_name(name))
    }

    /// Returns the citation key, if the record carries one.
    #[must_use]
    pub fn citation_key(&self) -> Option<&str> {
        self.get(CITATION_KEY_FIELD).and_then(FieldValue::as_scalar)
    }

    /// Iterates over field display names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.values().map(|field| field.name.as_str())
    }

    /// Iterates over `(display name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields
            .values()
            .map(|field| (field.name.as_str(), &field.value))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true for the record produced by [`Record::placeholder`].
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.len() == 1
            && self.get(PLACEHOLDER_FIELD).and_then(FieldValue::as_scalar) == Some(PLACEHOLDER_FIELD)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        let mut record = Self::new();
        for (name, value) in map {
            record.insert(&name, FieldValue::from_json(value));
        }
        record
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}
