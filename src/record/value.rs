//! Field values

use serde::ser::{Serialize, Serializer};
use serde_json::Number;

use super::record::RecordSet;

/// Value of a single record field
///
/// A field is either a scalar or one or more child result groups
/// (a relationship sub-query result).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    /// Child relationship results; usually a single group
    Children(Vec<RecordSet>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// A single child result group
    pub fn children(set: RecordSet) -> Self {
        FieldValue::Children(vec![set])
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, FieldValue::Children(_))
    }

    /// Child groups, if this is a relationship value
    pub fn as_children(&self) -> Option<&[RecordSet]> {
        match self {
            FieldValue::Children(groups) => Some(groups),
            _ => None,
        }
    }

    /// Textual form of a scalar; `None` for child results.
    ///
    /// Null renders as the empty string.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => Some(String::new()),
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Children(_) => None,
        }
    }

    /// Short human-readable form, used where a nested grid cannot be shown
    pub fn summary_text(&self) -> String {
        match self {
            FieldValue::Children(groups) => {
                let rows: usize = groups.iter().map(RecordSet::len).sum();
                format!("[{} row{}]", rows, if rows == 1 { "" } else { "s" })
            }
            scalar => scalar.scalar_text().unwrap_or_default(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(Number::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<RecordSet> for FieldValue {
    fn from(set: RecordSet) -> Self {
        FieldValue::children(set)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Number(n) => n.serialize(serializer),
            FieldValue::Text(s) => serializer.serialize_str(s),
            // One group serializes as its records; several as a list of groups
            FieldValue::Children(groups) if groups.len() == 1 => groups[0].serialize(serializer),
            FieldValue::Children(groups) => groups.serialize(serializer),
        }
    }
}
