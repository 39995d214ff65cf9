//! # Sample Values
//!
//! The synthesized value tree. Diagnostic fallbacks are distinct variants,
//! not magic strings, so callers can tell a real string sample from a
//! placeholder. They render as strings only at serialization time.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Rendering of [`SampleValue::GenericString`].
pub const GENERIC_STRING_SAMPLE: &str = "string";

/// Rendering of [`SampleValue::UnknownEnum`].
pub const UNKNOWN_ENUM_MARKER: &str = "UNKNOWN_ENUM";

/// A canonical example value.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleValue {
    /// Boolean primitive sample (`false`).
    Bool(bool),
    /// Floating-point primitive sample (`1.0`).
    Float(f64),
    /// Integer primitive sample (`1`).
    Int(i64),
    /// The generic `"string"` sample of a character/string primitive.
    GenericString,
    /// A string derived from a member name.
    Text(String),
    /// The first enumerator of an enumeration.
    Enumerator(String),
    /// An enumeration with no enumerators.
    UnknownEnum,
    /// A reference that matched no declaration and no primitive keyword.
    /// Holds the original, unresolved reference.
    UnknownType(String),
    /// A struct reached again while it was still being expanded.
    RecursiveType(String),
    /// Fields in insertion order.
    Record(IndexMap<String, SampleValue>),
    /// A repeated value; always one element when synthesized.
    List(Vec<SampleValue>),
}

impl SampleValue {
    /// True for the diagnostic fallbacks.
    pub fn is_placeholder(&self) -> bool {
        matches!(
            self,
            SampleValue::UnknownEnum | SampleValue::UnknownType(_) | SampleValue::RecursiveType(_)
        )
    }

    /// Number of placeholders anywhere in this value, including inside
    /// records and lists.
    pub fn placeholder_count(&self) -> usize {
        match self {
            SampleValue::Record(fields) => fields.values().map(Self::placeholder_count).sum(),
            SampleValue::List(items) => items.iter().map(Self::placeholder_count).sum(),
            other => usize::from(other.is_placeholder()),
        }
    }

    /// The record fields, if this is a record.
    pub fn as_record(&self) -> Option<&IndexMap<String, SampleValue>> {
        match self {
            SampleValue::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Field lookup on a record.
    pub fn get(&self, field: &str) -> Option<&SampleValue> {
        self.as_record()?.get(field)
    }

    /// The rendered text of any string-valued variant.
    pub fn as_text(&self) -> Option<String> {
        match self {
            SampleValue::GenericString => Some(GENERIC_STRING_SAMPLE.to_string()),
            SampleValue::Text(s) | SampleValue::Enumerator(s) => Some(s.clone()),
            SampleValue::UnknownEnum => Some(UNKNOWN_ENUM_MARKER.to_string()),
            SampleValue::UnknownType(r) => Some(format!("UnknownType({r})")),
            SampleValue::RecursiveType(r) => Some(format!("RecursiveType({r})")),
            _ => None,
        }
    }

    /// Convert to a JSON value, keeping record field order.
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            SampleValue::Bool(b) => serde_json::Value::Bool(*b),
            SampleValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            SampleValue::Int(i) => serde_json::Value::from(*i),
            SampleValue::Record(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect(),
            ),
            SampleValue::List(items) => {
                serde_json::Value::Array(items.iter().map(SampleValue::to_json_value).collect())
            }
            other => serde_json::Value::String(other.as_text().unwrap_or_default()),
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for SampleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SampleValue::Bool(b) => serializer.serialize_bool(*b),
            SampleValue::Float(f) => serializer.serialize_f64(*f),
            SampleValue::Int(i) => serializer.serialize_i64(*i),
            SampleValue::Record(fields) => fields.serialize(serializer),
            SampleValue::List(items) => items.serialize(serializer),
            other => serializer.serialize_str(&other.as_text().unwrap_or_default()),
        }
    }
}
