//! # Primitive Classification
//!
//! A resolved type name that is neither an enumeration nor a struct is
//! classified by case-insensitive substring matching against ordered
//! keyword groups. The first matching group wins, so `boolean_int` is a
//! boolean and `long double` is a float.

use crate::value::SampleValue;

/// Primitive families recognized by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `boolean`, `bool`.
    Boolean,
    /// `float`, `double`.
    Float,
    /// `int`, `long`, `short`, `byte`.
    Integer,
    /// `char`, `string`.
    Text,
}

/// Keyword groups in application order.
const KEYWORD_GROUPS: &[(Primitive, &[&str])] = &[
    (Primitive::Boolean, &["boolean", "bool"]),
    (Primitive::Float, &["float", "double"]),
    (Primitive::Integer, &["int", "long", "short", "byte"]),
    (Primitive::Text, &["char", "string"]),
];

/// Classify a resolved type name, or `None` if no keyword matches.
pub fn classify_primitive(type_name: &str) -> Option<Primitive> {
    let lower = type_name.to_lowercase();
    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(primitive, _)| *primitive)
}

impl Primitive {
    /// The canonical sample for this family.
    pub fn sample(self) -> SampleValue {
        match self {
            Primitive::Boolean => SampleValue::Bool(false),
            Primitive::Float => SampleValue::Float(1.0),
            Primitive::Integer => SampleValue::Int(1),
            Primitive::Text => SampleValue::GenericString,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dds_basic_types() {
        assert_eq!(classify_primitive("boolean"), Some(Primitive::Boolean));
        assert_eq!(classify_primitive("float32"), Some(Primitive::Float));
        assert_eq!(classify_primitive("float64"), Some(Primitive::Float));
        assert_eq!(classify_primitive("int32"), Some(Primitive::Integer));
        assert_eq!(classify_primitive("uint64"), Some(Primitive::Integer));
        assert_eq!(classify_primitive("unsigned long long"), Some(Primitive::Integer));
        assert_eq!(classify_primitive("byte"), Some(Primitive::Integer));
        assert_eq!(classify_primitive("char8"), Some(Primitive::Text));
        assert_eq!(classify_primitive("wstring"), Some(Primitive::Text));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify_primitive("BOOL"), Some(Primitive::Boolean));
        assert_eq!(classify_primitive("Double"), Some(Primitive::Float));
        assert_eq!(classify_primitive("String"), Some(Primitive::Text));
    }

    #[test]
    fn first_group_wins() {
        assert_eq!(classify_primitive("boolean_int"), Some(Primitive::Boolean));
        assert_eq!(classify_primitive("long double"), Some(Primitive::Float));
        assert_eq!(classify_primitive("int_string"), Some(Primitive::Integer));
        // "point" contains "int".
        assert_eq!(classify_primitive("Point"), Some(Primitive::Integer));
    }

    #[test]
    fn unknown_names() {
        assert_eq!(classify_primitive("Bogus_Type"), None);
        assert_eq!(classify_primitive(""), None);
        assert_eq!(classify_primitive("nonBasic"), None);
    }

    #[test]
    fn samples() {
        assert_eq!(Primitive::Boolean.sample(), SampleValue::Bool(false));
        assert_eq!(Primitive::Float.sample(), SampleValue::Float(1.0));
        assert_eq!(Primitive::Integer.sample(), SampleValue::Int(1));
        assert_eq!(Primitive::Text.sample(), SampleValue::GenericString);
    }
}
