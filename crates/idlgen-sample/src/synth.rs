//! # Sample Synthesis
//!
//! Resolution order for a type reference, first match wins:
//!
//! 1. Repeated → a one-element list of the scalar sample.
//! 2. Resolve typedefs through the registry.
//! 3. Enumeration → its first enumerator, or the unknown-enum marker.
//! 4. Struct → a record: base fields, then own members in order.
//! 5. Primitive keyword → the family's canonical literal.
//! 6. Otherwise → `UnknownType(<original reference>)`.
//!
//! ## Member Labels
//!
//! A member whose sample is the generic `"string"` literal gets its own
//! name instead, minus a leading `A_`, so `A_VehicleId: string` samples as
//! `"VehicleId"`. Enumerators are never relabelled, even if one happens to
//! be spelled `string`.

use indexmap::IndexMap;

use idlgen_core::StructDecl;
use idlgen_registry::TypeRegistry;

use crate::primitive::classify_primitive;
use crate::value::SampleValue;

/// Member-name prefix dropped when labelling string samples.
const MEMBER_LABEL_PREFIX: &str = "A_";

/// Synthesizes sample values against a loaded registry.
#[derive(Debug, Clone, Copy)]
pub struct SampleGenerator<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> SampleGenerator<'r> {
    /// Create a generator that reads from `registry`.
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Generate the canonical sample for `type_ref`.
    ///
    /// With `repeated`, the result is a one-element list whose element is
    /// the scalar sample of the same reference.
    pub fn generate_sample(&self, type_ref: &str, repeated: bool) -> SampleValue {
        let mut expanding = Vec::new();
        self.generate(type_ref, repeated, &mut expanding)
    }

    fn generate(&self, type_ref: &str, repeated: bool, expanding: &mut Vec<String>) -> SampleValue {
        if repeated {
            return SampleValue::List(vec![self.generate(type_ref, false, expanding)]);
        }

        let resolved = match self.registry.try_resolve_type(type_ref) {
            Ok(resolved) => resolved,
            Err(err) => {
                tracing::warn!(type_ref, %err, "typedef cycle; emitting placeholder");
                return SampleValue::UnknownType(type_ref.to_string());
            }
        };

        if let Some(enumerators) = self.registry.lookup_enum(&resolved) {
            return match enumerators.first() {
                Some(first) => SampleValue::Enumerator(first.clone()),
                None => SampleValue::UnknownEnum,
            };
        }

        if let Some(decl) = self.registry.lookup_struct(&resolved) {
            if expanding.iter().any(|name| name == &decl.name) {
                tracing::debug!(type_ref, name = %decl.name, "recursive struct reference");
                return SampleValue::RecursiveType(type_ref.to_string());
            }
            expanding.push(decl.name.clone());
            let record = self.generate_record(decl, expanding);
            expanding.pop();
            return record;
        }

        match classify_primitive(&resolved) {
            Some(primitive) => primitive.sample(),
            None => {
                tracing::debug!(type_ref, resolved = %resolved, "unresolvable type reference");
                SampleValue::UnknownType(type_ref.to_string())
            }
        }
    }

    fn generate_record(&self, decl: &StructDecl, expanding: &mut Vec<String>) -> SampleValue {
        let mut fields = IndexMap::new();

        if let Some(base) = decl.base_type.as_deref().filter(|b| !b.is_empty()) {
            match self.generate(base, false, expanding) {
                SampleValue::Record(base_fields) => fields.extend(base_fields),
                other => {
                    tracing::debug!(
                        name = %decl.name,
                        base,
                        ?other,
                        "base type is not a struct; base fields skipped"
                    );
                }
            }
        }

        for member in &decl.members {
            let value = match member.type_ref() {
                Some(type_ref) => self.generate(type_ref, member.is_repeated(), expanding),
                None => SampleValue::UnknownType(String::new()),
            };
            fields.insert(member.name.clone(), label_string_samples(value, &member.name));
        }

        SampleValue::Record(fields)
    }
}

/// The label a generic string sample takes for `member_name`.
pub fn member_label(member_name: &str) -> &str {
    member_name
        .strip_prefix(MEMBER_LABEL_PREFIX)
        .unwrap_or(member_name)
}

fn label_string_samples(value: SampleValue, member_name: &str) -> SampleValue {
    match value {
        SampleValue::GenericString => SampleValue::Text(member_label(member_name).to_string()),
        SampleValue::List(items) => SampleValue::List(
            items
                .into_iter()
                .map(|item| label_string_samples(item, member_name))
                .collect(),
        ),
        other => other,
    }
}
