//! # idlgen-sample — Sample Synthesizer
//!
//! Given a type reference and a cardinality flag, resolves the reference
//! through an [`idlgen_registry::TypeRegistry`] and produces a canonical
//! example [`SampleValue`]: a primitive literal, an enumerator, a composed
//! record (base-type fields first), or a single-element list.
//!
//! ## Failure Semantics
//!
//! Synthesis never fails. Unresolvable references, empty enumerations,
//! typedef cycles, and self-referential structs degrade to explicit
//! placeholder variants of [`SampleValue`], which only become strings when
//! serialized. A corpus with a few malformed entries still yields
//! best-effort output for everything resolvable.
//!
//! ## Determinism
//!
//! Identical registry contents and inputs always produce identical values,
//! with record fields in declaration order.

pub mod primitive;
pub mod synth;
pub mod value;

pub use primitive::{classify_primitive, Primitive};
pub use synth::{member_label, SampleGenerator};
pub use value::{SampleValue, GENERIC_STRING_SAMPLE, UNKNOWN_ENUM_MARKER};
