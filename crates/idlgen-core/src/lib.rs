//! # idlgen-core — Foundational Types for idlgen
//!
//! This crate is the leaf of the idlgen workspace. It defines the vocabulary
//! shared by the type registry, the sample synthesizer, and the schema
//! document scanner. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One declaration model.** Schema documents are normalized into the
//!    [`Declaration`] sum type (`Typedef`, `Enum`, `Struct`) exactly once.
//!    Nothing downstream ever inspects raw document tag names.
//!
//! 2. **Qualified names are `::`-joined.** [`QualifiedName`] and the free
//!    functions in [`names`] are the only places that know the separator.
//!
//! 3. **Structured errors.** All failure modes are `thiserror` enums in
//!    [`error`]; binaries wrap them with `anyhow` context.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `idlgen-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod decl;
pub mod error;
pub mod names;

// Re-export primary types for ergonomic imports.
pub use decl::{Declaration, EnumDecl, Member, StructDecl, TypedefDecl};
pub use error::{ResolveError, SchemaError};
pub use names::{qualify, short_name, QualifiedName, SCOPE_SEPARATOR};
