//! # Qualified Names
//!
//! Type references in a schema corpus are `::`-joined paths such as
//! `P_NSTEL::T_Int32`. The final segment is the *short name*; two
//! references with the same short name may denote the same declaration
//! even when their namespace prefixes differ or are absent.

use serde::{Deserialize, Serialize};

/// Separator between namespace segments.
pub const SCOPE_SEPARATOR: &str = "::";

/// Return the final segment of a qualified name.
///
/// A name without a separator is its own short name.
pub fn short_name(name: &str) -> &str {
    match name.rfind(SCOPE_SEPARATOR) {
        Some(idx) => &name[idx + SCOPE_SEPARATOR.len()..],
        None => name,
    }
}

/// Join an optional enclosing namespace and a declared name.
pub fn qualify(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{ns}{SCOPE_SEPARATOR}{name}"),
        _ => name.to_string(),
    }
}

/// A declared name together with the namespace it was declared in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    namespace: Option<String>,
    name: String,
}

impl QualifiedName {
    /// Create a qualified name. An empty namespace is treated as absent.
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            name: name.into(),
        }
    }

    /// The enclosing namespace, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The declared (unqualified) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The innermost namespace segment, if any.
    pub fn innermost_namespace(&self) -> Option<&str> {
        self.namespace.as_deref().map(short_name)
    }

    /// Render with `::` separators, e.g. `P_NSTEL::C_VehicleSpeed`.
    pub fn to_qualified_string(&self) -> String {
        qualify(self.namespace(), &self.name)
    }

    /// The name scoped by its innermost module only.
    ///
    /// A struct declared in `Outer::P_NSTEL` has the logical name
    /// `P_NSTEL::C_Speed`. Topic names and output file names derive from
    /// this form; registry keys keep the full path.
    pub fn logical_name(&self) -> String {
        qualify(self.innermost_namespace(), &self.name)
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ns) = &self.namespace {
            write!(f, "{ns}{SCOPE_SEPARATOR}")?;
        }
        write!(f, "{}", self.name)
    }
}
