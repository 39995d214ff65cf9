//! # idlgen-registry — Type Registry
//!
//! An in-memory index of every typedef, enumeration, and struct declared in
//! a schema corpus, plus a short-name table for convenience lookups.
//!
//! ## Lifecycle
//!
//! The registry is filled once during a corpus scan (write-only, no
//! deletions) and queried read-only afterwards. Re-registering a name
//! overwrites its stored definition.
//!
//! ## Short Names
//!
//! Every registration maps the declaration's final name segment to its
//! qualified name. When two namespaces declare the same short name, the
//! table keeps whichever was registered last. Lookups by short name are
//! therefore ambiguous by construction; the registry preserves that
//! ambiguity instead of guessing.
//!
//! ## Typedef Cycles
//!
//! A typedef chain that revisits a name within one resolution is a modeling
//! error in the input. [`TypeRegistry::try_resolve_type`] detects it and
//! returns [`ResolveError::CyclicTypedef`]; [`TypeRegistry::resolve_type`]
//! logs a warning and stops at the cycle point.
//!
//! ## Thread Safety
//!
//! `TypeRegistry` is `Send + Sync`. Once loading completes it can be shared
//! by reference across any number of readers.

use std::collections::{HashMap, HashSet};

use idlgen_core::{short_name, Declaration, ResolveError, StructDecl};

/// Index of declared types keyed by qualified name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    typedefs: HashMap<String, String>,
    enums: HashMap<String, Vec<String>>,
    structs: HashMap<String, StructDecl>,
    short_names: HashMap<String, String>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` as an alias of `underlying`.
    pub fn register_typedef(&mut self, name: impl Into<String>, underlying: impl Into<String>) {
        let name = name.into();
        self.register_short_name(&name);
        self.typedefs.insert(name, underlying.into());
    }

    /// Record an enumeration with its enumerators in declaration order.
    pub fn register_enum(&mut self, name: impl Into<String>, enumerators: Vec<String>) {
        let name = name.into();
        self.register_short_name(&name);
        self.enums.insert(name, enumerators);
    }

    /// Record a struct declaration under `name`.
    pub fn register_struct(&mut self, name: impl Into<String>, decl: StructDecl) {
        let name = name.into();
        self.register_short_name(&name);
        self.structs.insert(name, decl);
    }

    /// Register a normalized declaration under its own name.
    pub fn register(&mut self, decl: Declaration) {
        match decl {
            Declaration::Typedef(t) => self.register_typedef(t.name, t.underlying),
            Declaration::Enum(e) => self.register_enum(e.name, e.enumerators),
            Declaration::Struct(s) => {
                let name = s.name.clone();
                self.register_struct(name, s);
            }
        }
    }

    fn register_short_name(&mut self, full_name: &str) {
        let short = short_name(full_name);
        tracing::trace!(short, full_name, "registering short name");
        if let Some(previous) = self
            .short_names
            .insert(short.to_string(), full_name.to_string())
        {
            if previous != full_name {
                tracing::debug!(
                    short,
                    previous = %previous,
                    current = full_name,
                    "short name is ambiguous; last registration wins"
                );
            }
        }
    }

    /// Resolve a typedef chain to its final underlying reference.
    ///
    /// A registered typedef name recurses on its underlying reference.
    /// Otherwise, if the reference's short name is in the short-name table,
    /// the qualified name is substituted: a typedef recurses, anything else
    /// (a struct or enum found only by short name) is returned as-is.
    /// A reference matching neither is returned unchanged and is treated as
    /// a primitive by callers.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::CyclicTypedef`] when the chain expands the
    /// same typedef twice.
    pub fn try_resolve_type(&self, type_ref: &str) -> Result<String, ResolveError> {
        let mut chain = vec![type_ref.to_string()];
        let mut expanded: HashSet<&str> = HashSet::new();
        let mut current: &str = type_ref;

        loop {
            let (typedef_name, underlying) = match self.typedefs.get_key_value(current) {
                Some(entry) => entry,
                None => match self.short_names.get(short_name(current)) {
                    Some(full) => match self.typedefs.get_key_value(full.as_str()) {
                        Some(entry) => entry,
                        None => return Ok(full.clone()),
                    },
                    None => return Ok(current.to_string()),
                },
            };

            if !expanded.insert(typedef_name.as_str()) {
                chain.push(typedef_name.clone());
                return Err(ResolveError::CyclicTypedef {
                    start: type_ref.to_string(),
                    chain,
                });
            }

            chain.push(underlying.clone());
            current = underlying.as_str();
        }
    }

    /// Resolve a typedef chain, stopping at the cycle point if the chain
    /// loops. See [`TypeRegistry::try_resolve_type`].
    pub fn resolve_type(&self, type_ref: &str) -> String {
        self.try_resolve_type(type_ref).unwrap_or_else(|err| {
            tracing::warn!(%err, "typedef cycle; resolution stopped");
            err.cycle_point().to_string()
        })
    }

    /// Enumerators of the enumeration `type_ref` resolves to.
    ///
    /// Checks the resolved name directly, then through the short-name table.
    pub fn lookup_enum(&self, type_ref: &str) -> Option<&[String]> {
        let resolved = self.try_resolve_type(type_ref).ok()?;
        if let Some(values) = self.enums.get(&resolved) {
            return Some(values);
        }
        let full = self.short_names.get(short_name(&resolved))?;
        self.enums.get(full).map(Vec::as_slice)
    }

    /// Declaration of the struct `type_ref` resolves to.
    ///
    /// Same two-tier lookup as [`TypeRegistry::lookup_enum`].
    pub fn lookup_struct(&self, type_ref: &str) -> Option<&StructDecl> {
        let resolved = self.try_resolve_type(type_ref).ok()?;
        if let Some(decl) = self.structs.get(&resolved) {
            return Some(decl);
        }
        let full = self.short_names.get(short_name(&resolved))?;
        self.structs.get(full)
    }

    /// The qualified name currently bound to a short name.
    pub fn qualify(&self, short: &str) -> Option<&str> {
        self.short_names.get(short).map(String::as_str)
    }

    /// Number of registered typedefs.
    pub fn typedef_count(&self) -> usize {
        self.typedefs.len()
    }

    /// Number of registered enumerations.
    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    /// Number of registered structs.
    pub fn struct_count(&self) -> usize {
        self.structs.len()
    }

    /// True if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.typedefs.is_empty() && self.enums.is_empty() && self.structs.is_empty()
    }
}

impl Extend<Declaration> for TypeRegistry {
    fn extend<I: IntoIterator<Item = Declaration>>(&mut self, iter: I) {
        for decl in iter {
            self.register(decl);
        }
    }
}

impl FromIterator<Declaration> for TypeRegistry {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idlgen_core::{EnumDecl, Member, TypedefDecl};

    fn vehicle_registry() -> TypeRegistry {
        let mut r = TypeRegistry::new();
        r.register_typedef("P::T_Int32", "long");
        r.register_typedef("P::T_Id", "P::T_Int32");
        r.register_enum("P::E_Status", vec!["ACTIVE".into(), "INACTIVE".into()]);
        r.register_struct(
            "P::C_Vehicle",
            StructDecl::new("P::C_Vehicle").with_member(Member::non_basic("A_Id", "P::T_Id")),
        );
        r
    }

    #[test]
    fn resolve_typedef_chain_to_primitive() {
        let r = vehicle_registry();
        assert_eq!(r.resolve_type("P::T_Id"), "long");
        assert_eq!(r.resolve_type("P::T_Int32"), "long");
    }

    #[test]
    fn resolve_typedef_by_short_name() {
        let r = vehicle_registry();
        assert_eq!(r.resolve_type("T_Id"), "long");
        assert_eq!(r.resolve_type("Other::T_Id"), "long");
    }

    #[test]
    fn resolve_struct_by_short_name_returns_qualified() {
        let r = vehicle_registry();
        assert_eq!(r.resolve_type("C_Vehicle"), "P::C_Vehicle");
        assert_eq!(r.resolve_type("P::C_Vehicle"), "P::C_Vehicle");
    }

    #[test]
    fn resolve_unknown_is_unchanged() {
        let r = vehicle_registry();
        assert_eq!(r.resolve_type("unsigned long long"), "unsigned long long");
        assert_eq!(r.resolve_type("Bogus::Thing"), "Bogus::Thing");
    }

    #[test]
    fn short_name_is_last_write_wins() {
        let mut r = TypeRegistry::new();
        r.register_struct("NS1::Foo", StructDecl::new("NS1::Foo"));
        r.register_struct("NS2::Foo", StructDecl::new("NS2::Foo"));
        assert_eq!(r.qualify("Foo"), Some("NS2::Foo"));
        assert_eq!(r.resolve_type("Foo"), "NS2::Foo");
        assert_eq!(r.lookup_struct("Foo").map(|s| s.name.as_str()), Some("NS2::Foo"));
        // Resolution consults the short-name table even for qualified
        // names, so the earlier declaration is shadowed.
        assert_eq!(r.resolve_type("NS1::Foo"), "NS2::Foo");
        assert_eq!(
            r.lookup_struct("NS1::Foo").map(|s| s.name.as_str()),
            Some("NS2::Foo")
        );
    }

    #[test]
    fn lookup_enum_direct_and_via_typedef() {
        let mut r = vehicle_registry();
        r.register_typedef("P::T_Status", "P::E_Status");
        assert_eq!(r.lookup_enum("P::E_Status").unwrap()[0], "ACTIVE");
        assert_eq!(r.lookup_enum("T_Status").unwrap()[1], "INACTIVE");
        assert_eq!(r.lookup_enum("E_Status").unwrap().len(), 2);
        assert!(r.lookup_enum("P::C_Vehicle").is_none());
        assert!(r.lookup_enum("long").is_none());
    }

    #[test]
    fn lookup_struct_via_short_name_of_foreign_prefix() {
        let r = vehicle_registry();
        let decl = r.lookup_struct("Elsewhere::C_Vehicle").unwrap();
        assert_eq!(decl.name, "P::C_Vehicle");
        assert!(r.lookup_struct("P::E_Status").is_none());
    }

    #[test]
    fn reregistration_overwrites() {
        let mut r = TypeRegistry::new();
        r.register_enum("E", vec!["A".into()]);
        r.register_enum("E", vec!["B".into()]);
        assert_eq!(r.lookup_enum("E").unwrap(), ["B".to_string()]);
        assert_eq!(r.enum_count(), 1);
    }

    #[test]
    fn empty_enum_is_found() {
        let mut r = TypeRegistry::new();
        r.register_enum("E_Empty", Vec::new());
        assert_eq!(r.lookup_enum("E_Empty").map(<[String]>::len), Some(0));
    }

    #[test]
    fn direct_typedef_cycle_detected() {
        let mut r = TypeRegistry::new();
        r.register_typedef("A", "B");
        r.register_typedef("B", "A");
        let err = r.try_resolve_type("A").unwrap_err();
        assert_eq!(
            err,
            ResolveError::CyclicTypedef {
                start: "A".into(),
                chain: vec!["A".into(), "B".into(), "A".into(), "A".into()],
            }
        );
        assert_eq!(r.resolve_type("A"), "A");
        assert!(r.lookup_enum("A").is_none());
        assert!(r.lookup_struct("A").is_none());
    }

    #[test]
    fn self_typedef_cycle_detected() {
        let mut r = TypeRegistry::new();
        r.register_typedef("NS::T", "NS::T");
        assert!(r.try_resolve_type("NS::T").is_err());
    }

    #[test]
    fn short_name_collision_cycle_detected() {
        // `A::Speed` aliases `B::Speed`, whose short name maps back to the
        // typedef because it was registered last.
        let mut r = TypeRegistry::new();
        r.register_struct("B::Speed", StructDecl::new("B::Speed"));
        r.register_typedef("A::Speed", "B::Speed");
        assert!(matches!(
            r.try_resolve_type("A::Speed"),
            Err(ResolveError::CyclicTypedef { .. })
        ));
        // Resolving the struct's own name walks into the same typedef.
        assert!(r.lookup_struct("B::Speed").is_none());
    }

    #[test]
    fn register_dispatches_declarations() {
        let r: TypeRegistry = vec![
            Declaration::Typedef(TypedefDecl {
                name: "M::T_Bool".into(),
                underlying: "boolean".into(),
            }),
            Declaration::Enum(EnumDecl {
                name: "M::E_Mode".into(),
                enumerators: vec!["AUTO".into()],
            }),
            Declaration::Struct(StructDecl::new("M::C_Cmd")),
        ]
        .into_iter()
        .collect();
        assert_eq!(r.typedef_count(), 1);
        assert_eq!(r.enum_count(), 1);
        assert_eq!(r.struct_count(), 1);
        assert!(!r.is_empty());
        assert_eq!(r.resolve_type("T_Bool"), "boolean");
    }

    #[test]
    fn unqualified_names_register_as_own_short_name() {
        let mut r = TypeRegistry::new();
        r.register_typedef("T_Flag", "boolean");
        assert_eq!(r.qualify("T_Flag"), Some("T_Flag"));
    }

    #[test]
    fn registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypeRegistry>();
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any typedef chain ending in a primitive resolves to it from
            /// every link, by qualified or short name.
            #[test]
            fn typedef_chain_resolves_to_primitive(
                len in 1usize..12,
                primitive in prop::sample::select(vec!["long", "double", "boolean", "string"]),
            ) {
                let mut r = TypeRegistry::new();
                for i in 0..len {
                    let target = if i + 1 == len {
                        primitive.to_string()
                    } else {
                        format!("NS::T{}", i + 1)
                    };
                    r.register_typedef(format!("NS::T{i}"), target);
                }
                for i in 0..len {
                    prop_assert_eq!(r.resolve_type(&format!("NS::T{i}")), primitive);
                    prop_assert_eq!(r.resolve_type(&format!("T{i}")), primitive);
                }
            }
        }
    }
}
