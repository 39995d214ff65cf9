//! # Resolve Subcommand
//!
//! Answers "what does this type reference name?" against a schema corpus:
//! the resolved identity, what kind of type it is, and optionally the
//! sample value it synthesizes to.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use idlgen_registry::TypeRegistry;
use idlgen_sample::{classify_primitive, SampleGenerator};

use crate::inputs::load_schema_dirs;

/// Arguments for the `idlgen resolve` subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Type reference to resolve, short or qualified.
    #[arg(value_name = "TYPE")]
    pub type_ref: String,

    /// Directory of schema documents to load. May be repeated.
    #[arg(long = "schema-dir", value_name = "DIR", required = true)]
    pub schema_dirs: Vec<PathBuf>,

    /// Also print the synthesized sample as JSON.
    #[arg(long)]
    pub sample: bool,
}

/// What a resolved reference turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedKind {
    Struct { members: usize },
    Enum { enumerators: usize },
    Primitive,
    Unknown,
}

impl std::fmt::Display for ResolvedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Struct { members } => write!(f, "struct ({members} member(s))"),
            Self::Enum { enumerators } => write!(f, "enum ({enumerators} enumerator(s))"),
            Self::Primitive => f.write_str("primitive"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Classify the type `type_ref` resolves to.
pub fn classify(registry: &TypeRegistry, type_ref: &str, resolved: &str) -> ResolvedKind {
    if let Some(decl) = registry.lookup_struct(type_ref) {
        ResolvedKind::Struct {
            members: decl.members.len(),
        }
    } else if let Some(values) = registry.lookup_enum(type_ref) {
        ResolvedKind::Enum {
            enumerators: values.len(),
        }
    } else if classify_primitive(resolved).is_some() {
        ResolvedKind::Primitive
    } else {
        ResolvedKind::Unknown
    }
}

/// Execute the resolve subcommand.
///
/// Returns exit code: 0 when the reference resolves, 1 on a typedef cycle.
pub fn run_resolve(args: &ResolveArgs) -> Result<u8> {
    let (registry, report) = load_schema_dirs(&args.schema_dirs)?;
    tracing::info!(
        documents = report.documents,
        declarations = report.declarations,
        "loaded type registry"
    );

    let resolved = match registry.try_resolve_type(&args.type_ref) {
        Ok(resolved) => resolved,
        Err(err) => {
            println!("ERROR: {err}");
            return Ok(1);
        }
    };

    println!("type:     {}", args.type_ref);
    println!("resolved: {resolved}");
    println!("kind:     {}", classify(&registry, &args.type_ref, &resolved));

    if args.sample {
        let sample = SampleGenerator::new(&registry).generate_sample(&args.type_ref, false);
        println!("{}", sample.to_json_pretty()?);
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use idlgen_core::{Member, StructDecl};

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register_typedef("P::T_Id", "long");
        registry.register_typedef("P::T_Alias", "P::T_Odd");
        registry.register_enum("P::E_Mode", vec!["ON".into(), "OFF".into()]);
        registry.register_struct(
            "P::C_Thing",
            StructDecl::new("P::C_Thing").with_member(Member::non_basic("A_Id", "T_Id")),
        );
        registry
    }

    #[test]
    fn classifies_each_kind() {
        let registry = registry();
        let kind = |r: &str| classify(&registry, r, &registry.resolve_type(r));
        assert_eq!(kind("C_Thing"), ResolvedKind::Struct { members: 1 });
        assert_eq!(kind("E_Mode"), ResolvedKind::Enum { enumerators: 2 });
        assert_eq!(kind("T_Id"), ResolvedKind::Primitive);
        assert_eq!(kind("T_Alias"), ResolvedKind::Unknown);
    }

    #[test]
    fn kind_display() {
        assert_eq!(ResolvedKind::Struct { members: 3 }.to_string(), "struct (3 member(s))");
        assert_eq!(ResolvedKind::Enum { enumerators: 0 }.to_string(), "enum (0 enumerator(s))");
        assert_eq!(ResolvedKind::Unknown.to_string(), "unknown");
    }

    #[test]
    fn cycle_exits_nonzero() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("loop.xml"),
            r#"<types><typedef name="T_A" type="nonBasic" nonBasicTypeName="T_B"/>
               <typedef name="T_B" type="nonBasic" nonBasicTypeName="T_A"/></types>"#,
        )
        .unwrap();
        let args = ResolveArgs {
            type_ref: "T_A".into(),
            schema_dirs: vec![dir.path().to_path_buf()],
            sample: true,
        };
        assert_eq!(run_resolve(&args).unwrap(), 1);
    }

    #[test]
    fn missing_schema_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = ResolveArgs {
            type_ref: "T_A".into(),
            schema_dirs: vec![dir.path().join("absent")],
            sample: false,
        };
        assert!(run_resolve(&args).is_err());
    }
}
