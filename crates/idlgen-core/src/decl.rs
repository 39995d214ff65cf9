//! # Declaration Model
//!
//! The normalized shape every schema dialect is reduced to before it
//! reaches the registry: typedefs, enumerations, and structs with
//! ordered members.

use serde::{Deserialize, Serialize};

/// Keyword in a raw member type that marks a sequence.
const SEQUENCE_KEYWORD: &str = "sequence";

/// A normalized schema declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    /// An alias for another type reference.
    Typedef(TypedefDecl),
    /// An ordered enumeration.
    Enum(EnumDecl),
    /// A record with optional single inheritance.
    Struct(StructDecl),
}

impl Declaration {
    /// The declared (qualified) name.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Typedef(t) => &t.name,
            Declaration::Enum(e) => &e.name,
            Declaration::Struct(s) => &s.name,
        }
    }
}

/// `name` is an alias of `underlying`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedefDecl {
    pub name: String,
    pub underlying: String,
}

/// An enumeration; the first enumerator is the canonical sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    pub enumerators: Vec<String>,
}

/// A struct declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDecl {
    /// Declared name (qualified once it has been through the scanner).
    pub name: String,
    /// Reference to the base struct, if any.
    pub base_type: Option<String>,
    /// Members in declaration order.
    pub members: Vec<Member>,
}

impl StructDecl {
    /// A struct with no base and no members.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_type: None,
            members: Vec::new(),
        }
    }

    /// Set the base struct reference.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base_type = Some(base.into());
        self
    }

    /// Append a member.
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }
}

/// A struct member.
///
/// A member may carry both a raw `type_name` (e.g. `nonBasic`, `int32`,
/// `string`) and an aliased `non_basic_type_name`; the latter wins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub type_name: Option<String>,
    pub non_basic_type_name: Option<String>,
    pub sequence_max_length: Option<String>,
    pub array_dimensions: Option<String>,
}

impl Member {
    /// A scalar member of a raw type.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    /// A scalar member referring to a declared type by name.
    pub fn non_basic(name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: Some("nonBasic".to_string()),
            non_basic_type_name: Some(type_ref.into()),
            ..Self::default()
        }
    }

    /// Mark the member as a bounded sequence.
    pub fn with_sequence_max_length(mut self, len: impl Into<String>) -> Self {
        self.sequence_max_length = Some(len.into());
        self
    }

    /// Mark the member as a fixed-size array.
    pub fn with_array_dimensions(mut self, dims: impl Into<String>) -> Self {
        self.array_dimensions = Some(dims.into());
        self
    }

    /// The type reference used for synthesis: the aliased name when
    /// present and non-empty, otherwise the raw type name.
    pub fn type_ref(&self) -> Option<&str> {
        non_empty(&self.non_basic_type_name).or_else(|| non_empty(&self.type_name))
    }

    /// Whether the member is a sequence or array rather than a scalar.
    pub fn is_repeated(&self) -> bool {
        non_empty(&self.sequence_max_length).is_some()
            || non_empty(&self.array_dimensions).is_some()
            || self
                .type_name
                .as_deref()
                .is_some_and(|t| t.contains(SEQUENCE_KEYWORD))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_ref_prefers_non_basic_name() {
        let m = Member::non_basic("A_Id", "P::T_Int32");
        assert_eq!(m.type_ref(), Some("P::T_Int32"));
    }

    #[test]
    fn type_ref_falls_back_on_empty_alias() {
        let m = Member {
            name: "x".into(),
            type_name: Some("int32".into()),
            non_basic_type_name: Some(String::new()),
            ..Member::default()
        };
        assert_eq!(m.type_ref(), Some("int32"));
    }

    #[test]
    fn type_ref_absent() {
        let m = Member {
            name: "x".into(),
            ..Member::default()
        };
        assert_eq!(m.type_ref(), None);
    }

    #[test]
    fn repeated_markers() {
        assert!(!Member::new("a", "long").is_repeated());
        assert!(Member::new("a", "long").with_sequence_max_length("10").is_repeated());
        assert!(Member::new("a", "long").with_array_dimensions("4").is_repeated());
        assert!(Member::new("a", "sequence<long>").is_repeated());
        assert!(!Member::new("a", "long").with_sequence_max_length("").is_repeated());
    }

    #[test]
    fn declaration_name_and_tagged_json() {
        let decl = Declaration::Enum(EnumDecl {
            name: "NS::E_Status".into(),
            enumerators: vec!["ACTIVE".into()],
        });
        assert_eq!(decl.name(), "NS::E_Status");
        let json = serde_json::to_value(&decl).unwrap();
        assert_eq!(json["kind"], "enum");
        assert_eq!(json["enumerators"][0], "ACTIVE");
    }

    #[test]
    fn struct_builder_keeps_member_order() {
        let s = StructDecl::new("C_X")
            .with_base("C_Base")
            .with_member(Member::new("b", "long"))
            .with_member(Member::new("a", "long"));
        assert_eq!(s.base_type.as_deref(), Some("C_Base"));
        let names: Vec<_> = s.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
