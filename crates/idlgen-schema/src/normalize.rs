//! # Declaration Normalization
//!
//! Walks an [`XmlNode`] tree carrying the enclosing module path and turns
//! `typedef`, `enum`, and `struct` elements into qualified
//! [`Declaration`]s. This is the only place that knows the markup's tag and
//! attribute names.

use idlgen_core::{qualify, Declaration, EnumDecl, Member, QualifiedName, StructDecl, TypedefDecl};

use crate::xml::XmlNode;

const TYPES_TAG: &str = "types";
const MODULE_TAG: &str = "module";
const TYPEDEF_TAG: &str = "typedef";
const ENUM_TAG: &str = "enum";
const STRUCT_TAG: &str = "struct";
const ENUMERATOR_TAGS: &[&str] = &["enumerator", "value", "literal"];
const MEMBER_TAGS: &[&str] = &["member", "field", "element"];

/// The element that holds type definitions: the root itself when it is
/// `<types>`, else its `<types>` child, else the root.
pub fn types_root(root: &XmlNode) -> &XmlNode {
    if root.tag == TYPES_TAG {
        return root;
    }
    root.child(TYPES_TAG).unwrap_or(root)
}

/// Visit every element in document order with the module path enclosing it.
///
/// A `<module>` contributes its name to the path of its descendants; a
/// module without a name leaves the path unchanged.
fn walk<'a, F>(node: &'a XmlNode, namespace: Option<&str>, visit: &mut F)
where
    F: FnMut(&'a XmlNode, Option<&str>),
{
    visit(node, namespace);

    let inner = match (node.tag == MODULE_TAG, node.attr("name")) {
        (true, Some(name)) => Some(qualify(namespace, name)),
        _ => namespace.map(str::to_string),
    };
    for child in &node.children {
        walk(child, inner.as_deref(), visit);
    }
}

/// All declarations in a document, names qualified by module path.
pub fn declarations(root: &XmlNode) -> Vec<Declaration> {
    let mut out = Vec::new();
    walk(types_root(root), None, &mut |node, namespace| {
        if let Some(decl) = normalize_node(node, namespace) {
            out.push(decl);
        }
    });
    out
}

/// Every struct in a document with its declared name and namespace.
///
/// The returned declarations carry qualified names, ready to register.
pub fn structs_with_namespace(root: &XmlNode) -> Vec<(QualifiedName, StructDecl)> {
    let mut out = Vec::new();
    walk(types_root(root), None, &mut |node, namespace| {
        if node.tag != STRUCT_TAG {
            return;
        }
        if let Some(name) = node.attr("name") {
            out.push((
                QualifiedName::new(namespace, name),
                struct_decl(node, qualify(namespace, name)),
            ));
        }
    });
    out
}

fn normalize_node(node: &XmlNode, namespace: Option<&str>) -> Option<Declaration> {
    let name = node.attr("name")?;
    match node.tag.as_str() {
        TYPEDEF_TAG => {
            let underlying = node.attr("nonBasicTypeName").or_else(|| node.attr("type"))?;
            Some(Declaration::Typedef(TypedefDecl {
                name: qualify(namespace, name),
                underlying: underlying.to_string(),
            }))
        }
        ENUM_TAG => Some(Declaration::Enum(EnumDecl {
            name: qualify(namespace, name),
            enumerators: node
                .children
                .iter()
                .filter(|c| c.is_any(ENUMERATOR_TAGS))
                .filter_map(|c| c.attr("name"))
                .map(str::to_string)
                .collect(),
        })),
        STRUCT_TAG => Some(Declaration::Struct(struct_decl(
            node,
            qualify(namespace, name),
        ))),
        _ => None,
    }
}

fn struct_decl(node: &XmlNode, qualified: String) -> StructDecl {
    StructDecl {
        name: qualified,
        base_type: node_attr(node, "baseType"),
        members: node
            .children
            .iter()
            .filter(|c| c.is_any(MEMBER_TAGS))
            .filter_map(member)
            .collect(),
    }
}

fn member(node: &XmlNode) -> Option<Member> {
    Some(Member {
        name: node.attr("name")?.to_string(),
        type_name: node_attr(node, "type"),
        non_basic_type_name: node_attr(node, "nonBasicTypeName"),
        sequence_max_length: node_attr(node, "sequenceMaxLength"),
        array_dimensions: node_attr(node, "arrayDimensions"),
    })
}

fn node_attr(node: &XmlNode, key: &str) -> Option<String> {
    node.attr(key).map(str::to_string)
}
