//! # Generic XML Tree
//!
//! A minimal element tree built from `quick-xml` events. Text content,
//! comments, processing instructions, and the XML declaration are dropped;
//! only element names, attributes, and nesting survive.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use idlgen_core::SchemaError;

/// An element with its attributes and child elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlNode {
    /// Local element name, without any namespace prefix.
    pub tag: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order.
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// An element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Attribute value by name. Empty values count as absent.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    /// True if this element's tag is one of `tags`.
    pub fn is_any(&self, tags: &[&str]) -> bool {
        tags.contains(&self.tag.as_str())
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, quick_xml::Error> {
        let tag = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            tag,
            attributes,
            children: Vec::new(),
        })
    }
}

/// Parse `text` into its root element.
///
/// `label` names the document in error messages (usually its path).
///
/// # Errors
///
/// Returns [`SchemaError::DocumentParse`] for malformed markup, mismatched
/// or unclosed elements, multiple roots, or a document without elements.
pub fn parse_document(text: &str, label: &str) -> Result<XmlNode, SchemaError> {
    let parse_error = |reason: String| SchemaError::DocumentParse {
        path: label.to_string(),
        reason,
    };

    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut open: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| parse_error(format!("{e} (at byte {})", reader.buffer_position())))?;

        let completed = match event {
            Event::Start(start) => {
                let node = XmlNode::from_start(&start).map_err(|e| parse_error(e.to_string()))?;
                open.push(node);
                None
            }
            Event::Empty(start) => {
                Some(XmlNode::from_start(&start).map_err(|e| parse_error(e.to_string()))?)
            }
            Event::End(_) => Some(
                open.pop()
                    .ok_or_else(|| parse_error("closing tag without opening tag".to_string()))?,
            ),
            Event::Eof => break,
            _ => None,
        };

        if let Some(node) = completed {
            match open.last_mut() {
                Some(parent) => parent.children.push(node),
                None if root.is_some() => {
                    return Err(parse_error(format!(
                        "multiple root elements (second is <{}>)",
                        node.tag
                    )));
                }
                None => root = Some(node),
            }
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(parse_error(format!("unclosed element <{}>", unclosed.tag)));
    }

    root.ok_or_else(|| parse_error("document has no root element".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_attributes() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
            <!-- generated -->
            <types xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
              <module name="P">
                <typedef name="T_Int32" type="int32"/>
                <struct name="C_A">
                  <member name="x" type="string" stringMaxLength="8"/>
                </struct>
              </module>
            </types>"#;
        let root = parse_document(doc, "inline").unwrap();
        assert_eq!(root.tag, "types");
        let module = root.child("module").unwrap();
        assert_eq!(module.attr("name"), Some("P"));
        assert_eq!(module.children.len(), 2);
        let member = &module.children[1].children[0];
        assert_eq!(member.tag, "member");
        assert_eq!(member.attr("stringMaxLength"), Some("8"));
    }

    #[test]
    fn unescapes_attribute_values() {
        let root = parse_document(r#"<t note="a &amp; b"/>"#, "inline").unwrap();
        assert_eq!(root.attr("note"), Some("a & b"));
    }

    #[test]
    fn empty_attribute_is_absent() {
        let root = parse_document(r#"<t name=""/>"#, "inline").unwrap();
        assert_eq!(root.attr("name"), None);
        assert_eq!(root.attributes.len(), 1);
    }

    #[test]
    fn text_content_is_ignored() {
        let root = parse_document("<a>hello<b/>world</a>", "inline").unwrap();
        assert_eq!(root.children, vec![XmlNode::new("b")]);
    }

    #[test]
    fn mismatched_close_is_error() {
        let err = parse_document("<a><b></a>", "bad.xml").unwrap_err();
        assert!(err.to_string().contains("bad.xml"), "{err}");
    }

    #[test]
    fn unclosed_element_is_error() {
        let err = parse_document("<types><module name='x'>", "open.xml").unwrap_err();
        assert!(matches!(err, SchemaError::DocumentParse { .. }));
    }

    #[test]
    fn empty_document_is_error() {
        let err = parse_document("   ", "empty.xml").unwrap_err();
        assert!(err.to_string().contains("no root element"), "{err}");
    }

    #[test]
    fn multiple_roots_is_error() {
        let err = parse_document("<a/><b/>", "two.xml").unwrap_err();
        assert!(err.to_string().contains("multiple root"), "{err}");
    }

    #[test]
    fn is_any_matches_tag_sets() {
        let node = XmlNode::new("field");
        assert!(node.is_any(&["member", "field"]));
        assert!(!node.is_any(&["enumerator"]));
    }
}
