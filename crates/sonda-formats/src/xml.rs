// SPDX-License-Identifier: MIT OR Apache-2.0
//! XML backend
//!
//! Mapping rules:
//!
//! - the document element becomes the root node, keyed by its tag name
//! - an element with child elements or attributes is an `Object`
//! - attributes become `Attr` children keyed `@name`, before any elements
//! - text of an `Object` element becomes a `String` child keyed `#text`
//! - an element holding only text (or nothing) becomes a `String` node
//! - repeated sibling tags stay separate children; key lookup finds the
//!   first, positional lookup reaches the rest
//!
//! Comments, processing instructions and the XML declaration are skipped.
//! Element nesting deeper than [`MAX_DEPTH`] is rejected, the same bound
//! `serde_json` applies to JSON input.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use sonda_core::{Document, Encoding, NodeId, NodeType, Result, SondaError, Vector};

/// Key of the synthesized text child of mixed-content elements
pub const TEXT_KEY: &str = "#text";

/// Deepest element nesting accepted by the parser
pub const MAX_DEPTH: usize = 128;

/// XML document
#[derive(Debug, Clone, Default)]
pub struct XmlVector {
    vec: Vector,
}

struct OpenElement {
    id: NodeId,
    text: String,
    has_elements: bool,
    has_attrs: bool,
}

impl XmlVector {
    /// Create an empty XML document
    #[must_use]
    pub const fn new() -> Self {
        Self { vec: Vector::new() }
    }

    /// Parse `src` into a new document
    ///
    /// # Errors
    ///
    /// Returns [`SondaError::Parse`] when `src` is not well-formed XML.
    pub fn from_slice(src: &[u8]) -> Result<Self> {
        let mut doc = Self::new();
        doc.parse(src)?;
        Ok(doc)
    }

    fn build(&mut self, src: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(src).map_err(xml_error)?;
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<OpenElement> = Vec::new();
        loop {
            match reader.read_event().map_err(xml_error)? {
                Event::Start(e) => {
                    let open = self.open(&e, &mut stack)?;
                    stack.push(open);
                }
                Event::Empty(e) => {
                    let open = self.open(&e, &mut stack)?;
                    self.close(open);
                }
                Event::End(_) => {
                    let open = stack
                        .pop()
                        .ok_or_else(|| xml_error("unexpected closing tag"))?;
                    self.close(open);
                }
                Event::Text(t) => {
                    let value = t.unescape().map_err(xml_error)?;
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&value);
                    }
                }
                Event::CData(c) => {
                    let raw = c.into_inner();
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(&raw));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(xml_error("unclosed element at end of input"));
        }
        if self.vec.is_empty() {
            return Err(xml_error("no document element"));
        }
        Ok(())
    }

    fn open(&mut self, e: &BytesStart<'_>, stack: &mut [OpenElement]) -> Result<OpenElement> {
        if stack.len() >= MAX_DEPTH {
            return Err(xml_error(format_args!(
                "element nesting exceeds {MAX_DEPTH} levels"
            )));
        }
        let qname = e.name();
        let name: &[u8] = qname.as_ref();
        let id = match stack.last_mut() {
            Some(parent) => {
                parent.has_elements = true;
                self.vec
                    .add_child(parent.id, NodeType::Object, Some(name), b"")
            }
            None if self.vec.is_empty() => {
                self.vec.add_root(NodeType::Object, Some(name), b"")
            }
            None => return Err(xml_error("more than one document element")),
        };

        let mut has_attrs = false;
        let mut key = Vec::with_capacity(16);
        for attr in e.attributes() {
            let attr = attr.map_err(xml_error)?;
            let value = attr.unescape_value().map_err(xml_error)?;
            key.clear();
            key.push(b'@');
            key.extend_from_slice(attr.key.as_ref());
            self.vec
                .add_child(id, NodeType::Attr, Some(key.as_slice()), value.as_bytes());
            has_attrs = true;
        }

        Ok(OpenElement {
            id,
            text: String::new(),
            has_elements: false,
            has_attrs,
        })
    }

    fn close(&mut self, open: OpenElement) {
        if !open.has_elements && !open.has_attrs {
            self.vec
                .set_value(open.id, NodeType::String, open.text.as_bytes());
        } else if !open.text.is_empty() {
            self.vec.add_child(
                open.id,
                NodeType::String,
                Some(TEXT_KEY.as_bytes()),
                open.text.as_bytes(),
            );
        }
    }
}

impl Document for XmlVector {
    fn encoding(&self) -> Encoding {
        Encoding::Xml
    }

    fn parse(&mut self, src: &[u8]) -> Result<()> {
        self.vec.reset();
        let built = self.build(src);
        if built.is_err() {
            self.vec.reset();
        }
        built
    }

    fn vector(&self) -> &Vector {
        &self.vec
    }

    fn vector_mut(&mut self) -> &mut Vector {
        &mut self.vec
    }
}

fn xml_error(err: impl std::fmt::Display) -> SondaError {
    SondaError::parse(Encoding::Xml, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: &str = r#"<?xml version="1.0"?>
<config version="2">
    <!-- display settings -->
    <color>#c3c3c3</color>
    <inner_margin unit="px">15</inner_margin>
    <items>
        <item>foo</item>
        <item>bar</item>
        <item><![CDATA[a < b]]></item>
    </items>
    <empty/>
</config>"#;

    #[test]
    fn test_root_is_keyed_by_tag() {
        let doc = XmlVector::from_slice(SRC.as_bytes()).unwrap();
        assert_eq!(doc.root().key(), Some("config"));
        assert_eq!(doc.root().typ(), NodeType::Object);
        assert_eq!(doc.get(&["@version"]).typ(), NodeType::Attr);
        assert_eq!(doc.get(&["@version"]).string(), "2");
    }

    #[test]
    fn test_text_only_element_is_string() {
        let doc = XmlVector::from_slice(SRC.as_bytes()).unwrap();
        let color = doc.get(&["color"]);
        assert_eq!(color.typ(), NodeType::String);
        assert_eq!(color.string(), "#c3c3c3");
    }

    #[test]
    fn test_attributes_and_text() {
        let doc = XmlVector::from_slice(SRC.as_bytes()).unwrap();
        let margin = doc.get(&["inner_margin"]);
        assert_eq!(margin.typ(), NodeType::Object);
        assert_eq!(margin.get(&["@unit"]).string(), "px");
        assert_eq!(margin.get(&[TEXT_KEY]).string(), "15");
    }

    #[test]
    fn test_repeated_tags_by_position() {
        let doc = XmlVector::from_slice(SRC.as_bytes()).unwrap();
        let items = doc.get(&["items"]);
        assert_eq!(items.len(), 3);
        assert_eq!(items.get(&["item"]).string(), "foo");
        assert_eq!(items.get(&["1"]).string(), "bar");
        assert_eq!(items.get(&["2"]).string(), "a < b");
    }

    #[test]
    fn test_empty_element_is_empty_string() {
        let doc = XmlVector::from_slice(SRC.as_bytes()).unwrap();
        let empty = doc.get(&["empty"]);
        assert_eq!(empty.typ(), NodeType::String);
        assert_eq!(empty.string(), "");
    }

    #[test]
    fn test_entities_are_unescaped() {
        let doc = XmlVector::from_slice(br#"<a t="x &amp; y">1 &lt; 2</a>"#).unwrap();
        assert_eq!(doc.get(&["@t"]).string(), "x & y");
        assert_eq!(doc.get(&[TEXT_KEY]).string(), "1 < 2");
    }

    fn nested(depth: usize) -> String {
        let mut src = String::new();
        for _ in 0..depth {
            src.push_str(r#"<a x="1">"#);
        }
        for _ in 0..depth {
            src.push_str("</a>");
        }
        src
    }

    #[test]
    fn test_nesting_limit() {
        let doc = XmlVector::from_slice(nested(MAX_DEPTH).as_bytes()).unwrap();
        assert_eq!(doc.get(&["a", "@x"]).string(), "1");

        let mut doc = XmlVector::new();
        let err = doc.parse(nested(20_000).as_bytes()).unwrap_err();
        assert!(err.to_string().contains("nesting"), "{err}");
        assert!(doc.vector().is_empty());
        assert!(doc.parse(nested(MAX_DEPTH + 1).as_bytes()).is_err());
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        let mut doc = XmlVector::new();
        assert!(doc.parse(b"<a><b></a>").is_err());
        assert!(doc.vector().is_empty());
        assert!(doc.parse(b"<a/><b/>").is_err());
        assert!(doc.parse(b"   ").is_err());
        assert!(doc.parse(b"<a>").is_err());
    }
}
