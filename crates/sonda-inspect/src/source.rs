// SPDX-License-Identifier: MIT OR Apache-2.0
//! The values an inspector accepts
//!
//! Template engines hand inspectors whatever the template context holds.
//! [`Source`] names every shape this crate can read; anything else arrives as
//! [`Source::Other`] and is treated as unsupported by each operation.

use sonda_core::{Document, Node, Vector};
use sonda_formats::{HalVector, JsonVector, UrlVector, XmlVector};
use std::any::Any;

/// Read-only view of an inspectable value
#[derive(Debug, Clone, Copy, Default)]
pub enum Source<'a> {
    /// No value
    #[default]
    Nil,
    /// Parsed JSON document
    Json(&'a JsonVector),
    /// Parsed XML document
    Xml(&'a XmlVector),
    /// Parsed URL query
    Url(&'a UrlVector),
    /// Parsed Accept-Language header
    Hal(&'a HalVector),
    /// Bare document tree
    Vector(&'a Vector),
    /// Node inside some document
    Node(Node<'a>),
    /// Value of a type no operation supports
    Other(&'a dyn Any),
}

impl<'a> Source<'a> {
    /// Starting node for path resolution; `None` for `Nil` and `Other`
    #[must_use]
    pub fn root(&self) -> Option<Node<'a>> {
        match *self {
            Self::Nil | Self::Other(_) => None,
            Self::Json(doc) => Some(doc.root()),
            Self::Xml(doc) => Some(doc.root()),
            Self::Url(doc) => Some(doc.root()),
            Self::Hal(doc) => Some(doc.root()),
            Self::Vector(vec) => Some(vec.root()),
            Self::Node(node) => Some(node),
        }
    }

    /// Backend behind the source, when it is a whole document
    #[must_use]
    pub fn document(&self) -> Option<&'a dyn Document> {
        match *self {
            Self::Json(doc) => Some(doc),
            Self::Xml(doc) => Some(doc),
            Self::Url(doc) => Some(doc),
            Self::Hal(doc) => Some(doc),
            _ => None,
        }
    }

    /// True for `Nil`
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// True when operations can read this source
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Nil | Self::Other(_))
    }
}

impl<'a> From<&'a JsonVector> for Source<'a> {
    fn from(doc: &'a JsonVector) -> Self {
        Self::Json(doc)
    }
}

impl<'a> From<&'a XmlVector> for Source<'a> {
    fn from(doc: &'a XmlVector) -> Self {
        Self::Xml(doc)
    }
}

impl<'a> From<&'a UrlVector> for Source<'a> {
    fn from(doc: &'a UrlVector) -> Self {
        Self::Url(doc)
    }
}

impl<'a> From<&'a HalVector> for Source<'a> {
    fn from(doc: &'a HalVector) -> Self {
        Self::Hal(doc)
    }
}

impl<'a> From<&'a Vector> for Source<'a> {
    fn from(vec: &'a Vector) -> Self {
        Self::Vector(vec)
    }
}

impl<'a> From<Node<'a>> for Source<'a> {
    fn from(node: Node<'a>) -> Self {
        Self::Node(node)
    }
}

impl<'a, T: Into<Self>> From<Option<T>> for Source<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

/// Mutable view of an inspectable value, used by reset
#[derive(Debug, Default)]
pub enum SourceMut<'a> {
    /// No value
    #[default]
    Nil,
    /// Parsed JSON document
    Json(&'a mut JsonVector),
    /// Parsed XML document
    Xml(&'a mut XmlVector),
    /// Parsed URL query
    Url(&'a mut UrlVector),
    /// Parsed Accept-Language header
    Hal(&'a mut HalVector),
    /// Bare document tree
    Vector(&'a mut Vector),
    /// Node inside some document; nodes own no state
    Node(Node<'a>),
    /// Value of a type no operation supports
    Other(&'a mut dyn Any),
}

impl SourceMut<'_> {
    /// Backend behind the source, when it is a whole document
    pub fn document_mut(&mut self) -> Option<&mut dyn Document> {
        match self {
            Self::Json(doc) => Some(&mut **doc),
            Self::Xml(doc) => Some(&mut **doc),
            Self::Url(doc) => Some(&mut **doc),
            Self::Hal(doc) => Some(&mut **doc),
            _ => None,
        }
    }
}

impl<'a> From<&'a mut JsonVector> for SourceMut<'a> {
    fn from(doc: &'a mut JsonVector) -> Self {
        Self::Json(doc)
    }
}

impl<'a> From<&'a mut XmlVector> for SourceMut<'a> {
    fn from(doc: &'a mut XmlVector) -> Self {
        Self::Xml(doc)
    }
}

impl<'a> From<&'a mut UrlVector> for SourceMut<'a> {
    fn from(doc: &'a mut UrlVector) -> Self {
        Self::Url(doc)
    }
}

impl<'a> From<&'a mut HalVector> for SourceMut<'a> {
    fn from(doc: &'a mut HalVector) -> Self {
        Self::Hal(doc)
    }
}

impl<'a> From<&'a mut Vector> for SourceMut<'a> {
    fn from(vec: &'a mut Vector) -> Self {
        Self::Vector(vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonda_core::NodeType;

    #[test]
    fn test_root_of_each_variant() {
        let json = JsonVector::from_slice(br#"{"a":1}"#).unwrap();
        let xml = XmlVector::from_slice(b"<a>1</a>").unwrap();
        assert_eq!(Source::from(&json).root().unwrap().typ(), NodeType::Object);
        assert_eq!(Source::from(&xml).root().unwrap().key(), Some("a"));
        assert_eq!(
            Source::from(json.vector()).root().unwrap().len(),
            json.root().len()
        );
        let node = json.get(&["a"]);
        assert_eq!(Source::from(node).root().unwrap().int(), Ok(1));
        assert!(Source::Nil.root().is_none());
        assert!(Source::Other(&5_u8).root().is_none());
    }

    #[test]
    fn test_option_conversion() {
        let json = JsonVector::from_slice(b"[1]").unwrap();
        assert!(Source::from(None::<&JsonVector>).is_nil());
        assert!(Source::from(Some(&json)).is_supported());
    }

    #[test]
    fn test_document_views() {
        let mut url = UrlVector::from_slice(b"a=1").unwrap();
        assert!(Source::from(&url).document().is_some());
        assert!(Source::from(url.root()).document().is_none());
        let mut src = SourceMut::from(&mut url);
        src.document_mut().unwrap().reset();
        assert!(url.root().is_null());
    }
}
