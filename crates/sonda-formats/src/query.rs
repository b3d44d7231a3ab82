// SPDX-License-Identifier: MIT OR Apache-2.0
//! URL query backend
//!
//! Input is either an absolute URL or a bare query string with an optional
//! leading `?`. The root is an `Object` with one child per distinct query
//! key, in first-seen order. A key that appears once maps to a `String`; a
//! repeated key maps to an `Array` of its `String` values.

use smallvec::SmallVec;
use sonda_core::{Document, Encoding, NodeType, Result, SondaError, Vector};
use std::borrow::Cow;
use url::Url;
use url::form_urlencoded;

/// URL query document
#[derive(Debug, Clone, Default)]
pub struct UrlVector {
    vec: Vector,
    url: Option<Url>,
}

type Pairs<'a> = Vec<(Cow<'a, str>, SmallVec<[Cow<'a, str>; 1]>)>;

impl UrlVector {
    /// Create an empty URL document
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vec: Vector::new(),
            url: None,
        }
    }

    /// Parse `src` into a new document
    ///
    /// # Errors
    ///
    /// Returns [`SondaError::Parse`] when `src` is not UTF-8.
    pub fn from_slice(src: &[u8]) -> Result<Self> {
        let mut doc = Self::new();
        doc.parse(src)?;
        Ok(doc)
    }

    /// Scheme of the parsed URL; `None` for bare query strings
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.url.as_ref().map(Url::scheme)
    }

    /// Host of the parsed URL
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.url.as_ref().and_then(Url::host_str)
    }

    /// Path of the parsed URL
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.url.as_ref().map(Url::path)
    }

    /// Fragment of the parsed URL
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.url.as_ref().and_then(Url::fragment)
    }

    fn build(&mut self, pairs: form_urlencoded::Parse<'_>) {
        let mut grouped: Pairs<'_> = Vec::new();
        for (key, value) in pairs {
            match grouped.iter_mut().find(|(k, _)| *k == key) {
                Some((_, values)) => values.push(value),
                None => grouped.push((key, smallvec::smallvec![value])),
            }
        }

        let root = self.vec.add_root(NodeType::Object, None, b"");
        for (key, values) in &grouped {
            if let [value] = values.as_slice() {
                self.vec
                    .add_child(root, NodeType::String, Some(key.as_bytes()), value.as_bytes());
            } else {
                let list = self
                    .vec
                    .add_child(root, NodeType::Array, Some(key.as_bytes()), b"");
                for value in values {
                    self.vec
                        .add_child(list, NodeType::String, None, value.as_bytes());
                }
            }
        }
    }
}

impl Document for UrlVector {
    fn encoding(&self) -> Encoding {
        Encoding::Url
    }

    fn parse(&mut self, src: &[u8]) -> Result<()> {
        self.reset();
        let text =
            std::str::from_utf8(src).map_err(|e| SondaError::parse(Encoding::Url, e))?;
        let text = text.trim();

        match Url::parse(text) {
            Ok(url) if !url.cannot_be_a_base() => {
                self.build(url.query_pairs());
                self.url = Some(url);
            }
            _ => {
                let query = text.strip_prefix('?').unwrap_or(text);
                self.build(form_urlencoded::parse(query.as_bytes()));
            }
        }
        Ok(())
    }

    fn vector(&self) -> &Vector {
        &self.vec
    }

    fn vector_mut(&mut self) -> &mut Vector {
        &mut self.vec
    }

    fn reset(&mut self) {
        self.vec.reset();
        self.url = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_query() {
        let doc = UrlVector::from_slice(b"?color=%23c3c3c3&margin=15&name=a+b").unwrap();
        assert_eq!(doc.get(&["color"]).string(), "#c3c3c3");
        assert_eq!(doc.get(&["margin"]).string(), "15");
        assert_eq!(doc.get(&["name"]).string(), "a b");
        assert_eq!(doc.scheme(), None);
    }

    #[test]
    fn test_absolute_url_parts() {
        let doc =
            UrlVector::from_slice(b"https://example.com/render/page?id=7&lang=en#top").unwrap();
        assert_eq!(doc.scheme(), Some("https"));
        assert_eq!(doc.host(), Some("example.com"));
        assert_eq!(doc.path(), Some("/render/page"));
        assert_eq!(doc.fragment(), Some("top"));
        assert_eq!(doc.get(&["id"]).string(), "7");
        assert_eq!(doc.root().len(), 2);
    }

    #[test]
    fn test_repeated_keys_become_array() {
        let doc = UrlVector::from_slice(b"tag=a&x=1&tag=b&tag=c").unwrap();
        let tags = doc.get(&["tag"]);
        assert_eq!(tags.typ(), NodeType::Array);
        let values: Vec<_> = tags.children().map(|n| n.string()).collect();
        assert_eq!(values, vec!["a", "b", "c"]);
        assert_eq!(doc.get(&["tag", "2"]).string(), "c");
        assert_eq!(doc.root().child(1).key(), Some("x"));
    }

    #[test]
    fn test_empty_query_is_empty_object() {
        let doc = UrlVector::from_slice(b"").unwrap();
        assert_eq!(doc.root().typ(), NodeType::Object);
        assert!(doc.root().is_empty());
    }

    #[test]
    fn test_reset_clears_url_parts() {
        let mut doc = UrlVector::from_slice(b"https://example.com/?a=1").unwrap();
        doc.reset();
        assert_eq!(doc.host(), None);
        assert!(doc.root().is_null());
    }
}
