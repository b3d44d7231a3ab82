// SPDX-License-Identifier: MIT OR Apache-2.0
//! Inspection facade
//!
//! [`Inspector`] is the object-safe contract a template engine calls;
//! [`VectorInspector`] implements it for every [`Source`]. The facade holds no
//! state: each call dispatches on the source variant, resolves the path and
//! hands the node to the comparator, the iteration adapter or the equality
//! walk.

use crate::cmp::compare_node;
use crate::iterate::{Looper, iterate};
use crate::options::DeepEqualOptions;
use crate::resolve::resolve;
use crate::source::{Source, SourceMut};
use sonda_core::{Document, Encoding, Node, Op, Result, SondaError, Vector};
use sonda_formats::{HalVector, JsonVector, UrlVector, XmlVector};
use tracing::debug;

/// Polymorphic read access to structured documents
pub trait Inspector: Send + Sync {
    /// Name the inspector is registered under
    fn type_name(&self) -> &'static str;

    /// Resolve `path` in `src`.
    ///
    /// Returns `None` when `src` is `Nil` or unsupported, and the Null-typed
    /// missing node when the path does not exist.
    ///
    /// # Errors
    ///
    /// Implementations may fail on sources they cannot read; this one never
    /// does.
    fn get<'a>(&self, src: Source<'a>, path: &[&str]) -> Result<Option<Node<'a>>>;

    /// Compare the node at `path` against `right` under `op`
    ///
    /// # Errors
    ///
    /// Unsupported sources compare false rather than failing.
    fn compare(&self, src: Source<'_>, op: Op, right: &str, path: &[&str]) -> Result<bool>;

    /// Drive `looper` over the children of the container at `path`
    ///
    /// # Errors
    ///
    /// Unsupported sources iterate nothing rather than failing.
    fn loop_over<'a>(
        &self,
        src: Source<'a>,
        looper: &mut dyn Looper<'a>,
        path: &[&str],
    ) -> Result<()>;

    /// Structural equality of the roots of `a` and `b`
    fn deep_equal(&self, a: Source<'_>, b: Source<'_>) -> bool {
        self.deep_equal_with_options(a, b, None)
    }

    /// Structural equality, skipping the subtrees `opts` excludes
    fn deep_equal_with_options(
        &self,
        a: Source<'_>,
        b: Source<'_>,
        opts: Option<&DeepEqualOptions>,
    ) -> bool;

    /// Child count of the node at `path`; 0 for scalars and misses
    ///
    /// # Errors
    ///
    /// Unsupported sources have length 0 rather than failing.
    fn length(&self, src: Source<'_>, path: &[&str]) -> Result<usize>;

    /// Capacity of the node at `path`
    ///
    /// # Errors
    ///
    /// See [`Inspector::length`].
    fn capacity(&self, src: Source<'_>, path: &[&str]) -> Result<usize>;

    /// Wipe `src` back to its empty state
    ///
    /// # Errors
    ///
    /// Returns [`SondaError::UnsupportedType`] for `Other` sources.
    fn reset(&self, src: SourceMut<'_>) -> Result<()>;

    /// Parse `src` with the backend for `encoding`
    ///
    /// # Errors
    ///
    /// Returns [`SondaError::UnknownEncoding`] when no backend handles
    /// `encoding`, and the backend's parse error when `src` is malformed.
    fn unmarshal(&self, src: &[u8], encoding: Encoding) -> Result<Unmarshalled>;

    /// Copy of `src`; documents are immutable here, so this is `src` itself
    ///
    /// # Errors
    ///
    /// This implementation never fails.
    fn copy<'a>(&self, src: Source<'a>) -> Result<Source<'a>>;

    /// Write `value` at `path` in `dst`
    ///
    /// # Errors
    ///
    /// This implementation never fails.
    fn set(&self, dst: SourceMut<'_>, value: Source<'_>, path: &[&str]) -> Result<()>;
}

/// Inspector for every [`Source`] variant
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorInspector;

impl VectorInspector {
    /// Create the inspector
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Inspector for VectorInspector {
    fn type_name(&self) -> &'static str {
        "vector"
    }

    fn get<'a>(&self, src: Source<'a>, path: &[&str]) -> Result<Option<Node<'a>>> {
        Ok(resolve(&src, path))
    }

    fn compare(&self, src: Source<'_>, op: Op, right: &str, path: &[&str]) -> Result<bool> {
        Ok(resolve(&src, path).is_some_and(|node| compare_node(node, op, right)))
    }

    fn loop_over<'a>(
        &self,
        src: Source<'a>,
        looper: &mut dyn Looper<'a>,
        path: &[&str],
    ) -> Result<()> {
        if let Some(node) = resolve(&src, path) {
            iterate(node, looper);
        }
        Ok(())
    }

    fn deep_equal_with_options(
        &self,
        a: Source<'_>,
        b: Source<'_>,
        opts: Option<&DeepEqualOptions>,
    ) -> bool {
        let (Some(a), Some(b)) = (a.root(), b.root()) else {
            return false;
        };
        match opts {
            Some(opts) => opts.equal(a, b),
            None => a.equal_with(&b),
        }
    }

    fn length(&self, src: Source<'_>, path: &[&str]) -> Result<usize> {
        Ok(resolve(&src, path).map_or(0, |node| node.len()))
    }

    // Nodes are fully built arenas with no spare slots, so capacity is the
    // child count.
    fn capacity(&self, src: Source<'_>, path: &[&str]) -> Result<usize> {
        self.length(src, path)
    }

    fn reset(&self, src: SourceMut<'_>) -> Result<()> {
        match src {
            SourceMut::Nil | SourceMut::Node(_) => {}
            SourceMut::Json(doc) => doc.reset(),
            SourceMut::Xml(doc) => doc.reset(),
            SourceMut::Url(doc) => doc.reset(),
            SourceMut::Hal(doc) => doc.reset(),
            SourceMut::Vector(vec) => vec.reset(),
            SourceMut::Other(_) => return Err(SondaError::UnsupportedType),
        }
        Ok(())
    }

    fn unmarshal(&self, src: &[u8], encoding: Encoding) -> Result<Unmarshalled> {
        debug!(%encoding, len = src.len(), "unmarshalling");
        match encoding {
            Encoding::Json => JsonVector::from_slice(src).map(Unmarshalled::Json),
            Encoding::Xml => XmlVector::from_slice(src).map(Unmarshalled::Xml),
            Encoding::Url => UrlVector::from_slice(src).map(Unmarshalled::Url),
            Encoding::Hal => HalVector::from_slice(src).map(Unmarshalled::Hal),
            Encoding::Yaml | Encoding::Toml => {
                Err(SondaError::UnknownEncoding(encoding.to_string()))
            }
        }
    }

    fn copy<'a>(&self, src: Source<'a>) -> Result<Source<'a>> {
        Ok(src)
    }

    fn set(&self, _dst: SourceMut<'_>, _value: Source<'_>, _path: &[&str]) -> Result<()> {
        Ok(())
    }
}

/// Document produced by [`Inspector::unmarshal`]
#[derive(Debug, Clone)]
pub enum Unmarshalled {
    /// JSON document
    Json(JsonVector),
    /// XML document
    Xml(XmlVector),
    /// URL query
    Url(UrlVector),
    /// Accept-Language header
    Hal(HalVector),
}

impl Unmarshalled {
    /// Read-only view for the inspector
    #[must_use]
    pub const fn as_source(&self) -> Source<'_> {
        match self {
            Self::Json(doc) => Source::Json(doc),
            Self::Xml(doc) => Source::Xml(doc),
            Self::Url(doc) => Source::Url(doc),
            Self::Hal(doc) => Source::Hal(doc),
        }
    }

    /// Mutable view for [`Inspector::reset`]
    pub fn as_source_mut(&mut self) -> SourceMut<'_> {
        match self {
            Self::Json(doc) => SourceMut::Json(doc),
            Self::Xml(doc) => SourceMut::Xml(doc),
            Self::Url(doc) => SourceMut::Url(doc),
            Self::Hal(doc) => SourceMut::Hal(doc),
        }
    }

    fn document(&self) -> &dyn Document {
        match self {
            Self::Json(doc) => doc,
            Self::Xml(doc) => doc,
            Self::Url(doc) => doc,
            Self::Hal(doc) => doc,
        }
    }

    fn document_mut(&mut self) -> &mut dyn Document {
        match self {
            Self::Json(doc) => doc,
            Self::Xml(doc) => doc,
            Self::Url(doc) => doc,
            Self::Hal(doc) => doc,
        }
    }
}

impl Document for Unmarshalled {
    fn encoding(&self) -> Encoding {
        self.document().encoding()
    }

    fn parse(&mut self, src: &[u8]) -> Result<()> {
        self.document_mut().parse(src)
    }

    fn vector(&self) -> &Vector {
        self.document().vector()
    }

    fn vector_mut(&mut self) -> &mut Vector {
        self.document_mut().vector_mut()
    }

    fn reset(&mut self) {
        self.document_mut().reset();
    }
}

impl<'a> From<&'a Unmarshalled> for Source<'a> {
    fn from(doc: &'a Unmarshalled) -> Self {
        doc.as_source()
    }
}

impl<'a> From<&'a mut Unmarshalled> for SourceMut<'a> {
    fn from(doc: &'a mut Unmarshalled) -> Self {
        doc.as_source_mut()
    }
}
