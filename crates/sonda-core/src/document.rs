// SPDX-License-Identifier: MIT OR Apache-2.0
//! Backend capability trait
//!
//! Every structured-document backend owns a [`Vector`] and knows how to fill
//! it from bytes. The inspection layer only ever talks to backends through
//! this trait and the [`Node`] handles it hands out.

use crate::encoding::Encoding;
use crate::error::Result;
use crate::node::Node;
use crate::vector::Vector;

/// A parsed structured document
pub trait Document {
    /// Encoding this backend parses
    fn encoding(&self) -> Encoding;

    /// Replace the current contents with the document parsed from `src`.
    ///
    /// Implementations reset before parsing, so no state from a previous
    /// parse survives.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SondaError::Parse`] when `src` is malformed.
    fn parse(&mut self, src: &[u8]) -> Result<()>;

    /// Tree backing the document
    fn vector(&self) -> &Vector;

    /// Mutable tree backing the document
    fn vector_mut(&mut self) -> &mut Vector;

    /// Parse from a string slice
    ///
    /// # Errors
    ///
    /// See [`Document::parse`].
    fn parse_str(&mut self, src: &str) -> Result<()> {
        self.parse(src.as_bytes())
    }

    /// Root node
    fn root(&self) -> Node<'_> {
        self.vector().root()
    }

    /// Resolve `path` from the root
    fn get(&self, path: &[&str]) -> Node<'_> {
        self.vector().get(path)
    }

    /// Wipe the document back to its empty state
    fn reset(&mut self) {
        self.vector_mut().reset();
    }
}
