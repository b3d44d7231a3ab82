// SPDX-License-Identifier: MIT OR Apache-2.0
//! Read-only node handles
//!
//! A [`Node`] is a cheap `Copy` handle into a [`Vector`]. Resolution never
//! fails: an unknown key or index yields the canonical missing node, whose
//! type is [`NodeType::Null`].

use crate::error::{Result, SondaError};
use crate::vector::Vector;
use std::fmt;
use std::slice;

static EMPTY: Vector = Vector::new();

/// Type tag of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeType {
    /// Null value, also used for missing nodes
    #[default]
    Null,
    /// Key-addressed container
    Object,
    /// Index-addressed container
    Array,
    /// String scalar
    String,
    /// Numeric scalar kept in its textual form
    Number,
    /// Boolean scalar
    Bool,
    /// Attribute scalar (XML attributes)
    Attr,
}

impl NodeType {
    /// True for `Object` and `Array`
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }

    /// Lower-case name of the type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Attr => "attr",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to one node of a [`Vector`]
#[derive(Clone, Copy)]
pub struct Node<'a> {
    vec: &'a Vector,
    idx: Option<usize>,
}

impl<'a> Node<'a> {
    pub(crate) const fn new(vec: &'a Vector, idx: Option<usize>) -> Self {
        Self { vec, idx }
    }

    /// The canonical missing node
    #[must_use]
    pub fn null() -> Node<'static> {
        Node {
            vec: &EMPTY,
            idx: None,
        }
    }

    /// Type of the node; `Null` for the missing node
    #[must_use]
    pub fn typ(&self) -> NodeType {
        self.idx.map_or(NodeType::Null, |i| self.vec.record(i).typ)
    }

    /// True for Null nodes, including the missing node
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.typ() == NodeType::Null
    }

    /// True when this handle points at an arena node
    #[must_use]
    pub const fn exists(&self) -> bool {
        self.idx.is_some()
    }

    /// True for `Object` and `Array` nodes
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.typ().is_container()
    }

    /// Raw key bytes, if the node has a key
    #[must_use]
    pub fn key_bytes(&self) -> Option<&'a [u8]> {
        let i = self.idx?;
        let vec: &'a Vector = self.vec;
        vec.record(i).key.as_ref().map(|r| vec.bytes(r))
    }

    /// Key of the node within its parent object
    #[must_use]
    pub fn key(&self) -> Option<&'a str> {
        self.key_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Raw value bytes; empty for containers and Null
    #[must_use]
    pub fn bytes(&self) -> &'a [u8] {
        let vec: &'a Vector = self.vec;
        match self.idx {
            Some(i) => vec.bytes(&vec.record(i).value),
            None => &[],
        }
    }

    /// Value as text; empty for containers and Null
    #[must_use]
    pub fn string(&self) -> &'a str {
        std::str::from_utf8(self.bytes()).unwrap_or_default()
    }

    /// Value as a signed integer
    ///
    /// # Errors
    ///
    /// Returns [`SondaError::Coercion`] for non-numeric nodes and for numbers
    /// that are not integers in range.
    pub fn int(&self) -> Result<i64> {
        self.numeric("int")?.parse().map_err(|_| self.coercion("int"))
    }

    /// Value as an unsigned integer
    ///
    /// # Errors
    ///
    /// Returns [`SondaError::Coercion`] for non-numeric nodes and for numbers
    /// that are not non-negative integers in range.
    pub fn uint(&self) -> Result<u64> {
        self.numeric("uint")?.parse().map_err(|_| self.coercion("uint"))
    }

    /// Value as a float
    ///
    /// # Errors
    ///
    /// Returns [`SondaError::Coercion`] for non-numeric nodes.
    pub fn float(&self) -> Result<f64> {
        self.numeric("float")?.parse().map_err(|_| self.coercion("float"))
    }

    /// True only for a Bool node holding `true`
    #[must_use]
    pub fn bool(&self) -> bool {
        self.typ() == NodeType::Bool && self.bytes() == b"true"
    }

    /// Number of children; 0 for scalars and the missing node
    #[must_use]
    pub fn len(&self) -> usize {
        self.idx.map_or(0, |i| self.vec.record(i).children.len())
    }

    /// True when the node has no children
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Child at `index`, in document order
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let idx = self
            .idx
            .and_then(|i| self.vec.record(i).children.get(index).copied());
        Self::new(self.vec, idx)
    }

    /// First child whose key equals `key`
    #[must_use]
    pub fn child_by_key(&self, key: &str) -> Self {
        let found = self.children().find(|c| c.key_bytes() == Some(key.as_bytes()));
        found.unwrap_or_else(|| Self::new(self.vec, None))
    }

    /// Resolve `path` relative to this node.
    ///
    /// Objects are searched by key first; a segment that parses as a decimal
    /// index then selects a child by position. Every other miss yields the
    /// missing node.
    #[must_use]
    pub fn get(&self, path: &[&str]) -> Self {
        path.iter().fold(*self, |node, segment| node.step(segment))
    }

    fn step(self, segment: &str) -> Self {
        match self.typ() {
            NodeType::Object => {
                let by_key = self.child_by_key(segment);
                if by_key.exists() {
                    return by_key;
                }
                segment
                    .parse::<usize>()
                    .map_or_else(|_| Self::new(self.vec, None), |i| self.child(i))
            }
            NodeType::Array => segment
                .parse::<usize>()
                .map_or_else(|_| Self::new(self.vec, None), |i| self.child(i)),
            _ => Self::new(self.vec, None),
        }
    }

    /// Iterate over children in document order
    #[must_use]
    pub fn children(&self) -> Children<'a> {
        let vec: &'a Vector = self.vec;
        let ids: &'a [usize] = match self.idx {
            Some(i) => vec.record(i).children.as_slice(),
            None => &[],
        };
        Children {
            vec,
            ids: ids.iter(),
        }
    }

    /// Call `f` with the position and handle of every child
    pub fn each<F: FnMut(usize, Node<'a>)>(&self, mut f: F) {
        for (i, child) in self.children().enumerate() {
            f(i, child);
        }
    }

    /// Structural equality: same type and value, same child count, and
    /// children (with their keys) pairwise equal in order.
    ///
    /// The keys of `self` and `other` themselves are not compared, so
    /// subtrees found under different names can still be equal.
    #[must_use]
    pub fn equal_with(&self, other: &Node<'_>) -> bool {
        if self.typ() != other.typ() || self.bytes() != other.bytes() || self.len() != other.len()
        {
            return false;
        }
        self.children()
            .zip(other.children())
            .all(|(a, b)| a.key_bytes() == b.key_bytes() && a.equal_with(&b))
    }

    /// Append a compact JSON rendering of the subtree to `dst`
    pub fn marshal_to(&self, dst: &mut Vec<u8>) {
        match self.typ() {
            NodeType::Null => dst.extend_from_slice(b"null"),
            NodeType::Bool | NodeType::Number => dst.extend_from_slice(self.bytes()),
            NodeType::String | NodeType::Attr => write_json_string(dst, self.bytes()),
            NodeType::Array => {
                dst.push(b'[');
                for (i, child) in self.children().enumerate() {
                    if i > 0 {
                        dst.push(b',');
                    }
                    child.marshal_to(dst);
                }
                dst.push(b']');
            }
            NodeType::Object => {
                dst.push(b'{');
                for (i, child) in self.children().enumerate() {
                    if i > 0 {
                        dst.push(b',');
                    }
                    write_json_string(dst, child.key_bytes().unwrap_or_default());
                    dst.push(b':');
                    child.marshal_to(dst);
                }
                dst.push(b'}');
            }
        }
    }

    fn numeric(&self, to: &'static str) -> Result<&'a str> {
        if self.typ() == NodeType::Number {
            Ok(self.string())
        } else {
            Err(self.coercion(to))
        }
    }

    fn coercion(&self, to: &'static str) -> SondaError {
        SondaError::Coercion {
            from: self.typ(),
            to,
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("type", &self.typ())
            .field("key", &self.key())
            .field("value", &self.string())
            .field("children", &self.len())
            .finish()
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_container() {
            let mut buf = Vec::new();
            self.marshal_to(&mut buf);
            f.write_str(&String::from_utf8_lossy(&buf))
        } else {
            f.write_str(self.string())
        }
    }
}

/// Iterator over the children of a node
#[derive(Debug, Clone)]
pub struct Children<'a> {
    vec: &'a Vector,
    ids: slice::Iter<'a, usize>,
}

impl<'a> Iterator for Children<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|&i| Node::new(self.vec, Some(i)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|&i| Node::new(self.vec, Some(i)))
    }
}

impl ExactSizeIterator for Children<'_> {}

fn write_json_string(dst: &mut Vec<u8>, s: &[u8]) {
    dst.push(b'"');
    let mut rest = s;
    while let Some(pos) = rest
        .iter()
        .position(|&b| b == b'"' || b == b'\\' || b < 0x20)
    {
        dst.extend_from_slice(&rest[..pos]);
        match rest[pos] {
            b'"' => dst.extend_from_slice(b"\\\""),
            b'\\' => dst.extend_from_slice(b"\\\\"),
            b'\n' => dst.extend_from_slice(b"\\n"),
            b'\r' => dst.extend_from_slice(b"\\r"),
            b'\t' => dst.extend_from_slice(b"\\t"),
            c => {
                const HEX: &[u8; 16] = b"0123456789abcdef";
                dst.extend_from_slice(b"\\u00");
                dst.push(HEX[usize::from(c >> 4)]);
                dst.push(HEX[usize::from(c & 0xf)]);
            }
        }
        rest = &rest[pos + 1..];
    }
    dst.extend_from_slice(rest);
    dst.push(b'"');
}
