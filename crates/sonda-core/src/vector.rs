// SPDX-License-Identifier: MIT OR Apache-2.0
//! Arena-backed document tree
//!
//! A [`Vector`] stores every node of one document in a flat list and every
//! key and scalar value in one shared byte buffer. Node 0 is the root.
//! [`Vector::reset`] clears both while keeping their capacity, so a pooled
//! vector reparses without reallocating.

use crate::node::{Node, NodeType};
use crate::path::split_path;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::ops::Range;

/// Position of a node inside its [`Vector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node of every non-empty vector
    pub const ROOT: Self = Self(0);

    /// Arena index of the node
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeRecord {
    pub(crate) typ: NodeType,
    pub(crate) key: Option<Range<usize>>,
    pub(crate) value: Range<usize>,
    pub(crate) children: SmallVec<[usize; 4]>,
}

/// One parsed document tree
#[derive(Debug, Clone, Default)]
pub struct Vector {
    nodes: Vec<NodeRecord>,
    buf: Vec<u8>,
}

impl Vector {
    /// Create an empty vector
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            buf: Vec::new(),
        }
    }

    /// Create an empty vector with room for `nodes` nodes and `bytes` bytes
    /// of keys and values
    #[must_use]
    pub fn with_capacity(nodes: usize, bytes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            buf: Vec::with_capacity(bytes),
        }
    }

    /// Root node, or the missing node when nothing has been parsed
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        Node::new(self, (!self.nodes.is_empty()).then_some(0))
    }

    /// Resolve `path` from the root
    #[must_use]
    pub fn get(&self, path: &[&str]) -> Node<'_> {
        self.root().get(path)
    }

    /// Resolve a separator-joined path (`a.b.c`) from the root
    #[must_use]
    pub fn get_by_separator(&self, path: &str, sep: &str) -> Node<'_> {
        self.get(&split_path(path, sep))
    }

    /// Node stored at `id`
    #[must_use]
    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node::new(self, (id.0 < self.nodes.len()).then_some(id.0))
    }

    /// Wipe every node and byte, keeping allocated capacity
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.buf.clear();
    }

    /// True when no document is loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes in the arena
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocated (node, byte) capacity
    #[must_use]
    pub fn capacity(&self) -> (usize, usize) {
        (self.nodes.capacity(), self.buf.capacity())
    }

    /// Add the root node. The vector must be empty.
    pub fn add_root(&mut self, typ: NodeType, key: Option<&[u8]>, value: &[u8]) -> NodeId {
        debug_assert!(self.nodes.is_empty(), "root added to a non-empty vector");
        self.push(typ, key, value)
    }

    /// Add a node as the last child of `parent`
    pub fn add_child(
        &mut self,
        parent: NodeId,
        typ: NodeType,
        key: Option<&[u8]>,
        value: &[u8],
    ) -> NodeId {
        let id = self.push(typ, key, value);
        self.nodes[parent.0].children.push(id.0);
        id
    }

    /// Replace the type and value of an existing node
    pub fn set_value(&mut self, id: NodeId, typ: NodeType, value: &[u8]) {
        let value = self.store(value);
        let rec = &mut self.nodes[id.0];
        rec.typ = typ;
        rec.value = value;
    }

    /// Number of children currently attached to `id`
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.nodes.get(id.0).map_or(0, |rec| rec.children.len())
    }

    /// Stable-sort the children of `parent` with `compare`
    pub fn sort_children_by<F>(&mut self, parent: NodeId, mut compare: F)
    where
        F: FnMut(Node<'_>, Node<'_>) -> Ordering,
    {
        let mut children = std::mem::take(&mut self.nodes[parent.0].children);
        children.sort_by(|&a, &b| compare(self.node(NodeId(a)), self.node(NodeId(b))));
        self.nodes[parent.0].children = children;
    }

    pub(crate) fn record(&self, idx: usize) -> &NodeRecord {
        &self.nodes[idx]
    }

    pub(crate) fn bytes(&self, range: &Range<usize>) -> &[u8] {
        &self.buf[range.clone()]
    }

    fn push(&mut self, typ: NodeType, key: Option<&[u8]>, value: &[u8]) -> NodeId {
        let key = key.map(|k| self.store(k));
        let value = self.store(value);
        self.nodes.push(NodeRecord {
            typ,
            key,
            value,
            children: SmallVec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    fn store(&mut self, bytes: &[u8]) -> Range<usize> {
        let start = self.buf.len();
        self.buf.extend_from_slice(bytes);
        start..self.buf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vector {
        let mut vec = Vector::new();
        let root = vec.add_root(NodeType::Object, None, b"");
        let a = vec.add_child(root, NodeType::Object, Some(b"a"), b"");
        vec.add_child(a, NodeType::Number, Some(b"n"), b"15");
        let list = vec.add_child(root, NodeType::Array, Some(b"list"), b"");
        vec.add_child(list, NodeType::String, None, b"foo");
        vec.add_child(list, NodeType::String, None, b"bar");
        vec
    }

    #[test]
    fn test_empty_vector_root_is_null() {
        let vec = Vector::new();
        assert!(vec.is_empty());
        assert_eq!(vec.root().typ(), NodeType::Null);
    }

    #[test]
    fn test_get_by_key_and_index() {
        let vec = sample();
        assert_eq!(vec.get(&["a", "n"]).int(), Ok(15));
        assert_eq!(vec.get(&["list", "1"]).string(), "bar");
        assert_eq!(vec.get_by_separator("list.0", ".").string(), "foo");
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut vec = sample();
        let before = vec.capacity();
        vec.reset();
        assert!(vec.is_empty());
        assert_eq!(vec.node_count(), 0);
        assert_eq!(vec.capacity(), before);
        assert!(vec.get(&["a", "n"]).is_null());
    }

    #[test]
    fn test_set_value_retypes_node() {
        let mut vec = Vector::new();
        let root = vec.add_root(NodeType::Object, Some(b"title"), b"");
        vec.set_value(root, NodeType::String, b"hello");
        assert_eq!(vec.root().typ(), NodeType::String);
        assert_eq!(vec.root().string(), "hello");
        assert_eq!(vec.root().key(), Some("title"));
    }

    #[test]
    fn test_sort_children_is_stable() {
        let mut vec = Vector::new();
        let root = vec.add_root(NodeType::Array, None, b"");
        for v in [b"2", b"1", b"2", b"0"] {
            vec.add_child(root, NodeType::Number, None, v);
        }
        vec.sort_children_by(root, |a, b| a.bytes().cmp(b.bytes()));
        let got: Vec<&str> = vec.root().children().map(|n| n.string()).collect();
        assert_eq!(got, vec!["0", "1", "2", "2"]);
        assert_eq!(vec.child_count(root), 4);
    }

    #[test]
    fn test_node_out_of_range_is_missing() {
        let vec = sample();
        assert!(vec.node(NodeId(999)).is_null());
    }
}
