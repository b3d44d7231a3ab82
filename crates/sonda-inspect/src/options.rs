// SPDX-License-Identifier: MIT OR Apache-2.0
//! Deep-equality options

use ahash::AHashSet;
use sonda_core::Node;

/// Tuning for [`crate::Inspector::deep_equal_with_options`]
#[derive(Debug, Clone, Default)]
pub struct DeepEqualOptions {
    exclude: AHashSet<String>,
}

impl DeepEqualOptions {
    /// Options that compare everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the subtree at dotted `path` (for example `"inner_padding.value"`).
    ///
    /// Array elements are addressed by position: `"items.2"`.
    #[must_use]
    pub fn exclude(mut self, path: impl Into<String>) -> Self {
        self.exclude.insert(path.into());
        self
    }

    /// True when the subtree at `path` is skipped
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude.contains(path)
    }

    /// True when nothing is excluded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exclude.is_empty()
    }

    /// Structural equality of `a` and `b`, skipping excluded subtrees
    #[must_use]
    pub fn equal(&self, a: Node<'_>, b: Node<'_>) -> bool {
        if self.is_empty() {
            return a.equal_with(&b);
        }
        let mut path = String::new();
        self.walk(a, b, &mut path)
    }

    fn walk(&self, a: Node<'_>, b: Node<'_>, path: &mut String) -> bool {
        if a.typ() != b.typ() || a.bytes() != b.bytes() || a.len() != b.len() {
            return false;
        }
        let mark = path.len();
        let mut index = itoa::Buffer::new();
        for (i, (ca, cb)) in a.children().zip(b.children()).enumerate() {
            if ca.key_bytes() != cb.key_bytes() {
                return false;
            }
            path.truncate(mark);
            if mark > 0 {
                path.push('.');
            }
            match ca.key() {
                Some(key) => path.push_str(key),
                None => path.push_str(index.format(i)),
            }
            if self.is_excluded(path) {
                continue;
            }
            if !self.walk(ca, cb, path) {
                path.truncate(mark);
                return false;
            }
        }
        path.truncate(mark);
        true
    }
}
