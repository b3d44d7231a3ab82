// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::source::Source;
use sonda_core::{Node, split_path};

/// Resolve `path` from `src`.
///
/// Returns `None` only when `src` cannot be read at all. A path that does not
/// exist resolves to the missing node, whose type is Null; an empty path
/// returns the starting node itself.
#[must_use]
pub fn resolve<'a>(src: &Source<'a>, path: &[&str]) -> Option<Node<'a>> {
    src.root().map(|root| root.get(path))
}

/// Resolve a separator-joined path such as `"a.b.0"`
#[must_use]
pub fn resolve_dotted<'a>(src: &Source<'a>, path: &str, sep: &str) -> Option<Node<'a>> {
    let segments = split_path(path, sep);
    resolve(src, &segments)
}
