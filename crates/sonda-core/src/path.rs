// SPDX-License-Identifier: MIT OR Apache-2.0
//! Path splitting
//!
//! Paths are ordered lists of string segments. Callers that receive paths as
//! a single separated string (`a.b.c`) split them here before resolution.

use smallvec::SmallVec;

/// Segments of one split path; short paths stay on the stack
pub type PathSegments<'a> = SmallVec<[&'a str; 8]>;

/// Split `path` on `sep`, dropping empty segments.
///
/// An empty path (or one made only of separators) yields no segments, which
/// resolves to the root.
#[must_use]
pub fn split_path<'a>(path: &'a str, sep: &str) -> PathSegments<'a> {
    if path.is_empty() {
        return SmallVec::new();
    }
    if sep.is_empty() {
        return smallvec::smallvec![path];
    }
    if let [b] = sep.as_bytes() {
        let bytes = path.as_bytes();
        let mut out = PathSegments::new();
        let mut start = 0;
        for pos in memchr::memchr_iter(*b, bytes) {
            if pos > start {
                out.push(&path[start..pos]);
            }
            start = pos + 1;
        }
        if start < path.len() {
            out.push(&path[start..]);
        }
        return out;
    }
    path.split(sep).filter(|s| !s.is_empty()).collect()
}
