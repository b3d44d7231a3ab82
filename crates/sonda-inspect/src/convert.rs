// SPDX-License-Identifier: MIT OR Apache-2.0
//! Hooks a template engine calls on values it got from an inspector

use crate::source::Source;
use sonda_core::{Result, SondaError};

/// Append the byte form of `val` to `dst`.
///
/// Leaves append their raw value; containers append compact JSON.
///
/// # Errors
///
/// Returns [`SondaError::UnknownType`] when `val` is not a node.
pub fn node_to_bytes(dst: &mut Vec<u8>, val: Source<'_>) -> Result<()> {
    let Source::Node(node) = val else {
        return Err(SondaError::UnknownType);
    };
    if node.is_container() {
        node.marshal_to(dst);
    } else {
        dst.extend_from_slice(node.bytes());
    }
    Ok(())
}

/// True when `val` is a Null node, which templates render as empty
#[must_use]
pub fn node_empty_check(val: Source<'_>) -> bool {
    matches!(val, Source::Node(node) if node.is_null())
}
