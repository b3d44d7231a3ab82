// SPDX-License-Identifier: MIT OR Apache-2.0
//! # sonda-cli
//!
//! Command-line front end for the sonda inspector.
//!
//! ## Usage
//!
//! ```bash
//! # Read one value
//! sonda get inner_margin.value page.json
//!
//! # Evaluate a template condition
//! sonda cmp inner_margin.value '<' 18 page.json
//!
//! # Walk a container
//! sonda loop a.b.c data.json
//!
//! # Compare two documents, ignoring a subtree
//! sonda eq old.json new.json --exclude inner_padding
//!
//! # Other encodings
//! sonda --encoding xml get color settings.xml
//! echo 'fr-CH, fr;q=0.9, en;q=0.8' | sonda --encoding hal get 0.code
//! ```
//!
//! The command functions below back the binary and are usable on their own.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use serde_json::json;
use sonda_core::{Encoding, LoopCtl, Node, Op, split_path};
use sonda_inspect::{
    DeepEqualOptions, Inspector, Looper, Registry, Source, Unmarshalled, VectorInspector,
};
use tracing::debug;

/// Parse `src` as `encoding`
///
/// # Errors
///
/// Fails when the encoding has no backend or the input is malformed.
pub fn load(ins: &dyn Inspector, src: &[u8], encoding: Encoding) -> Result<Unmarshalled> {
    debug!(%encoding, bytes = src.len(), "loading input");
    ins.unmarshal(src, encoding)
        .with_context(|| format!("failed to read input as {encoding}"))
}

fn resolve<'a>(ins: &dyn Inspector, doc: &'a Unmarshalled, path: &str, sep: &str) -> Node<'a> {
    let segments = split_path(path, sep);
    match ins.get(doc.as_source(), &segments) {
        Ok(Some(node)) => node,
        _ => Node::null(),
    }
}

/// Describe the node at `path` as pretty JSON
///
/// # Errors
///
/// Fails only if the description cannot be serialized.
pub fn get(ins: &dyn Inspector, doc: &Unmarshalled, path: &str, sep: &str) -> Result<String> {
    let node = resolve(ins, doc, path, sep);
    let value = if node.is_container() {
        serde_json::from_str(&node.to_string())?
    } else {
        json!(node.string())
    };
    let out = json!({
        "type": node.typ().as_str(),
        "key": node.key(),
        "len": node.len(),
        "value": value,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

/// Evaluate `path op operand`
///
/// # Errors
///
/// Fails when `op` is not a known operator.
pub fn cmp(
    ins: &dyn Inspector,
    doc: &Unmarshalled,
    path: &str,
    sep: &str,
    op: &str,
    operand: &str,
) -> Result<bool> {
    let op: Op = op.parse()?;
    let segments = split_path(path, sep);
    Ok(ins.compare(doc.as_source(), op, operand, &segments)?)
}

struct Lines<'a> {
    key: String,
    val: Option<Node<'a>>,
    limit: Option<usize>,
    out: String,
    count: usize,
}

impl<'a> Looper<'a> for Lines<'a> {
    fn require_key(&self) -> bool {
        true
    }

    fn set_key(&mut self, key: &str) {
        self.key.clear();
        self.key.push_str(key);
    }

    fn set_val(&mut self, val: Node<'a>, _ins: &dyn Inspector) {
        self.val = Some(val);
    }

    fn iterate(&mut self) -> LoopCtl {
        if let Some(val) = self.val.take() {
            self.out.push_str(&self.key);
            self.out.push('\t');
            self.out.push_str(&val.to_string());
            self.out.push('\n');
            self.count += 1;
        }
        match self.limit {
            Some(limit) if self.count >= limit => LoopCtl::Break,
            _ => LoopCtl::Continue,
        }
    }
}

/// One `key<TAB>value` line per child of the container at `path`
///
/// # Errors
///
/// Unsupported sources iterate nothing; this only fails if the inspector
/// does.
pub fn loop_lines(
    ins: &dyn Inspector,
    doc: &Unmarshalled,
    path: &str,
    sep: &str,
    limit: Option<usize>,
) -> Result<String> {
    let segments = split_path(path, sep);
    let mut lines = Lines {
        key: String::new(),
        val: None,
        limit,
        out: String::new(),
        count: 0,
    };
    ins.loop_over(doc.as_source(), &mut lines, &segments)?;
    Ok(lines.out)
}

/// Child count of the node at `path`
///
/// # Errors
///
/// Fails only if the inspector does.
pub fn len(ins: &dyn Inspector, doc: &Unmarshalled, path: &str, sep: &str) -> Result<usize> {
    let segments = split_path(path, sep);
    Ok(ins.length(doc.as_source(), &segments)?)
}

/// Structural equality of two documents, skipping `exclude`d dotted paths
#[must_use]
pub fn eq(ins: &dyn Inspector, a: &Unmarshalled, b: &Unmarshalled, exclude: &[String]) -> bool {
    let opts = exclude
        .iter()
        .fold(DeepEqualOptions::new(), |opts, path| opts.exclude(path.as_str()));
    ins.deep_equal_with_options(a.as_source(), b.as_source(), Some(&opts))
}

/// Raw bytes of the node at `path`, through the registered converters
///
/// # Errors
///
/// Fails when no converter handles the value.
pub fn bytes(registry: &Registry, doc: &Unmarshalled, path: &str, sep: &str) -> Result<Vec<u8>> {
    let ins = registry
        .inspector(VectorInspector::new().type_name())
        .context("vector inspector is not registered")?;
    let node = resolve(ins, doc, path, sep);
    let mut out = Vec::new();
    registry
        .to_bytes(&mut out, Source::Node(node))
        .with_context(|| format!("cannot convert {path:?} to bytes"))?;
    Ok(out)
}
