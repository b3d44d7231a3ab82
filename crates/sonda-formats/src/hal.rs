// SPDX-License-Identifier: MIT OR Apache-2.0
//! HTTP `Accept-Language` backend
//!
//! Parses header values such as `fr-CH, fr;q=0.9, en;q=0.8, *;q=0.5` into an
//! `Array` of language objects:
//!
//! ```text
//! [{"code":"fr","region":"CH","quality":1}, {"code":"fr","quality":0.9}, ...]
//! ```
//!
//! Entries are ordered by quality, highest first; ties keep header order.
//! Entries with a malformed or out-of-range `q` are dropped, as user agents
//! do. Accepted weights are stored in canonical JSON number form, so `q=.5`
//! reads back as `0.5` and `q=1.` as `1`.

use sonda_core::{Document, Encoding, NodeType, Result, SondaError, Vector};
use std::cmp::Ordering;

/// Accept-Language document
#[derive(Debug, Clone, Default)]
pub struct HalVector {
    vec: Vector,
}

#[derive(Debug, PartialEq)]
struct LanguageTag<'a> {
    code: &'a str,
    script: Option<&'a str>,
    region: Option<&'a str>,
    quality: f64,
}

impl HalVector {
    /// Create an empty Accept-Language document
    #[must_use]
    pub const fn new() -> Self {
        Self { vec: Vector::new() }
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

    /// Code of the most preferred language
    #[must_use]
    pub fn preferred(&self) -> Option<&str> {
        let code = self.vec.get(&["0", "code"]);
        code.exists().then(|| code.string())
    }
}

impl Document for HalVector {
    fn encoding(&self) -> Encoding {
        Encoding::Hal
    }

    fn parse(&mut self, src: &[u8]) -> Result<()> {
        self.vec.reset();
        let text =
            std::str::from_utf8(src).map_err(|e| SondaError::parse(Encoding::Hal, e))?;

        let root = self.vec.add_root(NodeType::Array, None, b"");
        let mut weight = ryu::Buffer::new();
        for tag in text.split(',').filter_map(parse_entry) {
            let lang = self.vec.add_child(root, NodeType::Object, None, b"");
            self.vec
                .add_child(lang, NodeType::String, Some(b"code"), tag.code.as_bytes());
            if let Some(script) = tag.script {
                self.vec
                    .add_child(lang, NodeType::String, Some(b"script"), script.as_bytes());
            }
            if let Some(region) = tag.region {
                self.vec
                    .add_child(lang, NodeType::String, Some(b"region"), region.as_bytes());
            }
            let quality = weight.format_finite(tag.quality);
            let quality = quality.strip_suffix(".0").unwrap_or(quality);
            self.vec
                .add_child(lang, NodeType::Number, Some(b"quality"), quality.as_bytes());
        }

        self.vec.sort_children_by(root, |a, b| {
            let qa = a.get(&["quality"]).float().unwrap_or_default();
            let qb = b.get(&["quality"]).float().unwrap_or_default();
            qb.partial_cmp(&qa).unwrap_or(Ordering::Equal)
        });
        Ok(())
    }

    fn vector(&self) -> &Vector {
        &self.vec
    }

    fn vector_mut(&mut self) -> &mut Vector {
        &mut self.vec
    }
}

fn parse_entry(entry: &str) -> Option<LanguageTag<'_>> {
    let mut parts = entry.split(';');
    let tag = parts.next()?.trim();
    if tag.is_empty() {
        return None;
    }

    let mut quality = 1.0;
    for param in parts {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("q") {
            let q: f64 = value.trim().parse().ok()?;
            if !(0.0..=1.0).contains(&q) {
                return None;
            }
            quality = q.abs();
        }
    }

    let mut subtags = tag.split('-');
    let code = subtags.next()?;
    let mut script = None;
    let mut region = None;
    for sub in subtags {
        let alpha = sub.bytes().all(|b| b.is_ascii_alphabetic());
        let digit = sub.bytes().all(|b| b.is_ascii_digit());
        match sub.len() {
            4 if alpha && script.is_none() && region.is_none() => script = Some(sub),
            2 if alpha && region.is_none() => region = Some(sub),
            3 if digit && region.is_none() => region = Some(sub),
            _ => {}
        }
    }

    Some(LanguageTag {
        code,
        script,
        region,
        quality,
    })
}
