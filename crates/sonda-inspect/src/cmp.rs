// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed comparison of a node against a string operand
//!
//! Templates write conditions like `{% if margin < 18 %}`, so the right side
//! always arrives as text. The node's type decides how that text is read:
//!
//! - `String`, `Attr` and `Bool` nodes compare as strings, byte-wise
//! - `Number` nodes try the operand as a signed integer, then an unsigned
//!   integer, then a float, and compare natively in the first kind that
//!   parses
//! - every other type compares false
//!
//! Integer operands use prefixed literal syntax: an optional sign, `0x`,
//! `0o` or `0b` prefixes, a bare leading `0` for octal, and `_` between
//! digits. Float operands also take hexadecimal mantissas with a binary
//! exponent, such as `0x1.8p3`. An operand that parses as none of the three
//! kinds compares false.

use sonda_core::{Node, NodeType, Op};
use std::borrow::Cow;

/// Compare `node` against `right` under `op`
#[must_use]
pub fn compare_node(node: Node<'_>, op: Op, right: &str) -> bool {
    match node.typ() {
        NodeType::String | NodeType::Attr | NodeType::Bool => op.eval(node.string(), right),
        NodeType::Number => compare_number(node, op, right),
        NodeType::Null | NodeType::Object | NodeType::Array => false,
    }
}

fn compare_number(node: Node<'_>, op: Op, right: &str) -> bool {
    if let Some(r) = parse_int(right) {
        op.eval(&node.int().unwrap_or_default(), &r)
    } else if let Some(r) = parse_uint(right) {
        op.eval(&node.uint().unwrap_or_default(), &r)
    } else if let Some(r) = parse_float(right) {
        op.eval(&node.float().unwrap_or_default(), &r)
    } else {
        false
    }
}

/// Parse a signed integer literal
#[must_use]
pub fn parse_int(s: &str) -> Option<i64> {
    if !underscore_ok(s) {
        return None;
    }
    let (neg, body) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let magnitude = parse_digits(body)?;
    if neg {
        0_i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

/// Parse an unsigned integer literal; signs are rejected
#[must_use]
pub fn parse_uint(s: &str) -> Option<u64> {
    if !underscore_ok(s) {
        return None;
    }
    parse_digits(s)
}

/// Parse a float literal, accepting `_` between digits and hexadecimal
/// `0x<mantissa>p<exponent>` forms
#[must_use]
pub fn parse_float(s: &str) -> Option<f64> {
    let s: Cow<'_, str> = if s.contains('_') {
        if !underscore_ok(s) {
            return None;
        }
        Cow::Owned(s.replace('_', ""))
    } else {
        Cow::Borrowed(s)
    };
    s.parse().ok().or_else(|| parse_hex_float(&s))
}

// The `p` exponent is mandatory and scales by powers of two.
fn parse_hex_float(s: &str) -> Option<f64> {
    let (neg, body) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))?;
    let (mantissa, exp) = digits.split_once(['p', 'P'])?;
    let exp: i32 = exp.parse().ok()?;

    let mut value = 0.0_f64;
    let mut scale = 0_i32;
    let mut point = false;
    let mut seen = false;
    for b in mantissa.bytes() {
        if b == b'.' && !point {
            point = true;
            continue;
        }
        let d = char::from(b).to_digit(16)?;
        value = value.mul_add(16.0, f64::from(d));
        if point {
            scale = scale.checked_sub(4)?;
        }
        seen = true;
    }
    if !seen {
        return None;
    }
    let value = value * 2_f64.powi(exp.checked_add(scale)?);
    value
        .is_finite()
        .then_some(if neg { -value } else { value })
}

fn parse_digits(s: &str) -> Option<u64> {
    let (radix, digits) = split_radix(s);
    let mut value: u64 = 0;
    let mut seen = false;
    for b in digits.bytes() {
        if b == b'_' {
            continue;
        }
        let d = char::from(b).to_digit(radix)?;
        value = value
            .checked_mul(u64::from(radix))?
            .checked_add(u64::from(d))?;
        seen = true;
    }
    seen.then_some(value)
}

fn split_radix(s: &str) -> (u32, &str) {
    let bytes = s.as_bytes();
    match bytes {
        [b'0', b'x' | b'X', ..] => (16, &s[2..]),
        [b'0', b'o' | b'O', ..] => (8, &s[2..]),
        [b'0', b'b' | b'B', ..] => (2, &s[2..]),
        [b'0', _, ..] => (8, &s[1..]),
        _ => (10, s),
    }
}

// `_` may only sit between digits, or between a base prefix and a digit.
fn underscore_ok(s: &str) -> bool {
    #[derive(PartialEq, Eq)]
    enum Saw {
        Start,
        Digit,
        Underscore,
        Other,
    }

    let mut bytes = s.as_bytes();
    if let [b'+' | b'-', rest @ ..] = bytes {
        bytes = rest;
    }
    let mut saw = Saw::Start;
    let mut hex = false;
    if let [b'0', p, rest @ ..] = bytes {
        if matches!(p.to_ascii_lowercase(), b'b' | b'o' | b'x') {
            saw = Saw::Digit;
            hex = p.to_ascii_lowercase() == b'x';
            bytes = rest;
        }
    }
    for &b in bytes {
        if b.is_ascii_digit() || (hex && b.is_ascii_hexdigit()) {
            saw = Saw::Digit;
        } else if b == b'_' {
            if saw != Saw::Digit {
                return false;
            }
            saw = Saw::Underscore;
        } else if saw == Saw::Underscore {
            return false;
        } else {
            saw = Saw::Other;
        }
    }
    saw != Saw::Underscore
}
