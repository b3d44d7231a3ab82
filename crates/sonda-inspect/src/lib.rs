// SPDX-License-Identifier: MIT OR Apache-2.0
//! Uniform inspection of structured documents
//!
//! A template engine reads values out of JSON, XML, URL and Accept-Language
//! documents without knowing which backend produced them. Every entry point
//! takes a [`Source`], a closed set of the root and node types this crate
//! understands:
//!
//! - [`resolve`] - Path resolution from any source
//! - [`cmp`] - Typed comparison of a node against a string operand
//! - [`iterate`] - Driving a [`Looper`] over a container's children
//! - [`inspector`] - The [`Inspector`] facade and its [`VectorInspector`] implementation
//! - [`convert`] - Byte conversion and empty-check hooks
//! - [`registry`] - Explicit registration of the hooks above
//!
//! Missing values are data, not errors: an unknown path yields a Null node,
//! comparisons against it are false and its length is zero.
//!
//! ```
//! use sonda_core::Op;
//! use sonda_formats::JsonVector;
//! use sonda_inspect::{Inspector, Source, VectorInspector};
//!
//! let doc = JsonVector::from_slice(br#"{"inner_margin":{"value":15}}"#).unwrap();
//! let ins = VectorInspector::new();
//! let src = Source::from(&doc);
//! assert!(ins.compare(src, Op::LessThan, "18", &["inner_margin", "value"]).unwrap());
//! assert!(ins.get(src, &["nope"]).unwrap().unwrap().is_null());
//! ```

#![warn(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Typed comparator
pub mod cmp;
/// Byte conversion and empty-check hooks
pub mod convert;
/// Inspection facade
pub mod inspector;
/// Iteration adapter
pub mod iterate;
/// Deep-equality options
pub mod options;
/// Capability registry
pub mod registry;
/// Path resolution
pub mod resolve;
/// Closed set of inspectable sources
pub mod source;

pub use cmp::compare_node;
pub use convert::{node_empty_check, node_to_bytes};
pub use inspector::{Inspector, Unmarshalled, VectorInspector};
pub use iterate::{Looper, iterate};
pub use options::DeepEqualOptions;
pub use registry::{EmptyCheckFn, Registry, ToBytesFn, init};
pub use resolve::{resolve, resolve_dotted};
pub use source::{Source, SourceMut};
