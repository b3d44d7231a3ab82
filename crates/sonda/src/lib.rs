// SPDX-License-Identifier: MIT OR Apache-2.0
//! # sonda
//!
//! Uniform inspection of structured documents for template engines.
//!
//! A template engine renders the same template against JSON bodies, XML
//! feeds, URL query strings and `Accept-Language` headers. sonda parses each
//! of them into one arena tree model and exposes a single inspector that
//! reads, compares, iterates and serializes values without knowing which
//! backend produced them.
//!
//! ## Quick start
//!
//! ```
//! use sonda::{Document, Inspector, Op, Source, VectorInspector, json_pool};
//!
//! let ins = VectorInspector::new();
//! let mut doc = json_pool().acquire();
//! doc.parse(br#"{"inner_margin":{"value":15}}"#).unwrap();
//!
//! let src = Source::from(&*doc);
//! assert!(ins.compare(src, Op::LessThan, "18", &["inner_margin", "value"]).unwrap());
//! assert_eq!(ins.length(src, &["missing"]).unwrap(), 0);
//! doc.release();
//! ```
//!
//! ## Crates
//!
//! | Crate | Provides |
//! |-------|----------|
//! | `sonda-core` | node model, `Document` trait, operators, errors |
//! | `sonda-formats` | JSON, XML, URL and Accept-Language backends |
//! | `sonda-pool` | reusable document pools |
//! | `sonda-inspect` | the inspector facade and capability registry |

#![doc(html_root_url = "https://docs.rs/sonda/0.1.0")]
#![warn(missing_docs)]

pub use sonda_core::{
    Children, Document, Encoding, LoopCtl, Node, NodeId, NodeType, Op, Result, SondaError,
    Vector, split_path,
};
pub use sonda_formats::{HalVector, JsonVector, UrlVector, XmlVector};
pub use sonda_inspect::{
    DeepEqualOptions, EmptyCheckFn, Inspector, Looper, Registry, Source, SourceMut, ToBytesFn,
    Unmarshalled, VectorInspector, compare_node, init, iterate, node_empty_check, node_to_bytes,
    resolve, resolve_dotted,
};
pub use sonda_pool::{
    PoolProvider, PoolStats, PoolStatsSnapshot, PoolStrategy, Pooled, SharedPool, hal_pool,
    json_pool, url_pool, xml_pool,
};

/// Re-export of sonda-core.
pub use sonda_core as core;

/// Re-export of sonda-formats.
pub use sonda_formats as formats;

/// Re-export of sonda-inspect.
pub use sonda_inspect as inspect;

/// Re-export of sonda-pool.
pub use sonda_pool as pool;
