// SPDX-License-Identifier: MIT OR Apache-2.0
//! Structured-document backends for sonda
//!
//! Each backend parses one source encoding into a [`sonda_core::Vector`] and
//! implements [`sonda_core::Document`]:
//!
//! | Backend | Encoding | Input |
//! |---------|----------|-------|
//! | [`JsonVector`] | `json` | JSON text |
//! | [`XmlVector`] | `xml` | XML text |
//! | [`UrlVector`] | `url` | absolute URL or bare query string |
//! | [`HalVector`] | `hal` | HTTP `Accept-Language` header value |
//!
//! Parsing always starts from an empty tree, so a backend instance can be
//! reused for any number of documents.

#![warn(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// HTTP Accept-Language backend
pub mod hal;
/// JSON backend
pub mod json;
/// URL query backend
pub mod query;
/// XML backend
pub mod xml;

pub use hal::HalVector;
pub use json::JsonVector;
pub use query::UrlVector;
pub use xml::XmlVector;
