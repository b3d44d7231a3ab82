// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types, error handling, and the node model for sonda
//!
//! This crate provides the foundational types shared by every sonda backend:
//!
//! - [`error`] - Error types and Result alias
//! - [`node`] - Read-only node handles and node types
//! - [`vector`] - Arena holding one parsed document tree
//! - [`document`] - Capability trait implemented by every backend
//! - [`encoding`] - Closed set of source encodings
//! - [`ops`] - Comparison operators and loop control signals
//! - [`path`] - Dotted path splitting

#![warn(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Backend capability trait
pub mod document;
/// Source encoding tags
pub mod encoding;
/// Error types for sonda operations
pub mod error;
/// Node handles and node types
pub mod node;
/// Comparison operators and loop control
pub mod ops;
/// Path splitting utilities
pub mod path;
/// Arena-backed document tree
pub mod vector;

// Re-exports for convenience
pub use document::Document;
pub use encoding::Encoding;
pub use error::{Result, SondaError};
pub use node::{Children, Node, NodeType};
pub use ops::{LoopCtl, Op};
pub use path::{PathSegments, split_path};
pub use vector::{NodeId, Vector};
