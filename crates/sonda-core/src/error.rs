// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for sonda operations
//!
//! Missing paths and failed operand parses are not errors: they surface as
//! Null nodes, `false` and zero values. The variants below are reserved for
//! bad operand types, bad encodings and malformed input.

use crate::encoding::Encoding;
use crate::node::NodeType;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while parsing or inspecting documents
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SondaError {
    /// The operand is neither a supported document root nor a node
    #[error("unsupported source type")]
    UnsupportedType,

    /// Unmarshal was asked for an encoding that has no backend
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    /// A comparison operator symbol was not recognised
    #[error("unknown comparison operator: {0}")]
    InvalidOperator(String),

    /// Byte conversion was asked for a value that is not a node
    #[error("unknown value type for byte conversion")]
    UnknownType,

    /// A node could not be read as the requested scalar kind
    #[error("cannot coerce {from} node to {to}")]
    Coercion {
        /// Type of the node being coerced
        from: NodeType,
        /// Requested scalar kind
        to: &'static str,
    },

    /// The backend parser rejected its input
    #[error("{encoding} parse error: {message}")]
    Parse {
        /// Encoding of the rejected input
        encoding: Encoding,
        /// Parser message
        message: String,
    },
}

impl SondaError {
    /// Build a parse error from any displayable parser error
    pub fn parse(encoding: Encoding, err: impl fmt::Display) -> Self {
        Self::Parse {
            encoding,
            message: err.to_string(),
        }
    }
}

/// Result type alias for sonda operations
pub type Result<T> = std::result::Result<T, SondaError>;
