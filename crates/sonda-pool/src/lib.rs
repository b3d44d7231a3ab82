// SPDX-License-Identifier: MIT OR Apache-2.0
//! Document pooling for sonda
//!
//! Rendering the same template many times parses many short-lived documents.
//! A [`SharedPool`] keeps reset documents on a free list so their arenas are
//! reused instead of reallocated.
//!
//! Checked-out documents are wrapped in a [`Pooled`] guard. Releasing the
//! guard (explicitly or by dropping it) resets the document before it goes
//! back on the free list, and consumes the guard, so a released document can
//! no longer be read through it.
//!
//! ```
//! use sonda_core::Document;
//! use sonda_pool::json_pool;
//!
//! let mut doc = json_pool().acquire();
//! doc.parse(br#"{"a":1}"#).unwrap();
//! assert_eq!(doc.get(&["a"]).int(), Ok(1));
//! doc.release();
//! ```

#![warn(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Global per-backend pools
pub mod backends;
/// Type-erased pool view for registries
pub mod provider;
/// Thread-safe shared pool
pub mod shared;

pub use backends::{hal_pool, json_pool, url_pool, xml_pool};
pub use provider::PoolProvider;
pub use shared::{PoolStats, PoolStatsSnapshot, Pooled, SharedPool};

/// How many idle documents a pool keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolStrategy {
    /// Keep every released document
    #[default]
    Unbounded,
    /// Keep at most `max_documents` idle documents; drop the rest
    SizeLimited {
        /// Maximum number of idle documents
        max_documents: usize,
    },
}

impl PoolStrategy {
    /// True when a pool holding `idle` documents may keep one more
    #[must_use]
    pub const fn accepts(self, idle: usize) -> bool {
        match self {
            Self::Unbounded => true,
            Self::SizeLimited { max_documents } => idle < max_documents,
        }
    }
}
