// SPDX-License-Identifier: MIT OR Apache-2.0
//! Capability registry
//!
//! A hosting template engine owns one [`Registry`] and passes it to [`init`]
//! once at start-up. Nothing here is global, so tests can build as many
//! registries as they like.

use crate::convert::{node_empty_check, node_to_bytes};
use crate::inspector::{Inspector, VectorInspector};
use crate::source::Source;
use ahash::AHashMap;
use sonda_core::{Result, SondaError};
use sonda_pool::{PoolProvider, hal_pool, json_pool, url_pool, xml_pool};
use std::fmt;
use tracing::debug;

/// Predicate telling a template whether a value renders as empty
pub type EmptyCheckFn = fn(Source<'_>) -> bool;

/// Converter appending the byte form of a value; fails with
/// [`SondaError::UnknownType`] for values it does not handle
pub type ToBytesFn = fn(&mut Vec<u8>, Source<'_>) -> Result<()>;

/// Named capabilities available to a template engine
#[derive(Default)]
pub struct Registry {
    inspectors: AHashMap<&'static str, Box<dyn Inspector>>,
    empty_checks: AHashMap<&'static str, EmptyCheckFn>,
    to_bytes: Vec<ToBytesFn>,
    pools: AHashMap<&'static str, &'static dyn PoolProvider>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut inspectors: Vec<_> = self.inspectors.keys().collect();
        inspectors.sort_unstable();
        let mut pools: Vec<_> = self.pools.keys().collect();
        pools.sort_unstable();
        f.debug_struct("Registry")
            .field("inspectors", &inspectors)
            .field("empty_checks", &self.empty_checks.len())
            .field("to_bytes", &self.to_bytes.len())
            .field("pools", &pools)
            .finish()
    }
}

impl Registry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `ins` under its [`Inspector::type_name`], replacing any
    /// previous inspector of that name
    pub fn register_inspector(&mut self, ins: Box<dyn Inspector>) {
        let name = ins.type_name();
        debug!(name, "registering inspector");
        self.inspectors.insert(name, ins);
    }

    /// Register an empty-check predicate under `name`
    pub fn register_empty_check(&mut self, name: &'static str, check: EmptyCheckFn) {
        debug!(name, "registering empty check");
        self.empty_checks.insert(name, check);
    }

    /// Append a byte converter; converters are tried in registration order
    pub fn register_to_bytes(&mut self, conv: ToBytesFn) {
        debug!(count = self.to_bytes.len() + 1, "registering byte converter");
        self.to_bytes.push(conv);
    }

    /// Register a document pool under `name`
    pub fn register_pool(&mut self, name: &'static str, pool: &'static dyn PoolProvider) {
        debug!(name, "registering pool");
        self.pools.insert(name, pool);
    }

    /// Inspector registered under `name`
    #[must_use]
    pub fn inspector(&self, name: &str) -> Option<&dyn Inspector> {
        self.inspectors.get(name).map(|ins| &**ins)
    }

    /// Empty-check predicate registered under `name`
    #[must_use]
    pub fn empty_check(&self, name: &str) -> Option<EmptyCheckFn> {
        self.empty_checks.get(name).copied()
    }

    /// Pool registered under `name`
    #[must_use]
    pub fn pool(&self, name: &str) -> Option<&'static dyn PoolProvider> {
        self.pools.get(name).copied()
    }

    /// Append the byte form of `val` using the first converter that
    /// handles it
    ///
    /// # Errors
    ///
    /// Returns [`SondaError::UnknownType`] when no converter handles `val`,
    /// or the first other error a converter reports.
    pub fn to_bytes(&self, dst: &mut Vec<u8>, val: Source<'_>) -> Result<()> {
        for conv in &self.to_bytes {
            match conv(dst, val) {
                Err(SondaError::UnknownType) => {}
                done => return done,
            }
        }
        Err(SondaError::UnknownType)
    }
}

/// Register the vector inspector, its hooks and the per-backend pools
pub fn init(registry: &mut Registry) {
    registry.register_inspector(Box::new(VectorInspector::new()));
    registry.register_empty_check("vector_node", node_empty_check);
    registry.register_to_bytes(node_to_bytes);
    registry.register_pool("jsonvector", json_pool());
    registry.register_pool("xmlvector", xml_pool());
    registry.register_pool("urlvector", url_pool());
    registry.register_pool("halvector", hal_pool());
}
