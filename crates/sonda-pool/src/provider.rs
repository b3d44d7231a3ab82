// SPDX-License-Identifier: MIT OR Apache-2.0
//! Type-erased pool access
//!
//! Registries hold pools of different document types side by side, so they
//! see them through [`PoolProvider`], which trades documents as
//! `Box<dyn Any + Send>`. Values of the wrong type are ignored.

use crate::SharedPool;
use sonda_core::Document;
use std::any::Any;
use tracing::warn;

/// Object-safe view of a document pool
pub trait PoolProvider: Send + Sync {
    /// Pool name
    fn name(&self) -> &'static str;

    /// Check out an empty document
    fn get(&self) -> Box<dyn Any + Send>;

    /// Reset a document obtained from [`PoolProvider::get`]
    fn reset(&self, doc: &mut (dyn Any + Send));

    /// Return a document obtained from [`PoolProvider::get`]
    fn put(&self, doc: Box<dyn Any + Send>);
}

impl<T> PoolProvider for SharedPool<T>
where
    T: Document + Default + Send + 'static,
{
    fn name(&self) -> &'static str {
        Self::name(self)
    }

    fn get(&self) -> Box<dyn Any + Send> {
        Box::new(self.acquire().into_inner())
    }

    fn reset(&self, doc: &mut (dyn Any + Send)) {
        if let Some(doc) = doc.downcast_mut::<T>() {
            doc.reset();
        }
    }

    fn put(&self, doc: Box<dyn Any + Send>) {
        match doc.downcast::<T>() {
            Ok(doc) => Self::put(self, *doc),
            Err(_) => warn!(pool = Self::name(self), "ignoring foreign value"),
        }
    }
}
