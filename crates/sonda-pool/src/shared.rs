// SPDX-License-Identifier: MIT OR Apache-2.0
//! Thread-safe document pool

use crate::PoolStrategy;
use parking_lot::Mutex;
use sonda_core::Document;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// Running pool counters
#[derive(Debug, Default)]
pub struct PoolStats {
    created: AtomicU64,
    reused: AtomicU64,
    released: AtomicU64,
    discarded: AtomicU64,
}

/// Point-in-time copy of [`PoolStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStatsSnapshot {
    /// Documents allocated because the free list was empty
    pub created: u64,
    /// Acquisitions served from the free list
    pub reused: u64,
    /// Documents reset and put back on the free list
    pub released: u64,
    /// Documents dropped because the pool was full
    pub discarded: u64,
}

impl PoolStatsSnapshot {
    /// Share of acquisitions served from the free list
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn hit_rate(&self) -> f64 {
        let total = self.created + self.reused;
        if total == 0 {
            0.0
        } else {
            self.reused as f64 / total as f64
        }
    }
}

impl PoolStats {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the current counter values
    #[must_use]
    pub fn snapshot(&self) -> PoolStatsSnapshot {
        PoolStatsSnapshot {
            created: self.created.load(Ordering::Relaxed),
            reused: self.reused.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
        }
    }
}

/// Pool of reusable documents shared across threads
pub struct SharedPool<T> {
    name: &'static str,
    strategy: PoolStrategy,
    free: Mutex<Vec<T>>,
    stats: PoolStats,
}

impl<T> fmt::Debug for SharedPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedPool")
            .field("name", &self.name)
            .field("strategy", &self.strategy)
            .field("idle", &self.free.lock().len())
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}

impl<T> SharedPool<T> {
    /// Create an empty pool
    #[must_use]
    pub fn new(name: &'static str, strategy: PoolStrategy) -> Self {
        Self {
            name,
            strategy,
            free: Mutex::new(Vec::new()),
            stats: PoolStats::default(),
        }
    }

    /// Pool name, used in log events and registries
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Strategy this pool was built with
    #[must_use]
    pub const fn strategy(&self) -> PoolStrategy {
        self.strategy
    }

    /// Number of idle documents on the free list
    #[must_use]
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    /// Counter snapshot
    #[must_use]
    pub fn stats(&self) -> PoolStatsSnapshot {
        self.stats.snapshot()
    }

    /// Drop every idle document
    pub fn clear(&self) {
        let dropped = std::mem::take(&mut *self.free.lock()).len();
        debug!(pool = self.name, dropped, "cleared pool");
    }
}

impl<T: Document + Default> SharedPool<T> {
    /// Check out an empty document
    ///
    /// Served from the free list when possible; otherwise a fresh document is
    /// allocated.
    pub fn acquire(&self) -> Pooled<'_, T> {
        let reused = self.free.lock().pop();
        let doc = if let Some(doc) = reused {
            PoolStats::bump(&self.stats.reused);
            doc
        } else {
            PoolStats::bump(&self.stats.created);
            trace!(pool = self.name, "allocating document");
            T::default()
        };
        Pooled {
            doc: Some(doc),
            pool: self,
        }
    }

    /// Return a checked-out document to the pool
    ///
    /// Consumes the guard, so the document cannot be used afterwards.
    pub fn release(&self, doc: Pooled<'_, T>) {
        debug_assert!(std::ptr::eq(self, doc.pool), "released into a foreign pool");
        doc.release();
    }

    /// Reset a checked-out document without returning it
    pub fn reset_in_place(&self, doc: &mut Pooled<'_, T>) {
        trace!(pool = self.name, "resetting checked-out document");
        doc.reset_in_place();
    }

    /// Reset `doc` and put it on the free list, unless the pool is full
    pub fn put(&self, mut doc: T) {
        doc.reset();
        let mut free = self.free.lock();
        if self.strategy.accepts(free.len()) {
            free.push(doc);
            drop(free);
            PoolStats::bump(&self.stats.released);
        } else {
            let idle = free.len();
            drop(free);
            PoolStats::bump(&self.stats.discarded);
            debug!(pool = self.name, idle, "pool full, dropping document");
        }
    }
}

/// A document checked out of a [`SharedPool`]
///
/// Dereferences to the document. Dropping the guard resets the document and
/// returns it to its pool.
pub struct Pooled<'p, T: Document + Default> {
    doc: Option<T>,
    pool: &'p SharedPool<T>,
}

impl<T: Document + Default> Pooled<'_, T> {
    /// Return the document to its pool
    pub fn release(self) {
        drop(self);
    }

    /// Reset the document, keeping it checked out
    pub fn reset_in_place(&mut self) {
        if let Some(doc) = self.doc.as_mut() {
            doc.reset();
        }
    }

    /// Detach the document from its pool
    ///
    /// The document is not returned when it goes out of scope.
    #[must_use]
    pub fn into_inner(mut self) -> T {
        self.doc.take().unwrap_or_default()
    }

    /// Name of the owning pool
    #[must_use]
    pub const fn pool_name(&self) -> &'static str {
        self.pool.name
    }
}

impl<T: Document + Default> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // The slot is only emptied by into_inner and drop, which consume
        // the guard.
        match &self.doc {
            Some(doc) => doc,
            None => unreachable!("pooled document already released"),
        }
    }
}

impl<T: Document + Default> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.doc {
            Some(doc) => doc,
            None => unreachable!("pooled document already released"),
        }
    }
}

impl<T: Document + Default + fmt::Debug> fmt::Debug for Pooled<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pooled")
            .field("pool", &self.pool.name)
            .field("doc", &self.doc)
            .finish()
    }
}

impl<T: Document + Default> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(doc) = self.doc.take() {
            self.pool.put(doc);
        }
    }
}
