//! Bounded pool of reusable footstep actors
//!
//! The pool holds weak handles into the world's [`ActorStore`]. Entries can
//! go stale when the host destroys an actor out of band; stale entries are
//! skipped by acquisition and purged lazily.

use crate::store::{ActorHandle, ActorStore};
use footfall_math::Transform;

/// Ordered, bounded set of pooled actor handles
#[derive(Debug, Clone)]
pub struct FootstepPool {
    entries: Vec<ActorHandle>,
    capacity: usize,
}

impl FootstepPool {
    /// Create an empty pool. Capacity is at least one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries, stale ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in acquisition order (oldest first)
    pub fn handles(&self) -> &[ActorHandle] {
        &self.entries
    }

    /// Spawn one actor if the pool is below capacity.
    /// Returns the new handle, or `None` when the pool is full.
    pub fn try_grow(&mut self, store: &mut ActorStore) -> Option<ActorHandle> {
        if self.entries.len() >= self.capacity {
            return None;
        }
        let handle = store.spawn(Transform::IDENTITY);
        self.entries.push(handle);
        log::debug!(
            "Footstep pool grew to {}/{}",
            self.entries.len(),
            self.capacity
        );
        Some(handle)
    }

    /// Drop every entry whose actor no longer exists
    pub fn remove_invalid_entries(&mut self, store: &ActorStore) -> usize {
        let before = self.entries.len();
        self.entries.retain(|handle| store.is_alive(*handle));
        let removed = before - self.entries.len();
        if removed > 0 {
            log::debug!("Purged {} stale footstep pool entries", removed);
        }
        removed
    }

    /// Pick an actor to use.
    ///
    /// Prefers the first live inactive actor. When every live actor is busy,
    /// the first live entry is taken anyway (it is still playing and will be
    /// cut off) and moved to the back so forced reuse rotates through the
    /// pool. Returns `None` only when no live entry exists.
    pub fn acquire(
        &mut self,
        store: &ActorStore,
        remove_invalid_first: bool,
    ) -> Option<ActorHandle> {
        if remove_invalid_first {
            self.remove_invalid_entries(store);
        }

        let idle = self.entries.iter().copied().find(|handle| {
            store
                .get(*handle)
                .is_some_and(|actor| !actor.is_active())
        });
        if idle.is_some() {
            return idle;
        }

        let position = self
            .entries
            .iter()
            .position(|handle| store.is_alive(*handle))?;
        let handle = self.entries.remove(position);
        self.entries.push(handle);
        log::trace!("Footstep pool exhausted, reusing {:?}", handle);
        Some(handle)
    }

    /// Purge stale entries, grow if there is room, then acquire.
    ///
    /// Stale entries are dropped before the capacity check so actors
    /// destroyed by the host never block growth.
    pub fn acquire_or_grow(&mut self, store: &mut ActorStore) -> Option<ActorHandle> {
        self.remove_invalid_entries(store);
        self.try_grow(store);
        self.acquire(store, false)
    }

    /// Destroy every pooled actor and empty the pool
    pub fn release_all(&mut self, store: &mut ActorStore) -> usize {
        let count = self.entries.len();
        for handle in self.entries.drain(..) {
            store.destroy(handle);
        }
        count
    }
}
