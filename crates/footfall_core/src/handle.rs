//! Generational handles
//!
//! A handle names a slot plus the generation that slot had when the handle
//! was issued. Freeing a slot bumps its generation, so every handle issued
//! before the free stops resolving. This is what lets a holder keep a
//! reference "weakly": it never keeps the value alive and it can always ask
//! whether the value still exists.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A type-safe generational reference to a value of type T
pub struct Handle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Create a handle from raw parts
    #[inline]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

impl<T> Clone for Handle<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = std::any::type_name::<T>();
        let name = name.rsplit("::").next().unwrap_or(name);
        write!(f, "Handle<{}>({}v{})", name, self.index, self.generation)
    }
}

/// Issues handles and tracks which of them are still live
pub struct HandleAllocator<T> {
    generations: Vec<u32>,
    live: Vec<bool>,
    free_list: Vec<u32>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HandleAllocator<T> {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            live: Vec::new(),
            free_list: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Allocate a handle, reusing a freed slot when one is available
    pub fn allocate(&mut self) -> Handle<T> {
        if let Some(index) = self.free_list.pop() {
            let slot = index as usize;
            self.live[slot] = true;
            return Handle::new(index, self.generations[slot]);
        }

        let index = self.generations.len() as u32;
        self.generations.push(0);
        self.live.push(true);
        Handle::new(index, 0)
    }

    /// Free a handle. Returns false if it was already stale.
    pub fn free(&mut self, handle: Handle<T>) -> bool {
        if !self.is_valid(handle) {
            return false;
        }

        let slot = handle.index() as usize;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.live[slot] = false;
        self.free_list.push(handle.index());
        true
    }

    pub fn is_valid(&self, handle: Handle<T>) -> bool {
        let slot = handle.index() as usize;
        slot < self.generations.len()
            && self.live[slot]
            && self.generations[slot] == handle.generation()
    }

    /// Number of live handles
    pub fn len(&self) -> usize {
        self.generations.len() - self.free_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for HandleAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Owning storage addressed by generational handles
pub struct HandleMap<T> {
    allocator: HandleAllocator<T>,
    values: Vec<Option<T>>,
}

impl<T> HandleMap<T> {
    pub fn new() -> Self {
        Self {
            allocator: HandleAllocator::new(),
            values: Vec::new(),
        }
    }

    /// Insert a value and get a handle to it
    pub fn insert(&mut self, value: T) -> Handle<T> {
        let handle = self.allocator.allocate();
        let slot = handle.index() as usize;
        if slot >= self.values.len() {
            self.values.resize_with(slot + 1, || None);
        }
        self.values[slot] = Some(value);
        handle
    }

    /// Remove a value, invalidating every copy of its handle
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        if !self.allocator.free(handle) {
            return None;
        }
        self.values[handle.index() as usize].take()
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        if !self.allocator.is_valid(handle) {
            return None;
        }
        self.values.get(handle.index() as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        if !self.allocator.is_valid(handle) {
            return None;
        }
        self.values.get_mut(handle.index() as usize)?.as_mut()
    }

    /// Whether the handle still resolves to a value
    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.allocator.is_valid(handle)
    }

    pub fn len(&self) -> usize {
        self.allocator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocator.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        let generations = &self.allocator.generations;
        self.values.iter().enumerate().filter_map(move |(i, value)| {
            value
                .as_ref()
                .map(|v| (Handle::new(i as u32, generations[i]), v))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle<T>, &mut T)> {
        let generations = &self.allocator.generations;
        self.values.iter_mut().enumerate().filter_map(move |(i, value)| {
            value
                .as_mut()
                .map(|v| (Handle::new(i as u32, generations[i]), v))
        })
    }
}

impl<T> Default for HandleMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_allocation() {
        let mut alloc: HandleAllocator<i32> = HandleAllocator::new();
        let h1 = alloc.allocate();
        let h2 = alloc.allocate();

        assert!(alloc.is_valid(h1));
        assert!(alloc.is_valid(h2));
        assert_ne!(h1, h2);

        assert!(alloc.free(h1));
        assert!(!alloc.is_valid(h1));
        assert!(!alloc.free(h1));

        let h3 = alloc.allocate();
        assert_eq!(h3.index(), h1.index());
        assert_ne!(h3.generation(), h1.generation());
        assert!(!alloc.is_valid(h1));
        assert_eq!(alloc.len(), 2);
    }

    #[test]
    fn test_handle_map() {
        let mut map: HandleMap<String> = HandleMap::new();
        let h1 = map.insert("hello".to_string());
        let h2 = map.insert("world".to_string());

        assert_eq!(map.get(h1), Some(&"hello".to_string()));
        assert_eq!(map.get(h2), Some(&"world".to_string()));

        assert_eq!(map.remove(h1), Some("hello".to_string()));
        assert_eq!(map.get(h1), None);
        assert_eq!(map.remove(h1), None);
        assert_eq!(map.iter().map(|(h, _)| h).collect::<Vec<_>>(), vec![h2]);
    }

    #[test]
    fn test_stale_handle_after_slot_reuse() {
        let mut map: HandleMap<u32> = HandleMap::new();
        let old = map.insert(1);
        map.remove(old);
        let new = map.insert(2);

        assert_eq!(old.index(), new.index());
        assert!(map.get(old).is_none());
        assert_eq!(map.get(new), Some(&2));
    }
}
