//! Slot Arena for Linked Nodes
//!
//! Stores values in a single `Vec` and hands out stable `u32` slot ids.
//! Linked structures refer to each other by slot id instead of pointers, so
//! every node has exactly one owner (the arena) and the ownership graph stays
//! acyclic.
//!
//! ## Memory Layout
//!
//! ```text
//! Slots:     [ A ][ - ][ C ][ D ][ - ]...
//!              0    1    2    3    4
//! Free list: [4, 1]        (most recently freed slot is reused first)
//! ```
//!
//! ## Performance
//!
//! - Insert: O(1), reuses a freed slot when one exists
//! - Lookup: O(1), one bounds check
//! - Remove: O(1), the slot is pushed onto the free list

use core::ops::{Index, IndexMut};

/// Stable handle to a value stored in an [`Arena`].
pub type SlotId = u32;

/// Slot allocator with a free list.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    /// Occupied slots hold `Some`
    slots: Vec<Option<T>>,
    /// Vacant slot ids, reused LIFO
    free: Vec<SlotId>,
    /// Number of occupied slots
    live: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    /// Creates a new empty arena.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Creates a new arena with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Returns the number of live values.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true if no values are stored.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Drops every value. Capacity is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }

    /// Stores a value and returns its slot id.
    #[inline]
    pub fn insert(&mut self, value: T) -> SlotId {
        self.live += 1;
        match self.free.pop() {
            Some(id) => {
                self.slots[id as usize] = Some(value);
                id
            }
            None => {
                let id = self.slots.len() as SlotId;
                self.slots.push(Some(value));
                id
            }
        }
    }

    /// Removes and returns the value at `id`, if the slot is occupied.
    #[inline]
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let value = self.slots.get_mut(id as usize)?.take()?;
        self.free.push(id);
        self.live -= 1;
        Some(value)
    }

    /// Gets a value by slot id.
    #[inline(always)]
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id as usize)?.as_ref()
    }

    /// Gets a mutable value by slot id.
    #[inline(always)]
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id as usize)?.as_mut()
    }
}

/// Panics if the slot is vacant, like slice indexing out of bounds.
impl<T> Index<SlotId> for Arena<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, id: SlotId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("arena: slot {id} is vacant"),
        }
    }
}

impl<T> IndexMut<SlotId> for Arena<T> {
    #[inline(always)]
    fn index_mut(&mut self, id: SlotId) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("arena: slot {id} is vacant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_insert_get() {
        let mut arena = Arena::new();

        let a = arena.insert("hello");
        let b = arena.insert("world");

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(arena.get(a), Some(&"hello"));
        assert_eq!(arena[b], "world");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn remove_frees_slot() {
        let mut arena = Arena::new();
        let a = arena.insert(1);
        let _b = arena.insert(2);

        assert_eq!(arena.remove(a), Some(1));
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.remove(a), None);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn freed_slot_is_reused() {
        let mut arena = Arena::with_capacity(4);
        let a = arena.insert('a');
        arena.insert('b');
        arena.remove(a);

        let c = arena.insert('c');
        assert_eq!(c, a);
        assert_eq!(arena[c], 'c');
    }

    #[test]
    fn get_mut_updates() {
        let mut arena = Arena::new();
        let id = arena.insert(10);
        *arena.get_mut(id).expect("occupied") += 5;
        arena[id] *= 2;
        assert_eq!(arena[id], 30);
    }

    #[test]
    fn clear_resets() {
        let mut arena = Arena::new();
        for i in 0..100 {
            arena.insert(i);
        }

        arena.clear();

        assert_eq!(arena.len(), 0);
        assert!(arena.is_empty());
        assert_eq!(arena.insert(7), 0);
    }

    #[test]
    #[should_panic(expected = "vacant")]
    fn indexing_vacant_slot_panics() {
        let mut arena = Arena::new();
        let id = arena.insert(());
        arena.remove(id);
        let _ = &arena[id];
    }
}
