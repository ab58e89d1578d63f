//! `SlotArena` - entries addressed by stable indices.
//!
//! Linked structures (hash chains, tree links, list links) refer to each
//! other by arena index instead of by pointer. An index stays valid until its
//! entry is removed; vacated slots are threaded onto a free list and reused by
//! later insertions.

use crate::error::{CollectionError, Result};
use core::fmt;
use core::mem;

/// A slot in the arena.
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

/// Index-addressed storage with slot reuse.
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    /// Creates an empty arena.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// Number of occupied slots.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot is occupied.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Makes sure the next `additional` insertions will not allocate.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let vacant = self.slots.len() - self.len;
        if additional <= vacant {
            return Ok(());
        }
        let needed = additional - vacant;
        self.slots
            .try_reserve(needed)
            .map_err(|_| CollectionError::out_of_memory(needed))
    }

    /// Stores `value` and returns its index.
    ///
    /// Fails with `OutOfMemory` only when a fresh slot is needed and cannot be
    /// allocated; the arena is unchanged in that case.
    pub fn insert(&mut self, value: T) -> Result<usize> {
        if let Some(idx) = self.free_head {
            let next_free = match self.slots[idx] {
                Slot::Vacant { next_free } => next_free,
                Slot::Occupied(_) => panic!("Corrupted free list: slot {idx} is occupied"),
            };
            self.slots[idx] = Slot::Occupied(value);
            self.free_head = next_free;
            self.len += 1;
            return Ok(idx);
        }

        self.slots
            .try_reserve(1)
            .map_err(|_| CollectionError::out_of_memory(1))?;
        let idx = self.slots.len();
        self.slots.push(Slot::Occupied(value));
        self.len += 1;
        Ok(idx)
    }

    /// Takes the entry at `idx` out of the arena.
    ///
    /// # Panics
    /// If `idx` is vacant.
    pub fn remove(&mut self, idx: usize) -> T {
        let slot = mem::replace(
            &mut self.slots[idx],
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        match slot {
            Slot::Occupied(value) => {
                self.free_head = Some(idx);
                self.len -= 1;
                value
            }
            Slot::Vacant { .. } => panic!("Arena slot {idx} removed twice"),
        }
    }

    /// Shared access to an occupied slot.
    ///
    /// # Panics
    /// If `idx` is vacant.
    #[inline]
    pub fn get(&self, idx: usize) -> &T {
        match &self.slots[idx] {
            Slot::Occupied(value) => value,
            Slot::Vacant { .. } => panic!("Dangling arena index {idx}"),
        }
    }

    /// Exclusive access to an occupied slot.
    ///
    /// # Panics
    /// If `idx` is vacant.
    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> &mut T {
        match &mut self.slots[idx] {
            Slot::Occupied(value) => value,
            Slot::Vacant { .. } => panic!("Dangling arena index {idx}"),
        }
    }

    /// Exclusive access to two distinct occupied slots at once.
    ///
    /// # Panics
    /// If `a == b` or either slot is vacant.
    pub fn get2_mut(&mut self, a: usize, b: usize) -> (&mut T, &mut T) {
        assert_ne!(a, b, "get2_mut needs two distinct slots");
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(hi);
        let (lo_slot, hi_slot) = (&mut head[lo], &mut tail[0]);
        let (lo_ref, hi_ref) = match (lo_slot, hi_slot) {
            (Slot::Occupied(x), Slot::Occupied(y)) => (x, y),
            _ => panic!("Dangling arena index in pair ({a}, {b})"),
        };
        if a < b {
            (lo_ref, hi_ref)
        } else {
            (hi_ref, lo_ref)
        }
    }

    /// Drops every entry in slot order. Allocated slots are kept for reuse.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }

    /// Occupied entries in slot order (not in any container order).
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| match slot {
            Slot::Occupied(value) => Some((idx, value)),
            Slot::Vacant { .. } => None,
        })
    }

    /// Mutable occupied entries in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(idx, slot)| match slot {
                Slot::Occupied(value) => Some((idx, value)),
                Slot::Vacant { .. } => None,
            })
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SlotArena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn indices_are_stable_and_reused() {
        let mut arena = SlotArena::new();
        let a = arena.insert("a").unwrap();
        let b = arena.insert("b").unwrap();
        let c = arena.insert("c").unwrap();
        assert_eq!(arena.len(), 3);

        assert_eq!(arena.remove(b), "b");
        assert_eq!(*arena.get(a), "a");
        assert_eq!(*arena.get(c), "c");

        let d = arena.insert("d").unwrap();
        assert_eq!(d, b);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn get2_mut_returns_requested_order() {
        let mut arena = SlotArena::new();
        let a = arena.insert(1).unwrap();
        let b = arena.insert(2).unwrap();
        {
            let (x, y) = arena.get2_mut(b, a);
            assert_eq!((*x, *y), (2, 1));
            core::mem::swap(x, y);
        }
        assert_eq!(*arena.get(a), 2);
        assert_eq!(*arena.get(b), 1);
    }

    #[test]
    #[should_panic(expected = "removed twice")]
    fn double_remove_panics() {
        let mut arena = SlotArena::new();
        let a = arena.insert(1).unwrap();
        arena.remove(a);
        arena.remove(a);
    }

    #[test]
    fn clear_drops_every_entry_once() {
        struct Counted(Rc<Cell<usize>>);
        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let mut arena = SlotArena::new();
        for _ in 0..10 {
            arena.insert(Counted(drops.clone())).unwrap();
        }
        drop(arena.remove(3));
        assert_eq!(drops.get(), 1);
        arena.clear();
        assert_eq!(drops.get(), 10);
        assert!(arena.is_empty());
    }
}
