//! `RbTreeSet` - an ordered set adapter over [`RbTreeMap`] with unit values.

use super::tree_map::{Keys, RbTreeMap};
use crate::collections::Collection;
use crate::descriptor::{Natural, OrdDescriptor};
use crate::error::Result;
use core::fmt;

/// An ordered set whose elements are keys of an [`RbTreeMap<T, ()>`].
pub struct RbTreeSet<T, D = Natural<T>> {
    map: RbTreeMap<T, (), D>,
}

impl<T: Ord> RbTreeSet<T, Natural<T>> {
    /// Creates an empty set ordered by `T`'s `Ord`.
    pub fn new() -> Result<Self> {
        Self::with_descriptor(Natural::new())
    }
}

impl<T, D: OrdDescriptor<Item = T>> RbTreeSet<T, D> {
    /// Creates an empty set ordered by `descriptor`.
    pub fn with_descriptor(descriptor: D) -> Result<Self> {
        Ok(Self {
            map: RbTreeMap::with_descriptor(descriptor)?,
        })
    }

    /// Adds `value`. Returns `false` if an equal element was already present;
    /// the stored element is kept.
    pub fn insert(&mut self, value: T) -> Result<bool> {
        Ok(self.map.insert(value, ())?.is_none())
    }

    /// Returns `true` if an equal element is present.
    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    /// The stored element equal to `value`.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.map.get_key_value(value).map(|(k, _)| k)
    }

    /// Removes the element equal to `value`. Returns whether one was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.map.remove(value).is_some()
    }

    /// Removes and returns the stored element equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.map.remove_entry(value).map(|(k, ())| k)
    }

    #[doc(hidden)]
    pub fn check_invariants(&self) -> core::result::Result<usize, &'static str> {
        self.map.check_invariants()
    }
}

impl<T, D> RbTreeSet<T, D> {
    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Smallest element.
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(k, _)| k)
    }

    /// Largest element.
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(k, _)| k)
    }

    /// Pre-allocates node slots for `additional` more elements.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.map.reserve(additional)
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Elements in ascending order.
    pub fn iter(&self) -> Keys<'_, T, ()> {
        self.map.keys()
    }
}

impl<T, D> Collection for RbTreeSet<T, D> {
    fn len(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug, D> fmt::Debug for RbTreeSet<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T, D> IntoIterator for &'a RbTreeSet<T, D> {
    type Item = &'a T;
    type IntoIter = Keys<'a, T, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [i32; 7] = [874, 638, 5321, 96, 705, 1423, 3689];

    #[test]
    fn lookup_and_order() {
        let mut set = RbTreeSet::new().unwrap();
        for k in KEYS {
            assert!(set.insert(k).unwrap());
        }
        for k in KEYS {
            assert_eq!(set.get(&k), Some(&k));
        }
        assert_eq!(set.get(&1), None);
        let sorted: Vec<_> = set.iter().copied().collect();
        assert_eq!(sorted, [96, 638, 705, 874, 1423, 3689, 5321]);
        assert_eq!(set.first(), Some(&96));
        assert_eq!(set.last(), Some(&5321));
    }

    #[test]
    fn duplicates_and_removal() {
        let mut set = RbTreeSet::new().unwrap();
        assert!(set.insert("b").unwrap());
        assert!(!set.insert("b").unwrap());
        assert!(set.insert("a").unwrap());
        assert_eq!(set.len(), 2);
        assert!(set.remove(&"b"));
        assert!(!set.remove(&"b"));
        assert_eq!(set.take(&"a"), Some("a"));
        assert!(set.is_empty());
        set.check_invariants().unwrap();
    }
}
