//! `ChainedHashSet` - a set adapter over [`ChainedHashMap`] with unit values.

use super::hash_map::{ChainedHashMap, Keys};
use crate::collections::Collection;
use crate::descriptor::{HashDescriptor, Natural};
use crate::error::Result;
use core::fmt;

/// A hash set whose elements are keys of a [`ChainedHashMap<T, ()>`].
pub struct ChainedHashSet<T, D = Natural<T>> {
    map: ChainedHashMap<T, (), D>,
}

impl<T: Ord + core::hash::Hash> ChainedHashSet<T, Natural<T>> {
    /// Creates an empty set using the element's natural descriptor.
    pub fn new() -> Result<Self> {
        Self::with_descriptor(Natural::new())
    }
}

impl<T, D: HashDescriptor<Item = T>> ChainedHashSet<T, D> {
    /// Creates an empty set keyed through `descriptor`.
    pub fn with_descriptor(descriptor: D) -> Result<Self> {
        Ok(Self {
            map: ChainedHashMap::with_descriptor(descriptor)?,
        })
    }

    /// Adds `value`. Returns `false`, leaving the stored element in place, if
    /// an equal element was already present.
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

    /// Makes room for `additional` more elements.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.map.reserve(additional)
    }
}

impl<T, D> ChainedHashSet<T, D> {
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

    /// Number of chains in the underlying table.
    pub fn bucket_count(&self) -> usize {
        self.map.bucket_count()
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterates over the elements in table order.
    pub fn iter(&self) -> Keys<'_, T, ()> {
        self.map.keys()
    }
}

impl<T, D> Collection for ChainedHashSet<T, D> {
    fn len(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug, D> fmt::Debug for ChainedHashSet<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T, D> IntoIterator for &'a ChainedHashSet<T, D> {
    type Item = &'a T;
    type IntoIter = Keys<'a, T, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Caseless;

    #[test]
    fn insert_reports_novelty() {
        let mut set = ChainedHashSet::new().unwrap();
        assert!(set.insert(5).unwrap());
        assert!(!set.insert(5).unwrap());
        assert!(set.insert(6).unwrap());
        assert_eq!(set.len(), 2);
        assert!(set.contains(&5));
        assert!(!set.contains(&7));
    }

    #[test]
    fn remove_and_take() {
        let mut set = ChainedHashSet::new().unwrap();
        for i in 0..32u64 {
            set.insert(i).unwrap();
        }
        assert!(set.remove(&3));
        assert!(!set.remove(&3));
        assert_eq!(set.take(&4), Some(4));
        assert_eq!(set.take(&4), None);
        assert_eq!(set.len(), 30);
        assert_eq!(set.iter().count(), 30);
    }

    #[test]
    fn reserve_past_the_limit_leaves_set_intact() {
        let mut set = ChainedHashSet::new().unwrap();
        set.insert(3u64).unwrap();
        assert!(matches!(
            set.reserve(usize::MAX / 2),
            Err(crate::error::CollectionError::OutOfMemory { .. })
        ));
        assert_eq!(set.bucket_count(), 8);
        assert!(set.contains(&3));
    }

    #[test]
    fn get_returns_stored_element() {
        let mut set = ChainedHashSet::with_descriptor(Caseless).unwrap();
        set.insert("Mango".to_string()).unwrap();
        assert!(!set.insert("MANGO".to_string()).unwrap());
        assert_eq!(set.get(&"mango".to_string()).map(String::as_str), Some("Mango"));
    }
}
