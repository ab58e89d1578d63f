//! `ChainedHashMap` - a separately chained hash map.
//!
//! The table is a power-of-two vector of chain heads. Entries live in a
//! [`SlotArena`] and link to the next entry of their chain by index. Each
//! entry caches its full hash, so lookups compare hashes before calling the
//! descriptor's `compare`, and rehashing never re-hashes a key.
//!
//! New keys are appended at the end of their chain. The table doubles once
//! `len >= buckets * 3 / 4`; a failed doubling is not an error, the map keeps
//! working over-loaded and retries on the next insert.

use crate::alloc::SlotArena;
use crate::collections::Collection;
use crate::config::{self, INITIAL_BUCKETS};
use crate::descriptor::{self, HashDescriptor, Natural};
use crate::error::{CollectionError, Result};
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;
use core::slice;

struct Entry<K, V> {
    hash: u64,
    next: Option<usize>,
    key: K,
    value: V,
}

/// A hash map with separate chaining.
pub struct ChainedHashMap<K, V, D = Natural<K>> {
    buckets: Vec<Option<usize>>,
    entries: SlotArena<Entry<K, V>>,
    descriptor: D,
}

/// Allocates `count` empty chain heads, reporting failure instead of aborting.
fn alloc_buckets(count: usize) -> Result<Vec<Option<usize>>> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(count)
        .map_err(|_| CollectionError::out_of_memory(count))?;
    buckets.resize(count, None);
    Ok(buckets)
}

#[inline(always)]
#[allow(clippy::cast_possible_truncation)]
fn bucket_of(hash: u64, bucket_count: usize) -> usize {
    (hash as usize) & (bucket_count - 1)
}

impl<K, V> ChainedHashMap<K, V, Natural<K>>
where
    K: Ord + core::hash::Hash,
{
    /// Creates an empty map hashing keys with their natural descriptor.
    ///
    /// # Errors
    /// `InvalidArgument` for zero-sized keys, `OutOfMemory` if the initial
    /// table cannot be allocated.
    pub fn new() -> Result<Self> {
        Self::with_descriptor(Natural::new())
    }
}

impl<K, V, D: HashDescriptor<Item = K>> ChainedHashMap<K, V, D> {
    /// Creates an empty map with eight buckets, keyed through `descriptor`.
    pub fn with_descriptor(descriptor: D) -> Result<Self> {
        descriptor::validate(&descriptor)?;
        Ok(Self {
            buckets: alloc_buckets(INITIAL_BUCKETS)?,
            entries: SlotArena::new(),
            descriptor,
        })
    }

    /// Creates an empty map sized so that `capacity` inserts do not rehash.
    pub fn with_capacity_and_descriptor(capacity: usize, descriptor: D) -> Result<Self> {
        let mut map = Self::with_descriptor(descriptor)?;
        map.reserve(capacity)?;
        Ok(map)
    }

    /// The key descriptor.
    pub fn descriptor(&self) -> &D {
        &self.descriptor
    }

    /// Walks the chain for `key`. Returns `(bucket, predecessor, match)`.
    fn locate(&self, hash: u64, key: &K) -> (usize, Option<usize>, Option<usize>) {
        let bucket = bucket_of(hash, self.buckets.len());
        let mut prev = None;
        let mut cur = self.buckets[bucket];
        while let Some(idx) = cur {
            let entry = self.entries.get(idx);
            if entry.hash == hash && self.descriptor.compare(&entry.key, key) == Ordering::Equal {
                return (bucket, prev, Some(idx));
            }
            prev = Some(idx);
            cur = entry.next;
        }
        (bucket, prev, None)
    }

    #[inline]
    fn find(&self, key: &K) -> Option<usize> {
        let hash = self.descriptor.hash(key);
        self.locate(hash, key).2
    }

    /// Inserts or updates a key.
    ///
    /// An existing equal key keeps its stored key; only the value is replaced
    /// and the old value is returned. A new key is appended to the end of its
    /// chain, after which the table may double.
    ///
    /// # Errors
    /// `OutOfMemory` if the new entry cannot be allocated; the map is unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let hash = self.descriptor.hash(&key);
        let (bucket, tail, found) = self.locate(hash, &key);
        if let Some(idx) = found {
            return Ok(Some(mem::replace(&mut self.entries.get_mut(idx).value, value)));
        }

        let idx = self.entries.insert(Entry {
            hash,
            next: None,
            key,
            value,
        })?;
        match tail {
            Some(prev) => self.entries.get_mut(prev).next = Some(idx),
            None => self.buckets[bucket] = Some(idx),
        }

        if self.len() >= config::grow_threshold(self.buckets.len()) {
            self.grow();
        }
        Ok(None)
    }

    /// Doubles the table, or logs and carries on if that is impossible.
    fn grow(&mut self) {
        let current = self.buckets.len();
        let result = current
            .checked_mul(2)
            .ok_or(CollectionError::out_of_memory(usize::MAX))
            .and_then(|count| self.rehash(count));
        if let Err(_err) = result {
            warn_event!(buckets = current, len = self.len(), error = %_err, "hash map could not grow; continuing over-loaded");
        }
    }

    /// Relinks every entry into a table of `new_count` buckets.
    fn rehash(&mut self, new_count: usize) -> Result<()> {
        let old = mem::replace(&mut self.buckets, alloc_buckets(new_count)?);
        for head in old {
            let mut cur = head;
            while let Some(idx) = cur {
                let entry = self.entries.get_mut(idx);
                cur = entry.next;
                let bucket = bucket_of(entry.hash, new_count);
                entry.next = self.buckets[bucket];
                self.buckets[bucket] = Some(idx);
            }
        }
        debug_event!(buckets = new_count, len = self.len(), "hash map rehashed");
        Ok(())
    }

    /// Makes room so the next `additional` inserts neither rehash nor allocate
    /// entry slots.
    ///
    /// # Errors
    /// `OutOfMemory` if the table or the entry slots cannot grow that far; the
    /// map is unchanged.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let wanted = self
            .len()
            .checked_add(additional)
            .ok_or(CollectionError::out_of_memory(additional))?;
        let mut count = self.buckets.len();
        while config::grow_threshold(count) <= wanted {
            count = count
                .checked_mul(2)
                .ok_or(CollectionError::out_of_memory(wanted))?;
        }
        self.entries.reserve(additional)?;
        if count > self.buckets.len() {
            self.rehash(count)?;
        }
        Ok(())
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|idx| &self.entries.get(idx).value)
    }

    /// Mutable value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(&mut self.entries.get_mut(idx).value)
    }

    /// Stored key and value for `key`. The stored key may differ from the
    /// lookup key when the descriptor treats distinct values as equal.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find(key).map(|idx| {
            let entry = self.entries.get(idx);
            (&entry.key, &entry.value)
        })
    }

    /// Returns `true` if an equal key is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` and returns the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.descriptor.hash(key);
        let (bucket, prev, found) = self.locate(hash, key);
        let idx = found?;
        let next = self.entries.get(idx).next;
        match prev {
            Some(p) => self.entries.get_mut(p).next = next,
            None => self.buckets[bucket] = next,
        }
        let entry = self.entries.remove(idx);
        Some((entry.key, entry.value))
    }
}

impl<K, V, D> ChainedHashMap<K, V, D> {
    /// Number of entries.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of chains in the table. Always a power of two.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Drops every entry. The bucket count is kept.
    pub fn clear(&mut self) {
        self.buckets.fill(None);
        self.entries.clear();
    }

    /// Iterates `(key, value)` pairs bucket by bucket, each chain in link order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            entries: &self.entries,
            cur: None,
            remaining: self.len(),
        }
    }

    /// Iterates over the keys.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Iterates over the values.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Calls `f` on every entry with mutable access to the value.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V),
    {
        for (_, entry) in self.entries.iter_mut() {
            f(&entry.key, &mut entry.value);
        }
    }
}

impl<K, V, D> Collection for ChainedHashMap<K, V, D> {
    fn len(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        self.clear();
    }
}

impl<K: fmt::Debug, V: fmt::Debug, D> fmt::Debug for ChainedHashMap<K, V, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, D> IntoIterator for &'a ChainedHashMap<K, V, D> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`ChainedHashMap`].
pub struct Iter<'a, K, V> {
    buckets: slice::Iter<'a, Option<usize>>,
    entries: &'a SlotArena<Entry<K, V>>,
    cur: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(idx) = self.cur {
                let entry = self.entries.get(idx);
                self.cur = entry.next;
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
            self.cur = *self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}
impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// Iterator over the keys of a [`ChainedHashMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}
impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

/// Iterator over the values of a [`ChainedHashMap`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}
impl<'a, K, V> FusedIterator for Values<'a, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Caseless;
    use crate::descriptor::OrdDescriptor;
    use crate::descriptor::TypeDescriptor;

    const FRUITS: [(&str, i32); 9] = [
        ("Apple", 10),
        ("Banana", 20),
        ("Cherry", 30),
        ("Grape", 40),
        ("Lemon", 50),
        ("Mango", 60),
        ("Orange", 70),
        ("Peach", 80),
        ("Watermelon", 90),
    ];

    #[test]
    fn fruit_lookup() {
        let mut map = ChainedHashMap::new().unwrap();
        for (name, v) in FRUITS {
            assert_eq!(map.insert(name.to_string(), v).unwrap(), None);
        }
        assert_eq!(map.len(), 9);
        for (name, v) in FRUITS {
            assert_eq!(map.get(&name.to_string()), Some(&v), "{name}");
        }
        assert_eq!(map.get(&"Kiwi".to_string()), None);
    }

    #[test]
    fn update_keeps_len_and_returns_old_value() {
        let mut map = ChainedHashMap::new().unwrap();
        map.insert(1u32, "one").unwrap();
        assert_eq!(map.insert(1, "uno").unwrap(), Some("one"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"uno"));
    }

    #[test]
    fn table_doubles_at_three_quarters() {
        let mut map = ChainedHashMap::new().unwrap();
        assert_eq!(map.bucket_count(), 8);
        for i in 0..5u64 {
            map.insert(i, i).unwrap();
        }
        assert_eq!(map.bucket_count(), 8);
        map.insert(5, 5).unwrap();
        assert_eq!(map.bucket_count(), 16);
        for i in 0..6 {
            assert_eq!(map.get(&i), Some(&i));
        }
    }

    #[test]
    fn remove_decrements_len() {
        let mut map = ChainedHashMap::new().unwrap();
        for i in 0..50i32 {
            map.insert(i, i * 2).unwrap();
        }
        assert_eq!(map.remove(&7), Some(14));
        assert_eq!(map.remove(&7), None);
        assert_eq!(map.remove_entry(&8), Some((8, 16)));
        assert_eq!(map.len(), 48);
        assert!(!map.contains_key(&7));
        assert!(map.contains_key(&9));
        assert_eq!(map.iter().count(), 48);
    }

    #[test]
    fn clear_keeps_buckets() {
        let mut map = ChainedHashMap::new().unwrap();
        for i in 0..100u16 {
            map.insert(i, ()).unwrap();
        }
        let buckets = map.bucket_count();
        map.clear();
        assert_eq!(map.len(), 0);
        assert_eq!(map.bucket_count(), buckets);
        assert_eq!(map.iter().next(), None);
        map.insert(3, ()).unwrap();
        assert!(map.contains_key(&3));
    }

    #[test]
    fn reserve_prevents_rehash() {
        let mut map = ChainedHashMap::new().unwrap();
        map.reserve(100).unwrap();
        let buckets = map.bucket_count();
        assert!(config::grow_threshold(buckets) > 100);
        for i in 0..100u32 {
            map.insert(i, i).unwrap();
        }
        assert_eq!(map.bucket_count(), buckets);
    }

    #[test]
    fn reserve_beyond_address_space_fails_cleanly() {
        let mut map = ChainedHashMap::new().unwrap();
        map.insert(1u64, 10u64).unwrap();
        for additional in [usize::MAX / 4, usize::MAX / 2, usize::MAX] {
            assert!(matches!(
                map.reserve(additional),
                Err(CollectionError::OutOfMemory { .. })
            ));
            assert_eq!(map.bucket_count(), 8);
            assert_eq!(map.get(&1), Some(&10));
        }
    }

    #[test]
    fn caseless_returns_stored_key() {
        let mut map = ChainedHashMap::with_descriptor(Caseless).unwrap();
        map.insert("Apple".to_string(), 1).unwrap();
        assert_eq!(map.insert("APPLE".to_string(), 2).unwrap(), Some(1));
        let (k, v) = map.get_key_value(&"apple".to_string()).unwrap();
        assert_eq!((k.as_str(), *v), ("Apple", 2));
    }

    #[test]
    fn colliding_hashes_fall_back_to_compare() {
        #[derive(Default)]
        struct Constant;
        impl TypeDescriptor for Constant {
            type Item = u32;
        }
        impl OrdDescriptor for Constant {
            fn compare(&self, a: &u32, b: &u32) -> Ordering {
                a.cmp(b)
            }
        }
        impl HashDescriptor for Constant {
            fn hash(&self, _: &u32) -> u64 {
                42
            }
        }

        let mut map = ChainedHashMap::with_descriptor(Constant).unwrap();
        for i in 0..20 {
            map.insert(i, i + 100).unwrap();
        }
        assert_eq!(map.remove(&0), Some(100));
        assert_eq!(map.remove(&10), Some(110));
        assert_eq!(map.remove(&19), Some(119));
        for i in (1..19).filter(|i| *i != 10) {
            assert_eq!(map.get(&i), Some(&(i + 100)));
        }
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys.len(), 17);
    }

    #[test]
    fn for_each_mut_and_views() {
        let mut map = ChainedHashMap::new().unwrap();
        for i in 1..=4u8 {
            map.insert(i, u32::from(i)).unwrap();
        }
        map.for_each_mut(|_, v| *v *= 10);
        let mut values: Vec<_> = map.values().copied().collect();
        values.sort_unstable();
        assert_eq!(values, [10, 20, 30, 40]);
        *map.get_mut(&2).unwrap() += 1;
        assert_eq!(map.get(&2), Some(&21));
        assert_eq!(map.keys().len(), 4);
    }
}
