//! `Text` - a growable UTF-8 string with fallible growth.
//!
//! Growth follows the same doubling policy as the array containers: the
//! first allocation holds eight bytes and each further growth doubles until
//! the request fits. [`TextDescriptor`] orders text byte-wise and hashes it
//! with BKDR, so `Text` keys work in every map and set.

use crate::config;
use crate::descriptor::{bkdr, HashDescriptor, OrdDescriptor, TypeDescriptor};
use crate::error::{CollectionError, Result};
use core::cmp::Ordering;
use core::fmt;
use core::ops::Deref;

/// A growable string.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Text {
    inner: String,
}

impl Text {
    /// Creates a text holding a copy of `s`.
    ///
    /// # Errors
    /// `OutOfMemory` if the buffer cannot be allocated.
    pub fn new(s: &str) -> Result<Self> {
        let mut text = Self::default();
        text.append(s)?;
        Ok(text)
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Allocated bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Ensures room for `additional` more bytes.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let len = self.len();
        let min_cap = len
            .checked_add(additional)
            .ok_or(CollectionError::out_of_memory(additional))?;
        let old_cap = self.capacity();
        if old_cap >= min_cap {
            return Ok(());
        }
        let new_cap = config::grown_capacity(old_cap, min_cap)
            .ok_or(CollectionError::out_of_memory(min_cap))?;
        self.inner
            .try_reserve_exact(new_cap - len)
            .map_err(|_| CollectionError::out_of_memory(new_cap))?;
        debug_event!(old_cap, new_cap, "text grew");
        Ok(())
    }

    /// Appends `s`.
    ///
    /// # Errors
    /// `OutOfMemory` if growth failed; the text is unchanged.
    pub fn append(&mut self, s: &str) -> Result<()> {
        self.reserve(s.len())?;
        self.inner.push_str(s);
        Ok(())
    }

    /// Empties the text, keeping its capacity.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// The contents as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

/// Byte-wise ordering and BKDR hashing for [`Text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextDescriptor;

impl TypeDescriptor for TextDescriptor {
    type Item = Text;
}

impl OrdDescriptor for TextDescriptor {
    #[inline]
    fn compare(&self, a: &Text, b: &Text) -> Ordering {
        a.as_bytes().cmp(b.as_bytes())
    }
}

impl HashDescriptor for TextDescriptor {
    #[inline]
    fn hash(&self, item: &Text) -> u64 {
        u64::from(bkdr(item.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::ChainedHashMap;

    #[test]
    fn append_grows_by_doubling() {
        let mut text = Text::default();
        assert_eq!(text.capacity(), 0);
        text.append("abc").unwrap();
        assert_eq!(text.capacity(), 8);
        text.append("defghi").unwrap();
        assert_eq!(text.capacity(), 16);
        assert_eq!(text.as_str(), "abcdefghi");
        assert_eq!(text.len(), 9);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut text = Text::new("hello world").unwrap();
        let cap = text.capacity();
        text.clear();
        assert!(text.is_empty());
        assert_eq!(text.capacity(), cap);
    }

    #[test]
    fn descriptor_orders_bytes() {
        let d = TextDescriptor;
        let a = Text::new("Apple").unwrap();
        let b = Text::new("apple").unwrap();
        assert_eq!(d.compare(&a, &b), Ordering::Less);
        assert_eq!(d.hash(&a), u64::from(bkdr(b"Apple")));
    }

    #[test]
    fn text_keys_in_hash_map() {
        let mut map = ChainedHashMap::with_descriptor(TextDescriptor).unwrap();
        map.insert(Text::new("one").unwrap(), 1).unwrap();
        map.insert(Text::new("two").unwrap(), 2).unwrap();
        assert_eq!(map.get(&Text::new("two").unwrap()), Some(&2));
        assert_eq!(format!("{}", Text::new("x").unwrap()), "x");
    }
}
