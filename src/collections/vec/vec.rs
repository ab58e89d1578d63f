//! `DynArray` - a growable array over a [`GrowableBuffer`].
//!
//! Live elements occupy slots `0..len`. Growth doubles from eight slots and is
//! fallible: a failed allocation is reported as `OutOfMemory` and the array
//! is left as it was.

use crate::alloc::GrowableBuffer;
use crate::collections::Collection;
use crate::descriptor::{self, Natural, OrdDescriptor, TypeDescriptor};
use crate::error::{CollectionError, Result};
use core::fmt;
use core::mem;
use core::ops::{Deref, DerefMut};
use core::ptr;
use core::slice;

/// A contiguous growable array.
pub struct DynArray<T, D = Natural<T>> {
    buf: GrowableBuffer<T>,
    descriptor: D,
}

impl<T> DynArray<T, Natural<T>> {
    /// Creates an empty array using the element's natural descriptor.
    pub fn new() -> Result<Self> {
        Self::with_descriptor(Natural::new())
    }

    /// Creates an empty array with room for at least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut array = Self::new()?;
        array.reserve(capacity)?;
        Ok(array)
    }
}

impl<T, D: TypeDescriptor<Item = T>> DynArray<T, D> {
    /// Creates an empty array described by `descriptor`.
    ///
    /// # Errors
    /// `InvalidArgument` if the descriptor reports a size of zero.
    pub fn with_descriptor(descriptor: D) -> Result<Self> {
        descriptor::validate(&descriptor)?;
        Ok(Self {
            buf: GrowableBuffer::new(),
            descriptor,
        })
    }

    /// The descriptor this array was built with.
    pub fn descriptor(&self) -> &D {
        &self.descriptor
    }
}

impl<T, D> DynArray<T, D> {
    /// Number of elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Current capacity.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Ensures room for `additional` more elements.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.buf.reserve(additional)
    }

    /// Appends an element.
    pub fn push(&mut self, value: T) -> Result<()> {
        let len = self.len();
        if len == self.capacity() {
            self.buf.reserve(1)?;
        }
        // SAFETY: `len < capacity` after the reserve above.
        unsafe {
            self.buf.write(len, value);
            self.buf.set_len(len + 1);
        }
        Ok(())
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        // SAFETY: slot `len - 1` is live and is forgotten by `set_len`.
        unsafe {
            self.buf.set_len(len - 1);
            Some(self.buf.read(len - 1))
        }
    }

    /// Inserts `value` at `index`, shifting later elements one slot right.
    ///
    /// # Errors
    /// `OutOfRange` if `index > len`, `OutOfMemory` if growth failed.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(CollectionError::out_of_range(index, len));
        }
        if len == self.capacity() {
            self.buf.reserve(1)?;
        }
        // SAFETY: `len < capacity`, so shifting `index..len` by one stays in bounds.
        unsafe {
            self.buf.copy(index, index + 1, len - index);
            self.buf.write(index, value);
            self.buf.set_len(len + 1);
        }
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting later elements left.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let len = self.len();
        if index >= len {
            return None;
        }
        // SAFETY: `index` is live; the tail shift closes the hole.
        unsafe {
            let value = self.buf.read(index);
            self.buf.copy(index + 1, index, len - index - 1);
            self.buf.set_len(len - 1);
            Some(value)
        }
    }

    /// Swaps two elements.
    ///
    /// # Panics
    /// If either index is out of bounds.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.as_mut_slice().swap(a, b);
    }

    /// Element at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Mutable element at `index`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// First element.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Last element.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// The live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `0..len` are initialized.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len()) }
    }

    /// The live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len();
        // SAFETY: slots `0..len` are initialized.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), len) }
    }

    /// Iterator over the elements in index order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Mutable iterator over the elements in index order.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Drops every element; capacity is kept.
    pub fn clear(&mut self) {
        let len = self.len();
        // SAFETY: zero is always a valid length.
        unsafe { self.buf.set_len(0) };
        if mem::needs_drop::<T>() {
            // SAFETY: the formerly live prefix is dropped exactly once.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr(), len));
            }
        }
    }
}

impl<T, D: OrdDescriptor<Item = T>> DynArray<T, D> {
    /// Sorts the elements by the descriptor's ordering. Stable.
    pub fn sort(&mut self) {
        let Self { buf, descriptor } = self;
        let len = buf.len();
        // SAFETY: slots `0..len` are initialized.
        let elements = unsafe { slice::from_raw_parts_mut(buf.as_mut_ptr(), len) };
        elements.sort_by(|a, b| descriptor.compare(a, b));
    }
}

impl<T, D> Deref for DynArray<T, D> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, D> DerefMut for DynArray<T, D> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, D> Drop for DynArray<T, D> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, D> Collection for DynArray<T, D> {
    fn len(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug, D> fmt::Debug for DynArray<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, D> IntoIterator for &'a DynArray<T, D> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, D> IntoIterator for &'a mut DynArray<T, D> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Reverse;

    #[test]
    fn push_pop_and_access() {
        let mut arr = DynArray::new().unwrap();
        for i in 0..10 {
            arr.push(i).unwrap();
        }
        assert_eq!(arr.len(), 10);
        assert_eq!(arr.capacity(), 16);
        assert_eq!(arr.first(), Some(&0));
        assert_eq!(arr.last(), Some(&9));
        assert_eq!(arr.get(10), None);
        *arr.get_mut(3).unwrap() = 30;
        assert_eq!(arr[3], 30);
        assert_eq!(arr.pop(), Some(9));
        assert_eq!(arr.len(), 9);
    }

    #[test]
    fn insert_and_remove_shift_elements() {
        let mut arr = DynArray::new().unwrap();
        for i in [1, 2, 4] {
            arr.push(i).unwrap();
        }
        arr.insert(2, 3).unwrap();
        arr.insert(0, 0).unwrap();
        arr.insert(5, 5).unwrap();
        assert_eq!(arr.as_slice(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(
            arr.insert(9, 9),
            Err(CollectionError::OutOfRange { index: 9, len: 6 })
        );

        assert_eq!(arr.remove(0), Some(0));
        assert_eq!(arr.remove(2), Some(3));
        assert_eq!(arr.remove(9), None);
        assert_eq!(arr.as_slice(), &[1, 2, 4, 5]);
    }

    #[test]
    fn sort_uses_descriptor() {
        let mut arr = DynArray::with_descriptor(Reverse(Natural::new())).unwrap();
        for i in [3, 1, 4, 1, 5, 9, 2, 6] {
            arr.push(i).unwrap();
        }
        arr.sort();
        assert_eq!(arr.as_slice(), &[9, 6, 5, 4, 3, 2, 1, 1]);
    }

    #[test]
    fn clear_drops_and_keeps_capacity() {
        let mut arr = DynArray::new().unwrap();
        for i in 0..20 {
            arr.push(i.to_string()).unwrap();
        }
        let cap = arr.capacity();
        arr.clear();
        assert!(arr.is_empty());
        assert_eq!(arr.capacity(), cap);
    }

    #[test]
    fn clear_of_plain_values_allows_reuse() {
        let mut arr = DynArray::new().unwrap();
        for i in 0..12u64 {
            arr.push(i).unwrap();
        }
        arr.clear();
        assert!(arr.is_empty());
        arr.push(42).unwrap();
        assert_eq!(arr.as_slice(), &[42]);
        assert_eq!(arr.capacity(), 16);
    }

    #[test]
    fn zero_sized_rejected() {
        assert!(DynArray::<()>::new().is_err());
    }
}
