//! `RingDeque` - a growable ring buffer deque.
//!
//! Elements live in a [`GrowableBuffer`] window that starts at `head` and may
//! wrap past the physical end of the buffer: logical index `i` sits in
//! physical slot `(head + i) % capacity`.
//!
//! ```text
//!              T       H
//!   [ o o o o . . . . o o o ]     head = 8, len = 7, wrapped
//! ```
//!
//! Growth preserves logical order without rewriting every element: when the
//! window wraps, only the run from `head` to the old physical end moves, to
//! the end of the enlarged buffer, and `head` advances by the number of slots
//! added.
//!
//! ```text
//!              H
//!   [ o o o . . o o o ] . . . . . . . . ]
//!                               H
//!   [ o o o . . . . . . . . . . o o o ]
//! ```

use crate::alloc::GrowableBuffer;
use crate::collections::Collection;
use crate::descriptor::{self, Natural, TypeDescriptor};
use crate::error::{CollectionError, Result};
use core::fmt;
use core::iter::{Chain, FusedIterator};
use core::mem;
use core::ptr;
use core::slice;

/// A double-ended queue over a ring buffer.
pub struct RingDeque<T, D = Natural<T>> {
    buf: GrowableBuffer<T>,
    /// Physical slot of logical index 0. Zero while the buffer is unallocated.
    head: usize,
    descriptor: D,
}

impl<T> RingDeque<T, Natural<T>> {
    /// Creates an empty deque using the element's natural descriptor.
    ///
    /// # Errors
    /// `InvalidArgument` if `T` is zero-sized.
    pub fn new() -> Result<Self> {
        Self::with_descriptor(Natural::new())
    }

    /// Creates an empty deque with room for at least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut deque = Self::new()?;
        deque.reserve(capacity)?;
        Ok(deque)
    }
}

impl<T, D: TypeDescriptor<Item = T>> RingDeque<T, D> {
    /// Creates an empty deque described by `descriptor`.
    ///
    /// # Errors
    /// `InvalidArgument` if the descriptor reports a size of zero.
    pub fn with_descriptor(descriptor: D) -> Result<Self> {
        descriptor::validate(&descriptor)?;
        Ok(Self {
            buf: GrowableBuffer::new(),
            head: 0,
            descriptor,
        })
    }

    /// The descriptor this deque was built with.
    pub fn descriptor(&self) -> &D {
        &self.descriptor
    }
}

impl<T, D> RingDeque<T, D> {
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

    /// Physical slot of logical `index`. Requires a non-zero capacity.
    #[inline(always)]
    fn slot(&self, index: usize) -> usize {
        (self.head + index) % self.capacity()
    }

    #[inline(always)]
    fn wrapped_dec(&self, slot: usize) -> usize {
        if slot == 0 {
            self.capacity() - 1
        } else {
            slot - 1
        }
    }

    /// Moves the element at logical `from` into logical `to`.
    ///
    /// # Safety
    /// `from` holds a live element and `to` is free (or about to be vacated).
    #[inline(always)]
    unsafe fn move_logical(&mut self, from: usize, to: usize) {
        let (src, dst) = (self.slot(from), self.slot(to));
        self.buf.copy(src, dst, 1);
    }

    /// Ensures room for `additional` more elements.
    ///
    /// If the live window wraps when the buffer grows, the run from `head` to
    /// the old end is relocated to the end of the new buffer.
    ///
    /// # Errors
    /// `OutOfMemory` if the buffer cannot grow; contents are untouched.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let old_cap = self.capacity();
        self.buf.reserve(additional)?;
        let new_cap = self.capacity();

        if new_cap > old_cap && self.head + self.len() > old_cap {
            let run = old_cap - self.head;
            let added = new_cap - old_cap;
            // SAFETY: both ranges lie inside the new capacity; the source run
            // holds live elements and the destination overlaps only itself.
            unsafe { self.buf.copy(self.head, self.head + added, run) };
            self.head += added;
            debug_event!(old_cap, new_cap, run, head = self.head, "deque relocated wrapped run");
        }
        Ok(())
    }

    #[inline]
    fn reserve_one(&mut self) -> Result<()> {
        if self.len() == self.capacity() {
            self.reserve(1)?;
        }
        Ok(())
    }

    /// Appends an element.
    ///
    /// # Errors
    /// `OutOfMemory` if the deque was full and could not grow.
    pub fn push_back(&mut self, value: T) -> Result<()> {
        self.reserve_one()?;
        let len = self.len();
        let tail = self.slot(len);
        // SAFETY: `len < capacity`, so the tail slot is free.
        unsafe {
            self.buf.write(tail, value);
            self.buf.set_len(len + 1);
        }
        Ok(())
    }

    /// Prepends an element.
    ///
    /// # Errors
    /// `OutOfMemory` if the deque was full and could not grow.
    pub fn push_front(&mut self, value: T) -> Result<()> {
        self.reserve_one()?;
        let len = self.len();
        self.head = self.wrapped_dec(self.head);
        // SAFETY: `len < capacity`, so the slot before the old head is free.
        unsafe {
            self.buf.write(self.head, value);
            self.buf.set_len(len + 1);
        }
        Ok(())
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let head = self.head;
        self.head = (head + 1) % self.capacity();
        // SAFETY: the head slot holds a live element which we take ownership of.
        unsafe {
            self.buf.set_len(len - 1);
            Some(self.buf.read(head))
        }
    }

    /// Removes and returns the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let last = self.slot(len - 1);
        // SAFETY: the last slot holds a live element which we take ownership of.
        unsafe {
            self.buf.set_len(len - 1);
            Some(self.buf.read(last))
        }
    }

    /// Inserts `value` so that it ends up at logical `index`.
    ///
    /// `index == 0` is a `push_front` and `index == len` a `push_back`.
    /// Otherwise the shorter side of the window is shifted by one slot: the
    /// front part moves towards the front (and `head` steps back), or the
    /// back part moves towards the back (and `head` stays).
    ///
    /// # Errors
    /// `OutOfRange` if `index > len`, `OutOfMemory` if growth failed. The
    /// deque is unchanged on error.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(CollectionError::out_of_range(index, len));
        }
        if index == len {
            return self.push_back(value);
        }
        if index == 0 {
            return self.push_front(value);
        }

        self.reserve_one()?;
        // SAFETY: there is at least one free slot; every move targets either
        // that slot or one just vacated by the previous move.
        unsafe {
            if index < len - index {
                self.head = self.wrapped_dec(self.head);
                for i in 0..index {
                    self.move_logical(i + 1, i);
                }
            } else {
                for i in (index..len).rev() {
                    self.move_logical(i, i + 1);
                }
            }
            let target = self.slot(index);
            self.buf.write(target, value);
            self.buf.set_len(len + 1);
        }
        Ok(())
    }

    /// Removes and returns the element at logical `index`, closing the gap
    /// from whichever side is shorter.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let len = self.len();
        if index >= len {
            return None;
        }
        if index == 0 {
            return self.pop_front();
        }
        if index == len - 1 {
            return self.pop_back();
        }

        // SAFETY: `index` is live; afterwards each move fills the hole left by
        // the previous one, ending with a hole at the front or the back.
        unsafe {
            let value = self.buf.read(self.slot(index));
            if index < len - index - 1 {
                for i in (0..index).rev() {
                    self.move_logical(i, i + 1);
                }
                self.head = (self.head + 1) % self.capacity();
            } else {
                for i in index + 1..len {
                    self.move_logical(i, i - 1);
                }
            }
            self.buf.set_len(len - 1);
            Some(value)
        }
    }

    /// Element at logical `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        // SAFETY: `index < len`, so the slot is live.
        unsafe { Some(self.buf.get_unchecked(self.slot(index))) }
    }

    /// Mutable element at logical `index`, or `None` past the end.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len() {
            return None;
        }
        let slot = self.slot(index);
        // SAFETY: `index < len`, so the slot is live.
        unsafe { Some(self.buf.get_unchecked_mut(slot)) }
    }

    /// First element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Mutable first element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Mutable last element.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        match self.len().checked_sub(1) {
            Some(i) => self.get_mut(i),
            None => None,
        }
    }

    /// Drops every element in logical order. Capacity is kept.
    pub fn clear(&mut self) {
        let len = self.len();
        // Forget the elements first so a panicking destructor cannot cause a
        // double drop.
        // SAFETY: zero is always a valid length.
        unsafe { self.buf.set_len(0) };
        if !mem::needs_drop::<T>() {
            self.head = 0;
            return;
        }
        for i in 0..len {
            let slot = self.slot(i);
            // SAFETY: slots `0..len` held live elements before `set_len(0)`.
            unsafe { ptr::drop_in_place(self.buf.as_mut_ptr().add(slot)) };
        }
        self.head = 0;
    }

    /// The contents as two slices, front run first.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let len = self.len();
        if len == 0 {
            return (&[], &[]);
        }
        let first = len.min(self.capacity() - self.head);
        // SAFETY: `head..head + first` and `0..len - first` are live slots.
        unsafe {
            let base = self.buf.as_ptr();
            (
                slice::from_raw_parts(base.add(self.head), first),
                slice::from_raw_parts(base, len - first),
            )
        }
    }

    /// The contents as two mutable slices, front run first.
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let len = self.len();
        if len == 0 {
            return (&mut [], &mut []);
        }
        let first = len.min(self.capacity() - self.head);
        let head = self.head;
        // SAFETY: the two ranges are live and disjoint because `len <= capacity`.
        unsafe {
            let base = self.buf.as_mut_ptr();
            (
                slice::from_raw_parts_mut(base.add(head), first),
                slice::from_raw_parts_mut(base, len - first),
            )
        }
    }

    /// Front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T, D> {
        Iter {
            deque: self,
            front: 0,
            back: self.len(),
        }
    }

    /// Front-to-back iterator over mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (a, b) = self.as_mut_slices();
        IterMut {
            inner: a.iter_mut().chain(b.iter_mut()),
        }
    }

    /// Appends every item of `iter`, stopping at the first allocation failure.
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<()> {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0)?;
        for item in iter {
            self.push_back(item)?;
        }
        Ok(())
    }
}

impl<T, D> Drop for RingDeque<T, D> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, D> Collection for RingDeque<T, D> {
    fn len(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug, D> fmt::Debug for RingDeque<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, D> IntoIterator for &'a RingDeque<T, D> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a [`RingDeque`].
pub struct Iter<'a, T, D> {
    deque: &'a RingDeque<T, D>,
    front: usize,
    back: usize,
}

impl<'a, T, D> Iterator for Iter<'a, T, D> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.deque.get(self.front);
        self.front += 1;
        item
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<'a, T, D> DoubleEndedIterator for Iter<'a, T, D> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.deque.get(self.back)
    }
}

impl<'a, T, D> ExactSizeIterator for Iter<'a, T, D> {}
impl<'a, T, D> FusedIterator for Iter<'a, T, D> {}

/// Mutable iterator over a [`RingDeque`].
pub struct IterMut<'a, T> {
    inner: Chain<slice::IterMut<'a, T>, slice::IterMut<'a, T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}
impl<'a, T> FusedIterator for IterMut<'a, T> {}
