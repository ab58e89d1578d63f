//! `BinaryHeap` - a priority queue ordered by a descriptor.
//!
//! This implementation uses [`DynArray`] as the backing storage. The greatest
//! element under the descriptor's ordering sits at index 0; wrap the
//! descriptor in [`Reverse`](crate::descriptor::Reverse) for a min-heap.

use crate::collections::vec::DynArray;
use crate::collections::Collection;
use crate::descriptor::{Natural, OrdDescriptor};
use crate::error::Result;
use core::cmp::Ordering;
use core::fmt;
use core::slice;

/// A max-heap by descriptor order.
pub struct BinaryHeap<T, D = Natural<T>> {
    data: DynArray<T, D>,
}

impl<T: Ord> BinaryHeap<T, Natural<T>> {
    /// Creates an empty heap ordered by `T`'s `Ord`.
    pub fn new() -> Result<Self> {
        Self::with_descriptor(Natural::new())
    }
}

impl<T, D: OrdDescriptor<Item = T>> BinaryHeap<T, D> {
    /// Creates an empty heap ordered by `descriptor`.
    pub fn with_descriptor(descriptor: D) -> Result<Self> {
        Ok(Self {
            data: DynArray::with_descriptor(descriptor)?,
        })
    }

    /// Pushes an item onto the heap.
    pub fn push(&mut self, item: T) -> Result<()> {
        self.data.push(item)?;
        self.sift_up(self.data.len() - 1);
        Ok(())
    }

    /// Pops the greatest item.
    pub fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let item = self.data.pop()?;
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Some(item)
    }

    /// Consumes the heap into a vector sorted ascending by the descriptor.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(item) = self.pop() {
            out.push(item);
        }
        out.reverse();
        out
    }

    fn sift_up(&mut self, mut node: usize) {
        while node > 0 {
            let parent = (node - 1) / 2;
            if self.less(parent, node) {
                self.data.swap(parent, node);
                node = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut node: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * node + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut greater = left;
            if right < len && self.less(left, right) {
                greater = right;
            }

            if self.less(node, greater) {
                self.data.swap(node, greater);
                node = greater;
            } else {
                break;
            }
        }
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        let items = self.data.as_slice();
        self.data.descriptor().compare(&items[a], &items[b]) == Ordering::Less
    }
}

impl<T, D> BinaryHeap<T, D> {
    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current capacity of the backing array.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Ensures room for `additional` more elements.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.data.reserve(additional)
    }

    /// The greatest item.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Elements in storage order, not priority order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T, D> Collection for BinaryHeap<T, D> {
    fn len(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug, D> fmt::Debug for BinaryHeap<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Reverse;

    #[test]
    fn test_binary_heap_basic() {
        let mut heap = BinaryHeap::new().unwrap();
        heap.push(1).unwrap();
        heap.push(5).unwrap();
        heap.push(2).unwrap();
        heap.push(10).unwrap();

        assert_eq!(heap.peek(), Some(&10));
        assert_eq!(heap.pop(), Some(10));
        assert_eq!(heap.peek(), Some(&5));
        assert_eq!(heap.pop(), Some(5));
        assert_eq!(heap.pop(), Some(2));
        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn test_min_heap_via_reverse() {
        let mut heap = BinaryHeap::with_descriptor(Reverse(Natural::new())).unwrap();
        for x in [1, 10, 5, 2, 8, 3, 7] {
            heap.push(x).unwrap();
        }
        assert_eq!(heap.peek(), Some(&1));
        let mut result = Vec::new();
        while let Some(x) = heap.pop() {
            result.push(x);
        }
        assert_eq!(result, [1, 2, 3, 5, 7, 8, 10]);
    }

    #[test]
    fn test_into_sorted_vec() {
        let mut heap = BinaryHeap::new().unwrap();
        for x in [4, 9, 1, 9, 0] {
            heap.push(x).unwrap();
        }
        assert_eq!(heap.iter().len(), 5);
        assert_eq!(heap.into_sorted_vec(), [0, 1, 4, 9, 9]);
    }
}
