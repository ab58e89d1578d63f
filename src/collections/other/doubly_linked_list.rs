//! `LinkedList` - a doubly linked list over a [`SlotArena`].
//!
//! Nodes refer to their neighbours by arena index, so there are no raw
//! pointers and vacated slots are reused by later pushes.

use crate::alloc::SlotArena;
use crate::collections::Collection;
use crate::descriptor::{self, Natural, TypeDescriptor};
use crate::error::Result;
use core::fmt;
use core::iter::FusedIterator;

struct Node<T> {
    prev: Option<usize>,
    next: Option<usize>,
    value: T,
}

/// A doubly linked list.
pub struct LinkedList<T, D = Natural<T>> {
    nodes: SlotArena<Node<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    descriptor: D,
}

impl<T> LinkedList<T, Natural<T>> {
    /// Creates an empty list.
    pub fn new() -> Result<Self> {
        Self::with_descriptor(Natural::new())
    }
}

impl<T, D: TypeDescriptor<Item = T>> LinkedList<T, D> {
    /// Creates an empty list described by `descriptor`.
    pub fn with_descriptor(descriptor: D) -> Result<Self> {
        descriptor::validate(&descriptor)?;
        Ok(Self {
            nodes: SlotArena::new(),
            head: None,
            tail: None,
            descriptor,
        })
    }

    /// The descriptor this list was built with.
    pub fn descriptor(&self) -> &D {
        &self.descriptor
    }
}

impl<T, D> LinkedList<T, D> {
    /// Returns the number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pushes an element to the front of the list.
    pub fn push_front(&mut self, value: T) -> Result<()> {
        let idx = self.nodes.insert(Node {
            prev: None,
            next: self.head,
            value,
        })?;
        match self.head {
            Some(old) => self.nodes.get_mut(old).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        Ok(())
    }

    /// Pushes an element to the back of the list.
    pub fn push_back(&mut self, value: T) -> Result<()> {
        let idx = self.nodes.insert(Node {
            prev: self.tail,
            next: None,
            value,
        })?;
        match self.tail {
            Some(old) => self.nodes.get_mut(old).next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        Ok(())
    }

    /// Removes and returns the front element.
    pub fn pop_front(&mut self) -> Option<T> {
        let idx = self.head?;
        let node = self.nodes.remove(idx);
        self.head = node.next;
        match node.next {
            Some(next) => self.nodes.get_mut(next).prev = None,
            None => self.tail = None,
        }
        Some(node.value)
    }

    /// Removes and returns the back element.
    pub fn pop_back(&mut self) -> Option<T> {
        let idx = self.tail?;
        let node = self.nodes.remove(idx);
        self.tail = node.prev;
        match node.prev {
            Some(prev) => self.nodes.get_mut(prev).next = None,
            None => self.head = None,
        }
        Some(node.value)
    }

    /// Front element.
    pub fn front(&self) -> Option<&T> {
        self.head.map(|idx| &self.nodes.get(idx).value)
    }

    /// Back element.
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|idx| &self.nodes.get(idx).value)
    }

    /// Mutable front element.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let idx = self.head?;
        Some(&mut self.nodes.get_mut(idx).value)
    }

    /// Mutable back element.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let idx = self.tail?;
        Some(&mut self.nodes.get_mut(idx).value)
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }
}

impl<T, D> Collection for LinkedList<T, D> {
    fn len(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug, D> fmt::Debug for LinkedList<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, D> IntoIterator for &'a LinkedList<T, D> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`LinkedList`].
pub struct Iter<'a, T> {
    nodes: &'a SlotArena<Node<T>>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.front?);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.back?);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T> FusedIterator for Iter<'a, T> {}
