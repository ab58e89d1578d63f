//! `RbTreeMap` - an ordered map backed by a red-black tree.
//!
//! Nodes live in a [`SlotArena`] and carry `parent`, `left` and `right`
//! links as arena indices. Ordering comes from the key descriptor's
//! `compare`; keys the descriptor reports as equal are the same key.
//!
//! Balancing keeps the classic invariants:
//!
//! 1. The root is black.
//! 2. A red node has no red child.
//! 3. Every path from a node to a missing child crosses the same number of
//!    black nodes.
//!
//! Removing a node with two children swaps its key and value with its
//! in-order successor and unlinks the successor instead, so node indices are
//! not tied to keys.

use crate::alloc::SlotArena;
use crate::collections::Collection;
use crate::descriptor::{self, Natural, OrdDescriptor};
use crate::error::Result;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

struct Node<K, V> {
    color: Color,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
    key: K,
    value: V,
}

type Nodes<K, V> = SlotArena<Node<K, V>>;

fn leftmost<K, V>(nodes: &Nodes<K, V>, mut idx: usize) -> usize {
    while let Some(left) = nodes.get(idx).left {
        idx = left;
    }
    idx
}

fn rightmost<K, V>(nodes: &Nodes<K, V>, mut idx: usize) -> usize {
    while let Some(right) = nodes.get(idx).right {
        idx = right;
    }
    idx
}

/// In-order successor through the right subtree or the parent links.
fn successor<K, V>(nodes: &Nodes<K, V>, idx: usize) -> Option<usize> {
    if let Some(right) = nodes.get(idx).right {
        return Some(leftmost(nodes, right));
    }
    let mut cur = idx;
    while let Some(parent) = nodes.get(cur).parent {
        if nodes.get(parent).left == Some(cur) {
            return Some(parent);
        }
        cur = parent;
    }
    None
}

fn predecessor<K, V>(nodes: &Nodes<K, V>, idx: usize) -> Option<usize> {
    if let Some(left) = nodes.get(idx).left {
        return Some(rightmost(nodes, left));
    }
    let mut cur = idx;
    while let Some(parent) = nodes.get(cur).parent {
        if nodes.get(parent).right == Some(cur) {
            return Some(parent);
        }
        cur = parent;
    }
    None
}

/// An ordered map over a red-black tree.
pub struct RbTreeMap<K, V, D = Natural<K>> {
    nodes: Nodes<K, V>,
    root: Option<usize>,
    descriptor: D,
}

impl<K: Ord, V> RbTreeMap<K, V, Natural<K>> {
    /// Creates an empty map ordered by the key's `Ord`.
    ///
    /// # Errors
    /// `InvalidArgument` for zero-sized keys.
    pub fn new() -> Result<Self> {
        Self::with_descriptor(Natural::new())
    }
}

impl<K, V, D> RbTreeMap<K, V, D> {
    /// Number of entries.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-allocates node slots for `additional` more entries.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.nodes.reserve(additional)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    #[inline(always)]
    fn node(&self, idx: usize) -> &Node<K, V> {
        self.nodes.get(idx)
    }

    #[inline(always)]
    fn node_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        self.nodes.get_mut(idx)
    }

    /// Missing children count as black.
    #[inline(always)]
    fn is_red(&self, idx: Option<usize>) -> bool {
        idx.map_or(false, |i| self.node(i).color == Color::Red)
    }

    #[inline(always)]
    fn set_color(&mut self, idx: usize, color: Color) {
        self.node_mut(idx).color = color;
    }

    /// Points `parent`'s link to `old` at `new` instead, or the root if
    /// there is no parent.
    fn replace_child(&mut self, parent: Option<usize>, old: usize, new: Option<usize>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let node = self.node_mut(p);
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            }
        }
    }

    /// ```text
    ///     x              y
    ///    / \            / \
    ///   a   y    =>    x   c
    ///      / \        / \
    ///     b   c      a   b
    /// ```
    fn rotate_left(&mut self, x: usize) {
        let Some(y) = self.node(x).right else {
            return;
        };
        let b = self.node(y).left;
        let parent = self.node(x).parent;

        self.node_mut(x).right = b;
        if let Some(b) = b {
            self.node_mut(b).parent = Some(x);
        }
        self.node_mut(y).parent = parent;
        self.replace_child(parent, x, Some(y));
        self.node_mut(y).left = Some(x);
        self.node_mut(x).parent = Some(y);
    }

    /// Mirror image of [`rotate_left`](Self::rotate_left).
    fn rotate_right(&mut self, x: usize) {
        let Some(y) = self.node(x).left else {
            return;
        };
        let b = self.node(y).right;
        let parent = self.node(x).parent;

        self.node_mut(x).left = b;
        if let Some(b) = b {
            self.node_mut(b).parent = Some(x);
        }
        self.node_mut(y).parent = parent;
        self.replace_child(parent, x, Some(y));
        self.node_mut(y).right = Some(x);
        self.node_mut(x).parent = Some(y);
    }

    /// Restores the invariants after linking the red node `z`.
    fn fix_insert(&mut self, mut z: usize) {
        while let Some(p) = self.node(z).parent {
            if self.node(p).color == Color::Black {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let Some(g) = self.node(p).parent else {
                break;
            };

            if self.node(g).left == Some(p) {
                let uncle = self.node(g).right;
                if let Some(u) = uncle.filter(|&u| self.node(u).color == Color::Red) {
                    self.set_color(p, Color::Black);
                    self.set_color(u, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                    continue;
                }
                let mut p = p;
                if self.node(p).right == Some(z) {
                    self.rotate_left(p);
                    mem::swap(&mut z, &mut p);
                }
                self.set_color(p, Color::Black);
                self.set_color(g, Color::Red);
                self.rotate_right(g);
            } else {
                let uncle = self.node(g).left;
                if let Some(u) = uncle.filter(|&u| self.node(u).color == Color::Red) {
                    self.set_color(p, Color::Black);
                    self.set_color(u, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                    continue;
                }
                let mut p = p;
                if self.node(p).left == Some(z) {
                    self.rotate_right(p);
                    mem::swap(&mut z, &mut p);
                }
                self.set_color(p, Color::Black);
                self.set_color(g, Color::Red);
                self.rotate_left(g);
            }
        }
        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Restores the invariants after a black node was unlinked.
    ///
    /// `x` is the child that took its place (possibly missing) and `parent`
    /// is where it hangs; `x` carries an extra black that is pushed up or
    /// absorbed by rotations.
    fn fix_remove(&mut self, mut x: Option<usize>, mut parent: Option<usize>) {
        while x != self.root && !self.is_red(x) {
            let Some(p) = parent else {
                break;
            };

            if self.node(p).left == x {
                // The sibling subtree has black height >= 1, so it exists.
                let Some(mut w) = self.node(p).right else {
                    break;
                };
                if self.node(w).color == Color::Red {
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_left(p);
                    let Some(next) = self.node(p).right else {
                        break;
                    };
                    w = next;
                }
                let (wl, wr) = (self.node(w).left, self.node(w).right);
                if !self.is_red(wl) && !self.is_red(wr) {
                    self.set_color(w, Color::Red);
                    x = Some(p);
                    parent = self.node(p).parent;
                    continue;
                }
                if !self.is_red(wr) {
                    if let Some(wl) = wl {
                        self.set_color(wl, Color::Black);
                    }
                    self.set_color(w, Color::Red);
                    self.rotate_right(w);
                    let Some(next) = self.node(p).right else {
                        break;
                    };
                    w = next;
                }
                self.set_color(w, self.node(p).color);
                self.set_color(p, Color::Black);
                if let Some(wr) = self.node(w).right {
                    self.set_color(wr, Color::Black);
                }
                self.rotate_left(p);
            } else {
                let Some(mut w) = self.node(p).left else {
                    break;
                };
                if self.node(w).color == Color::Red {
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_right(p);
                    let Some(next) = self.node(p).left else {
                        break;
                    };
                    w = next;
                }
                let (wl, wr) = (self.node(w).left, self.node(w).right);
                if !self.is_red(wl) && !self.is_red(wr) {
                    self.set_color(w, Color::Red);
                    x = Some(p);
                    parent = self.node(p).parent;
                    continue;
                }
                if !self.is_red(wl) {
                    if let Some(wr) = wr {
                        self.set_color(wr, Color::Black);
                    }
                    self.set_color(w, Color::Red);
                    self.rotate_left(w);
                    let Some(next) = self.node(p).left else {
                        break;
                    };
                    w = next;
                }
                self.set_color(w, self.node(p).color);
                self.set_color(p, Color::Black);
                if let Some(wl) = self.node(w).left {
                    self.set_color(wl, Color::Black);
                }
                self.rotate_right(p);
            }
            x = self.root;
            break;
        }
        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }

    /// Unlinks the node at `idx`, rebalances, and returns its payload.
    fn remove_node(&mut self, idx: usize) -> (K, V) {
        let mut target = idx;
        if let (Some(_), Some(right)) = (self.node(idx).left, self.node(idx).right) {
            let succ = leftmost(&self.nodes, right);
            let (a, b) = self.nodes.get2_mut(idx, succ);
            mem::swap(&mut a.key, &mut b.key);
            mem::swap(&mut a.value, &mut b.value);
            target = succ;
        }

        let node = self.node(target);
        let child = node.left.or(node.right);
        let parent = node.parent;
        let color = node.color;

        if let Some(c) = child {
            self.node_mut(c).parent = parent;
        }
        self.replace_child(parent, target, child);
        let removed = self.nodes.remove(target);

        if color == Color::Black {
            match child {
                // A black node with one child has a red child.
                Some(c) => self.set_color(c, Color::Black),
                None if parent.is_some() => self.fix_remove(None, parent),
                None => {}
            }
        }
        (removed.key, removed.value)
    }

    /// Smallest key and its value.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let idx = leftmost(&self.nodes, self.root?);
        let node = self.node(idx);
        Some((&node.key, &node.value))
    }

    /// Largest key and its value.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let idx = rightmost(&self.nodes, self.root?);
        let node = self.node(idx);
        Some((&node.key, &node.value))
    }

    /// In-order iterator over `(key, value)` pairs.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            front: self.root.map(|r| leftmost(&self.nodes, r)),
            back: self.root.map(|r| rightmost(&self.nodes, r)),
            remaining: self.len(),
        }
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Values in ascending key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Calls `f` on every entry in ascending key order.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V),
    {
        let mut cur = self.root.map(|r| leftmost(&self.nodes, r));
        while let Some(idx) = cur {
            let node = self.nodes.get_mut(idx);
            f(&node.key, &mut node.value);
            cur = successor(&self.nodes, idx);
        }
    }
}

impl<K, V, D: OrdDescriptor<Item = K>> RbTreeMap<K, V, D> {
    /// Creates an empty map ordered by `descriptor`.
    ///
    /// # Errors
    /// `InvalidArgument` if the descriptor reports a size of zero.
    pub fn with_descriptor(descriptor: D) -> Result<Self> {
        descriptor::validate(&descriptor)?;
        Ok(Self {
            nodes: SlotArena::new(),
            root: None,
            descriptor,
        })
    }

    /// The key descriptor.
    pub fn descriptor(&self) -> &D {
        &self.descriptor
    }

    fn find(&self, key: &K) -> Option<usize> {
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = self.node(idx);
            cur = match self.descriptor.compare(key, &node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(idx),
            };
        }
        None
    }

    /// Inserts or updates a key.
    ///
    /// An equal key keeps the stored key; the value is replaced and the old
    /// value returned.
    ///
    /// # Errors
    /// `OutOfMemory` if the node cannot be allocated; the map is unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let mut parent = None;
        let mut went_left = false;
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = self.node(idx);
            parent = Some(idx);
            match self.descriptor.compare(&key, &node.key) {
                Ordering::Less => {
                    went_left = true;
                    cur = node.left;
                }
                Ordering::Greater => {
                    went_left = false;
                    cur = node.right;
                }
                Ordering::Equal => {
                    return Ok(Some(mem::replace(&mut self.node_mut(idx).value, value)));
                }
            }
        }

        let idx = self.nodes.insert(Node {
            color: Color::Red,
            parent,
            left: None,
            right: None,
            key,
            value,
        })?;
        match parent {
            None => self.root = Some(idx),
            Some(p) if went_left => self.node_mut(p).left = Some(idx),
            Some(p) => self.node_mut(p).right = Some(idx),
        }
        self.fix_insert(idx);
        Ok(None)
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|idx| &self.node(idx).value)
    }

    /// Mutable value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(&mut self.node_mut(idx).value)
    }

    /// Stored key and value for `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find(key).map(|idx| {
            let node = self.node(idx);
            (&node.key, &node.value)
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
        let idx = self.find(key)?;
        Some(self.remove_node(idx))
    }

    /// Verifies ordering, link consistency and the red-black invariants.
    /// Returns the black height.
    #[doc(hidden)]
    pub fn check_invariants(&self) -> core::result::Result<usize, &'static str> {
        if self.is_red(self.root) {
            return Err("root is red");
        }
        if let Some(root) = self.root {
            if self.node(root).parent.is_some() {
                return Err("root has a parent");
            }
        }
        let height = self.black_height(self.root)?;

        let mut prev: Option<&K> = None;
        let mut count = 0;
        for (key, _) in self.iter() {
            if let Some(prev) = prev {
                if self.descriptor.compare(prev, key) != Ordering::Less {
                    return Err("keys out of order");
                }
            }
            prev = Some(key);
            count += 1;
        }
        if count != self.len() {
            return Err("reachable nodes differ from len");
        }
        Ok(height)
    }

    fn black_height(&self, idx: Option<usize>) -> core::result::Result<usize, &'static str> {
        let Some(idx) = idx else {
            return Ok(1);
        };
        let node = self.node(idx);
        for child in [node.left, node.right].into_iter().flatten() {
            if self.node(child).parent != Some(idx) {
                return Err("broken parent link");
            }
            if node.color == Color::Red && self.node(child).color == Color::Red {
                return Err("red node with red child");
            }
        }
        let left = self.black_height(node.left)?;
        let right = self.black_height(node.right)?;
        if left != right {
            return Err("unequal black heights");
        }
        Ok(left + usize::from(node.color == Color::Black))
    }
}

impl<K, V, D> Collection for RbTreeMap<K, V, D> {
    fn len(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        self.clear();
    }
}

impl<K: fmt::Debug, V: fmt::Debug, D> fmt::Debug for RbTreeMap<K, V, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, D> IntoIterator for &'a RbTreeMap<K, V, D> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over an [`RbTreeMap`].
pub struct Iter<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front?;
        self.front = successor(self.nodes, idx);
        self.remaining -= 1;
        let node = self.nodes.get(idx);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back?;
        self.back = predecessor(self.nodes, idx);
        self.remaining -= 1;
        let node = self.nodes.get(idx);
        Some((&node.key, &node.value))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}
impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// Ascending keys of an [`RbTreeMap`].
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

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}
impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

/// Values of an [`RbTreeMap`] in ascending key order.
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

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}
impl<'a, K, V> FusedIterator for Values<'a, K, V> {}
