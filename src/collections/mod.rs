//! Descriptor-parameterized collections.
//!
//! Collections are organized by data structure type:
//! - `vec`: contiguous array and ring-buffer deque
//! - `hash`: chained hash map and set
//! - `tree`: red-black tree map and set
//! - `other`: linked list and binary heap
//! - `string`: growable text and its descriptor

pub mod hash;
pub mod other;
pub mod string;
pub mod tree;
pub mod vec;

pub use hash::{ChainedHashMap, ChainedHashSet};
pub use other::{BinaryHeap, LinkedList};
pub use string::{Text, TextDescriptor};
pub use tree::{RbTreeMap, RbTreeSet};
pub use vec::{DynArray, RingDeque};

/// Operations shared by every container.
pub trait Collection {
    /// Number of live elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every element, keeping allocated storage where the container can.
    fn clear(&mut self);
}
