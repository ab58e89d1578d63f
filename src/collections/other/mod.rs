//! Auxiliary collections: linked list and priority queue.

pub mod binary_heap;
pub mod doubly_linked_list;

pub use binary_heap::BinaryHeap;
pub use doubly_linked_list::LinkedList;
