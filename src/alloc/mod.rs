//! Storage primitives shared by the containers.
//!
//! - [`GrowableBuffer`]: contiguous, possibly uninitialized slots with a
//!   doubling growth policy. Backs the array, the ring deque and the heap.
//! - [`SlotArena`]: entries addressed by stable indices with slot reuse.
//!   Backs hash-map chains, red-black tree entries and list nodes.
//!
//! Both allocate fallibly and report [`CollectionError::OutOfMemory`]
//! without changing their contents.
//!
//! [`CollectionError::OutOfMemory`]: crate::error::CollectionError::OutOfMemory

pub mod arena;
pub mod buffer;

pub use arena::SlotArena;
pub use buffer::GrowableBuffer;
