//! Array-backed sequences built on [`GrowableBuffer`](crate::alloc::GrowableBuffer).

pub mod vec;
pub mod vec_deque;

pub use vec::DynArray;
pub use vec_deque::RingDeque;
