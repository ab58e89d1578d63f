//! # `vessel` - Descriptor-Parameterized Collections
//!
//! General-purpose in-memory containers whose element behavior is supplied by
//! a *type descriptor* rather than baked into the element type. A descriptor
//! states what a container may do with its elements: every descriptor has a
//! size, ordered containers also need a three-way `compare`, hashed
//! containers also need a `hash`.
//!
//! ## Containers
//!
//! - [`RingDeque`]: growable ring buffer with O(1) operations at both ends and
//!   positional insert/remove that shifts the shorter side.
//! - [`ChainedHashMap`] / [`ChainedHashSet`]: separate chaining over a
//!   power-of-two table that doubles at a 3/4 load factor.
//! - [`RbTreeMap`] / [`RbTreeSet`]: red-black tree with ordered iteration.
//! - [`DynArray`], [`LinkedList`], [`BinaryHeap`], [`Text`]: supporting
//!   containers built on the same storage primitives.
//!
//! ## Error model
//!
//! Mutators return [`Result`]; accessors return `Option`. A failed operation
//! leaves the container exactly as it was: storage is allocated before any
//! structural change, and allocation failure is reported as
//! [`CollectionError::OutOfMemory`] instead of aborting.
//!
//! ## Descriptors
//!
//! [`Natural`] uses the element's own `Ord` and `Hash`. Custom behavior comes
//! from implementing [`OrdDescriptor`] / [`HashDescriptor`], or from the
//! built-ins [`Approx`], [`Reverse`], [`Caseless`] and [`TextDescriptor`].
//!
//! ## Example
//!
//! ```rust
//! use vessel::{ChainedHashMap, RbTreeSet, RingDeque};
//!
//! let mut deque = RingDeque::new()?;
//! deque.push_back(1)?;
//! deque.push_front(0)?;
//! deque.insert(1, 100)?;
//! assert_eq!(deque.iter().copied().collect::<Vec<_>>(), [0, 100, 1]);
//!
//! let mut prices = ChainedHashMap::new()?;
//! prices.insert("Apple".to_string(), 10)?;
//! assert_eq!(prices.get(&"Apple".to_string()), Some(&10));
//!
//! let mut set = RbTreeSet::new()?;
//! for k in [874, 638, 96] {
//!     set.insert(k)?;
//! }
//! assert_eq!(set.first(), Some(&96));
//! # Ok::<(), vessel::CollectionError>(())
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

/// Emits a `tracing` debug event when the `tracing` feature is enabled.
macro_rules! debug_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

/// Emits a `tracing` warn event when the `tracing` feature is enabled.
macro_rules! warn_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)*);
    };
}

pub mod alloc;
pub mod collections;
pub mod config;
pub mod descriptor;
pub mod error;

pub use collections::{
    BinaryHeap,
    ChainedHashMap,
    ChainedHashSet,
    Collection,
    DynArray,
    LinkedList,
    RbTreeMap,
    RbTreeSet,
    RingDeque,
    Text,
    TextDescriptor,
};
pub use descriptor::{Approx, Caseless, HashDescriptor, Natural, OrdDescriptor, Reverse, TypeDescriptor};
pub use error::{CollectionError, Result};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // Built-in descriptors are zero-sized markers.
    assert!(mem::size_of::<Natural<u64>>() == 0);
    assert!(mem::size_of::<Reverse<Natural<u64>>>() == 0);
    assert!(mem::size_of::<Caseless>() == 0);
    assert!(mem::size_of::<TextDescriptor>() == 0);

    // Arena links use the niche-free `Option<usize>`; keep them two words.
    assert!(mem::size_of::<Option<usize>>() <= 2 * mem::size_of::<usize>());

    // Errors are small enough to return by value everywhere.
    assert!(mem::size_of::<CollectionError>() <= 4 * mem::size_of::<usize>());
};
