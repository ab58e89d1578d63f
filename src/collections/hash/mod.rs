//! Hash-based collections with separate chaining.

pub mod hash_map;
pub mod hash_set;

pub use hash_map::ChainedHashMap;
pub use hash_set::ChainedHashSet;
