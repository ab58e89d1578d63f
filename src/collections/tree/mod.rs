//! Ordered collections over a red-black tree.

pub mod tree_map;
pub mod tree_set;

pub use tree_map::RbTreeMap;
pub use tree_set::RbTreeSet;
