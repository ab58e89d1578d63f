//! Error type shared by every container.
//!
//! Mutators report failures through [`CollectionError`]; read accessors signal
//! absence with `None` instead. A failed call never leaves a partial mutation
//! behind: allocation happens before any structural change is made.

use thiserror::Error;

/// The error type for fallible container operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// A required argument was unusable, e.g. a zero-sized element type.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: &'static str,
    },

    /// The allocator refused to provide backing storage.
    #[error("memory allocation failed: requested {requested} slots")]
    OutOfMemory {
        /// Number of element slots that were requested.
        requested: usize,
    },

    /// An index lies beyond the current length.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// The length at the time of the call.
        len: usize,
    },
}

impl CollectionError {
    /// Zero-sized element or key types cannot be stored.
    pub(crate) const fn zero_sized() -> Self {
        Self::InvalidArgument {
            reason: "element size must be non-zero",
        }
    }

    pub(crate) const fn out_of_memory(requested: usize) -> Self {
        Self::OutOfMemory { requested }
    }

    pub(crate) const fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, CollectionError>;
