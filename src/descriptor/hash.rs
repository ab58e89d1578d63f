//! Byte-oriented hash functions used by the built-in descriptors.

use core::hash::Hasher;

/// Bob Jenkins' one-at-a-time hash over a byte slice.
#[inline]
pub fn jenkins(bytes: &[u8]) -> u32 {
    let mut hasher = JenkinsHasher::new();
    hasher.write(bytes);
    hasher.finish32()
}

/// BKDR string hash (seed 131), the classic choice for text keys.
#[inline]
pub fn bkdr(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |hash, &b| hash.wrapping_mul(131).wrapping_add(u32::from(b)))
}

/// Streaming form of [`jenkins`], so any `Hash` type can be fed through it.
///
/// Writing the bytes of a value in several calls produces the same result as
/// hashing their concatenation in one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JenkinsHasher {
    state: u32,
}

impl JenkinsHasher {
    /// Creates a hasher with an empty state.
    pub const fn new() -> Self {
        Self { state: 0 }
    }

    /// Final avalanche, truncated to the native 32-bit width of the algorithm.
    #[inline]
    pub fn finish32(&self) -> u32 {
        let mut hash = self.state;
        hash = hash.wrapping_add(hash << 3);
        hash ^= hash >> 11;
        hash = hash.wrapping_add(hash << 15);
        hash
    }
}

impl Hasher for JenkinsHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        let mut hash = self.state;
        for &b in bytes {
            hash = hash.wrapping_add(u32::from(b));
            hash = hash.wrapping_add(hash << 10);
            hash ^= hash >> 6;
        }
        self.state = hash;
    }

    #[inline]
    fn finish(&self) -> u64 {
        u64::from(self.finish32())
    }
}
