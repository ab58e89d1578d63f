//! Tuning constants shared by the containers.

/// Smallest non-zero capacity handed out by a [`GrowableBuffer`](crate::alloc::GrowableBuffer).
pub const MIN_CAPACITY: usize = 8;

/// Bucket count of a freshly constructed hash map. Always a power of two.
pub const INITIAL_BUCKETS: usize = 8;

/// Load factor numerator: a hash map grows once `len >= buckets * NUM / DEN`.
pub const LOAD_FACTOR_NUM: usize = 3;

/// Load factor denominator.
pub const LOAD_FACTOR_DEN: usize = 4;

/// Number of entries at which a table with `buckets` chains must double.
///
/// Divides first so the largest power-of-two bucket count cannot overflow;
/// exact for every power of two from `LOAD_FACTOR_DEN` up.
#[inline]
pub const fn grow_threshold(buckets: usize) -> usize {
    buckets / LOAD_FACTOR_DEN * LOAD_FACTOR_NUM
}

/// Next capacity under the doubling policy: start at [`MIN_CAPACITY`], double
/// until `min_cap` fits. Returns `None` on arithmetic overflow.
#[inline]
pub fn grown_capacity(current: usize, min_cap: usize) -> Option<usize> {
    let mut cap = if current == 0 { MIN_CAPACITY } else { current.checked_mul(2)? };
    while cap < min_cap {
        cap = cap.checked_mul(2)?;
    }
    Some(cap)
}

const _: () = {
    assert!(INITIAL_BUCKETS.is_power_of_two());
    assert!(MIN_CAPACITY > 0);
    assert!(LOAD_FACTOR_NUM < LOAD_FACTOR_DEN);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_policy() {
        assert_eq!(grown_capacity(0, 1), Some(8));
        assert_eq!(grown_capacity(0, 9), Some(16));
        assert_eq!(grown_capacity(8, 9), Some(16));
        assert_eq!(grown_capacity(8, 100), Some(128));
        assert_eq!(grown_capacity(usize::MAX / 2 + 1, usize::MAX), None);
    }

    #[test]
    fn threshold_is_three_quarters() {
        assert_eq!(grow_threshold(8), 6);
        assert_eq!(grow_threshold(16), 12);
        assert_eq!(grow_threshold(1024), 768);
        assert_eq!(grow_threshold(1 << (usize::BITS - 1)), 3 << (usize::BITS - 3));
    }
}
