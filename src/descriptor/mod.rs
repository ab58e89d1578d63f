//! Type descriptors: the capability bundle each container is built with.
//!
//! A descriptor says what a container may do with its elements, not what the
//! elements are. Every descriptor has a size; ordering and hashing are
//! optional capabilities layered on top:
//!
//! - [`TypeDescriptor`]: size (and, through Rust's `Drop`, the destructor).
//! - [`OrdDescriptor`]: three-way comparison, required by tree maps, tree sets
//!   and heaps.
//! - [`HashDescriptor`]: hashing plus comparison for collision tie-breaks,
//!   required by hash maps and hash sets.
//!
//! Descriptors are ordinary values owned by the container. Most are zero-sized
//! markers such as [`Natural`], but a descriptor can carry state (see
//! [`Approx`]'s epsilon).

pub mod hash;

use crate::error::{CollectionError, Result};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use num_traits::Float;

pub use hash::{bkdr, jenkins, JenkinsHasher};

/// Base capability: the element type and its size.
pub trait TypeDescriptor {
    /// The element type described.
    type Item;

    /// Size in bytes of one element. Containers reject a size of zero.
    #[inline]
    fn size(&self) -> usize {
        core::mem::size_of::<Self::Item>()
    }
}

/// Ordering capability.
pub trait OrdDescriptor: TypeDescriptor {
    /// Three-way comparison of two elements.
    fn compare(&self, a: &Self::Item, b: &Self::Item) -> Ordering;
}

/// Hashing capability.
///
/// Elements equal under [`OrdDescriptor::compare`] must hash equally.
pub trait HashDescriptor: OrdDescriptor {
    /// Hash of one element.
    fn hash(&self, item: &Self::Item) -> u64;
}

/// Rejects descriptors that cannot back a container.
pub(crate) fn validate<D: TypeDescriptor>(descriptor: &D) -> Result<()> {
    if descriptor.size() == 0 {
        return Err(CollectionError::zero_sized());
    }
    Ok(())
}

/// Descriptor using the element's own `Ord` and `Hash` implementations.
///
/// Hashing feeds the `Hash` output through [`JenkinsHasher`], so integers hash
/// over their native byte representation.
pub struct Natural<T>(PhantomData<fn() -> T>);

impl<T> Natural<T> {
    /// Creates the descriptor.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Natural<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Natural<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Natural<T> {}

impl<T> fmt::Debug for Natural<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Natural<{}>", core::any::type_name::<T>())
    }
}

impl<T> TypeDescriptor for Natural<T> {
    type Item = T;
}

impl<T: Ord> OrdDescriptor for Natural<T> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: Ord + Hash> HashDescriptor for Natural<T> {
    #[inline]
    fn hash(&self, item: &T) -> u64 {
        let mut hasher = JenkinsHasher::new();
        item.hash(&mut hasher);
        hasher.finish()
    }
}

/// Floating-point descriptor: values closer than `epsilon` compare equal.
///
/// There is deliberately no [`HashDescriptor`] impl: equality within an
/// epsilon is not transitive, so no hash can agree with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approx<F> {
    epsilon: F,
}

impl<F: Float> Approx<F> {
    /// Descriptor with a custom tolerance.
    pub fn with_epsilon(epsilon: F) -> Self {
        Self { epsilon: epsilon.abs() }
    }

    /// The tolerance below which two values are equal.
    pub fn epsilon(&self) -> F {
        self.epsilon
    }
}

impl Default for Approx<f32> {
    fn default() -> Self {
        Self { epsilon: 1e-6 }
    }
}

impl Default for Approx<f64> {
    fn default() -> Self {
        Self { epsilon: 1e-10 }
    }
}

impl<F> TypeDescriptor for Approx<F> {
    type Item = F;
}

impl<F: Float> OrdDescriptor for Approx<F> {
    #[inline]
    fn compare(&self, a: &F, b: &F) -> Ordering {
        if (*a - *b).abs() < self.epsilon {
            Ordering::Equal
        } else if *a < *b {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

/// Flips the ordering of another descriptor. Hashing is delegated unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse<D>(pub D);

impl<D: TypeDescriptor> TypeDescriptor for Reverse<D> {
    type Item = D::Item;

    fn size(&self) -> usize {
        self.0.size()
    }
}

impl<D: OrdDescriptor> OrdDescriptor for Reverse<D> {
    #[inline]
    fn compare(&self, a: &D::Item, b: &D::Item) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<D: HashDescriptor> HashDescriptor for Reverse<D> {
    #[inline]
    fn hash(&self, item: &D::Item) -> u64 {
        self.0.hash(item)
    }
}

/// ASCII case-insensitive descriptor for `String` keys.
///
/// Two keys differing only in case are the same key, so the key stored in a
/// map can differ observably from the one used to look it up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caseless;

impl TypeDescriptor for Caseless {
    type Item = String;
}

impl OrdDescriptor for Caseless {
    fn compare(&self, a: &String, b: &String) -> Ordering {
        let a = a.bytes().map(|b| b.to_ascii_lowercase());
        let b = b.bytes().map(|b| b.to_ascii_lowercase());
        a.cmp(b)
    }
}

impl HashDescriptor for Caseless {
    fn hash(&self, item: &String) -> u64 {
        let mut hasher = JenkinsHasher::new();
        for b in item.bytes() {
            hasher.write_u8(b.to_ascii_lowercase());
        }
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_orders_and_hashes() {
        let d = Natural::<i32>::new();
        assert_eq!(d.size(), 4);
        assert_eq!(d.compare(&1, &2), Ordering::Less);
        assert_eq!(d.compare(&2, &2), Ordering::Equal);
        assert_eq!(d.hash(&7), d.hash(&7));
        assert_eq!(d.hash(&7), u64::from(jenkins(&7i32.to_ne_bytes())));
    }

    #[test]
    fn natural_string_compares_lexically() {
        let d = Natural::<String>::new();
        assert_eq!(d.size(), core::mem::size_of::<String>());
        assert_eq!(d.compare(&"Apple".into(), &"Grape".into()), Ordering::Less);
    }

    #[test]
    fn zero_sized_is_rejected() {
        assert!(validate(&Natural::<()>::new()).is_err());
        assert!(validate(&Natural::<u8>::new()).is_ok());
    }

    #[test]
    fn approx_uses_epsilon() {
        let d = Approx::<f64>::default();
        assert_eq!(d.compare(&1.0, &(1.0 + 1e-12)), Ordering::Equal);
        assert_eq!(d.compare(&1.0, &1.1), Ordering::Less);
        assert_eq!(d.compare(&1.1, &1.0), Ordering::Greater);

        let coarse = Approx::with_epsilon(0.5f32);
        assert_eq!(coarse.epsilon(), 0.5);
        assert_eq!(coarse.compare(&1.0, &1.4), Ordering::Equal);
        assert_eq!(Approx::<f32>::default().compare(&1.0, &1.4), Ordering::Less);
    }

    #[test]
    fn reverse_flips_order_only() {
        let d = Reverse(Natural::<u64>::new());
        assert_eq!(d.compare(&1, &2), Ordering::Greater);
        assert_eq!(d.hash(&9), Natural::<u64>::new().hash(&9));
        assert_eq!(d.size(), 8);
    }

    #[test]
    fn caseless_agrees_with_its_hash() {
        let d = Caseless;
        let a = String::from("Apple");
        let b = String::from("aPPLE");
        assert_eq!(d.compare(&a, &b), Ordering::Equal);
        assert_eq!(d.hash(&a), d.hash(&b));
        assert_eq!(d.compare(&a, &"Banana".to_string()), Ordering::Less);
    }
}
