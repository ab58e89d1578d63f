//! `GrowableBuffer` - the allocation unit shared by the array-like containers.
//!
//! The buffer owns `capacity` slots of `MaybeUninit<T>` and a length. It never
//! decides which slots are live: a plain array keeps elements in `0..len`,
//! while the ring deque keeps them in a wrapped window. Owners are therefore
//! responsible for dropping live elements before the buffer goes away.

use crate::config;
use crate::error::{CollectionError, Result};
use core::mem::MaybeUninit;
use core::ptr;

/// Contiguous backing storage with a doubling growth policy.
pub struct GrowableBuffer<T> {
    /// Always fully "initialized" as `MaybeUninit`, so `slots.len()` is the capacity.
    slots: Vec<MaybeUninit<T>>,
    len: usize,
}

impl<T> GrowableBuffer<T> {
    /// Creates an empty buffer without allocating.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
        }
    }

    /// Number of slots the owner considers live.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot is live.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Sets the live count.
    ///
    /// # Safety
    /// `len <= capacity()`, and the owner's layout must hold exactly `len`
    /// initialized elements afterwards.
    #[inline(always)]
    pub unsafe fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity());
        self.len = len;
    }

    /// Ensures room for `additional` more elements beyond `len`.
    ///
    /// Grows to 8 slots from empty, otherwise doubles until the request fits.
    /// Existing slots keep their physical positions. On failure nothing changes.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let min_cap = self
            .len
            .checked_add(additional)
            .ok_or(CollectionError::out_of_memory(additional))?;
        let old_cap = self.capacity();
        if old_cap >= min_cap {
            return Ok(());
        }

        let new_cap = config::grown_capacity(old_cap, min_cap)
            .ok_or(CollectionError::out_of_memory(min_cap))?;
        self.slots
            .try_reserve_exact(new_cap - old_cap)
            .map_err(|_| CollectionError::out_of_memory(new_cap))?;
        self.slots.resize_with(new_cap, MaybeUninit::uninit);

        debug_event!(old_cap, new_cap, "buffer grew");
        Ok(())
    }

    /// Raw pointer to slot 0.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.slots.as_ptr().cast()
    }

    /// Mutable raw pointer to slot 0.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.slots.as_mut_ptr().cast()
    }

    /// Moves the element out of `slot`.
    ///
    /// # Safety
    /// `slot < capacity()` and holds an initialized element, which must be
    /// treated as uninitialized afterwards.
    #[inline(always)]
    pub unsafe fn read(&self, slot: usize) -> T {
        ptr::read(self.as_ptr().add(slot))
    }

    /// Writes `value` into `slot` without dropping what was there.
    ///
    /// # Safety
    /// `slot < capacity()`.
    #[inline(always)]
    pub unsafe fn write(&mut self, slot: usize, value: T) {
        ptr::write(self.as_mut_ptr().add(slot), value);
    }

    /// # Safety
    /// `slot < capacity()` and holds an initialized element.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, slot: usize) -> &T {
        &*self.as_ptr().add(slot)
    }

    /// # Safety
    /// `slot < capacity()` and holds an initialized element.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, slot: usize) -> &mut T {
        &mut *self.as_mut_ptr().add(slot)
    }

    /// Bitwise move of `count` slots from `from` to `to`; the ranges may overlap.
    ///
    /// # Safety
    /// Both ranges lie within `capacity()`. Slots left behind by the move are
    /// logically uninitialized.
    #[inline]
    pub unsafe fn copy(&mut self, from: usize, to: usize, count: usize) {
        let base = self.as_mut_ptr();
        ptr::copy(base.add(from), base.add(to), count);
    }
}

impl<T> Default for GrowableBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}
