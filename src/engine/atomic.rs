//! Atomic primitives available to operator predicates
//!
//! The engine's only cross-lane coordination is atomic read-modify-write on
//! flat Problem arrays: add, compare-and-swap, and min. Integer arrays use
//! the std atomics directly; this module supplies the `f32` counterpart,
//! implemented as a compare-exchange loop over the value's bit pattern.
//!
//! All accesses use `Relaxed` ordering. Nothing in a round may depend on the
//! order of other lanes' updates; the happens-before edge between rounds is
//! the operator dispatch's fork-join barrier.

use std::sync::atomic::{AtomicU32, Ordering};

/// An `f32` that supports atomic load/store/add/min via its bit pattern.
#[derive(Debug, Default)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    /// Create a new atomic holding `value`.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    /// Read the current value.
    #[must_use]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Overwrite the current value.
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Atomically add `delta`, returning the previous value.
    pub fn fetch_add(&self, delta: f32) -> f32 {
        let mut current = self.0.load(Ordering::Relaxed);
        loop {
            let next = (f32::from_bits(current) + delta).to_bits();
            match self
                .0
                .compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return f32::from_bits(current),
                Err(observed) => current = observed,
            }
        }
    }

    /// Atomically lower the value to `min(current, candidate)`, returning the
    /// previous value.
    pub fn fetch_min(&self, candidate: f32) -> f32 {
        let mut current = self.0.load(Ordering::Relaxed);
        loop {
            let value = f32::from_bits(current);
            if value <= candidate {
                return value;
            }
            match self.0.compare_exchange_weak(
                current,
                candidate.to_bits(),
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return value,
                Err(observed) => current = observed,
            }
        }
    }
}
