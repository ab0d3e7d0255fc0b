//! Problem: algorithm-local state with an init/reset lifecycle
//!
//! A Problem owns the flat, vertex-indexed arrays an algorithm mutates from
//! its operator predicates. `init` sizes every array to the vertex count,
//! once per instance; `reset` refills starting values and may run before
//! each enactment, so parameters can change between runs without
//! reallocating.

use crate::engine::EngineError;
use crate::Result;

/// Lifecycle of algorithm-local per-vertex state.
pub trait Problem {
    /// Size and allocate every state array to the vertex count.
    ///
    /// Invoked once per instance, before the first `reset`.
    ///
    /// # Errors
    ///
    /// Returns an error if a state array cannot be allocated; the run is
    /// abandoned, not retried.
    fn init(&mut self) -> Result<()>;

    /// (Re)initialize every array to its algorithm-specific starting values.
    ///
    /// Invoked before each run; a second `reset` must leave no residue from
    /// the previous run.
    fn reset(&mut self);
}

/// Allocate a state array of `len` elements, surfacing allocation failure
/// instead of aborting.
///
/// # Errors
///
/// Returns [`EngineError::Allocation`] when the reservation fails.
pub fn alloc_array<T>(len: usize, fill: impl FnMut() -> T) -> Result<Vec<T>, EngineError> {
    let mut array = Vec::new();
    array
        .try_reserve_exact(len)
        .map_err(|_| EngineError::Allocation { len })?;
    array.resize_with(len, fill);
    Ok(array)
}
