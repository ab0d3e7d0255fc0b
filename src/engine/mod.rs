//! Frontier-driven operator execution engine
//!
//! The core of the crate: a [`Frontier`] worklist, the edge-parallel
//! [`advance()`] operator with pluggable [`LoadBalance`] strategies, the
//! vertex-parallel [`filter()`] operator, and the [`Enactor`] driving a
//! [`Program`]'s rounds to convergence over [`Problem`] state.
//!
//! Execution model: each operator call dispatches one set of parallel lanes
//! (rayon workers) and joins before returning — that join is the full
//! barrier between rounds. Within a call, lane order is unspecified; the
//! only cross-lane coordination is atomic read-modify-write (add,
//! compare-and-swap, min) on flat Problem arrays.

pub mod advance;
pub mod atomic;
pub mod enactor;
pub mod filter;
pub mod frontier;
pub mod load_balance;
pub mod problem;

pub use advance::{advance, AdvanceOutput, Direction};
pub use atomic::AtomicF32;
pub use enactor::{Enactor, Program, RunState};
pub use filter::filter;
pub use frontier::Frontier;
pub use load_balance::{LoadBalance, UniformChunking, VertexMapped, WorkChunk};
pub use problem::{alloc_array, Problem};

use thiserror::Error;

/// Conditions the engine itself detects at its public seams.
///
/// Graph well-formedness (in-range ids, consistent enumeration) is the
/// storage collaborator's contract and is not re-validated mid-traversal.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Caller-owned output buffer does not match the vertex count
    #[error("output buffer length {got} does not match vertex count {expected}")]
    OutputLength {
        /// Vertex count of the graph under analysis
        expected: usize,
        /// Length of the buffer the caller supplied
        got: usize,
    },

    /// Source vertex parameter outside the graph's id range
    #[error("source vertex {0} out of range")]
    SourceOutOfRange(u32),

    /// Problem state array could not be allocated
    #[error("failed to allocate problem state array of length {len}")]
    Allocation {
        /// Requested array length (= vertex count)
        len: usize,
    },
}
