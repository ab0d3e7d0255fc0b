//! frontier-graph: bulk-synchronous frontier-driven graph analytics
//!
//! # Overview
//!
//! frontier-graph expresses vertex-centric graph algorithms as iterative
//! rounds of frontier expansion (Advance) and contraction (Filter), executed
//! data-parallel across rayon lanes. Algorithm authors supply small per-edge
//! and per-vertex predicates; the engine supplies frontier management,
//! irregular-workload load balancing, atomic-safe parallel execution, and
//! convergence control.
//!
//! # Quick Start
//!
//! ```
//! use frontier_graph::{kcore, CsrGraph, NodeId};
//!
//! // Triangle with a pendant vertex
//! let graph = CsrGraph::from_edge_list_undirected(&[
//!     (NodeId(0), NodeId(1), 1.0),
//!     (NodeId(1), NodeId(2), 1.0),
//!     (NodeId(2), NodeId(0), 1.0),
//!     (NodeId(2), NodeId(3), 1.0),
//! ])?;
//!
//! let mut k_cores = vec![0; graph.num_nodes()];
//! kcore(&graph, &mut k_cores)?;
//!
//! assert_eq!(k_cores, vec![2, 2, 2, 1]); // triangle is the 2-core
//! # Ok::<(), frontier_graph::Error>(())
//! ```
//!
//! # Architecture
//!
//! - **Storage**: CSR (Compressed Sparse Row) adjacency, forward + reverse
//! - **Engine**: Frontier worklist, Advance/Filter operators, pluggable
//!   load balancing, Enactor iteration driver
//! - **Algorithms**: k-core decomposition, single-source betweenness
//!   centrality — two instantiations of the same operator engine
//!
//! Rounds are strictly sequential: every operator call fork-joins the lane
//! pool, so a round may assume all state mutations from the previous round
//! are visible before it begins. Within a round, predicates coordinate only
//! through atomic read-modify-write on flat Problem arrays.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithms;
pub mod engine;
pub mod storage;

// Re-export core types
pub use algorithms::{betweenness_centrality, kcore};
pub use engine::{
    advance, alloc_array, filter, AdvanceOutput, AtomicF32, Direction, Enactor, EngineError,
    Frontier, LoadBalance, Problem, Program, RunState, UniformChunking, VertexMapped, WorkChunk,
};
pub use storage::{CsrGraph, EdgeId, NodeId};

// Error type
pub use anyhow::{Error, Result};
