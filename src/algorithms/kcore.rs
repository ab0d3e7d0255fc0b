//! Vertex k-core decomposition
//!
//! Peels the graph with a monotonically increasing threshold `k`: a vertex
//! receives core number `k` at the smallest `k` for which its shrinking
//! remaining degree first drops to `k` or below. The final round count is
//! the graph's degeneracy.
//!
//! Each outer round runs an inner Advance/Filter loop until its frontier
//! drains: Advance marks vertices at or below the threshold for deletion and
//! fans out to their not-yet-deleted neighbors; a vertex-parallel transform
//! commits the marks; Filter decrements each notified neighbor's remaining
//! degree exactly once per removed edge and re-admits the neighbor only when
//! the decrement left the counter at exactly `k + 1`.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};
use std::time::Duration;

use rayon::prelude::*;
use tracing::debug;

use crate::engine::{
    advance, alloc_array, filter, Direction, Enactor, EngineError, Problem, Program, RunState,
    UniformChunking,
};
use crate::storage::{CsrGraph, EdgeId, NodeId};
use crate::Result;

/// Per-vertex k-core state: remaining degrees, deletion flags, core numbers.
#[derive(Debug)]
pub struct KcoreProblem<'g> {
    graph: &'g CsrGraph,
    degrees: Vec<AtomicI32>,
    deleted: Vec<AtomicBool>,
    to_be_deleted: Vec<AtomicBool>,
    k_cores: Vec<AtomicU32>,
}

impl<'g> KcoreProblem<'g> {
    /// Create an uninitialized problem over `graph`.
    #[must_use]
    pub fn new(graph: &'g CsrGraph) -> Self {
        Self {
            graph,
            degrees: Vec::new(),
            deleted: Vec::new(),
            to_be_deleted: Vec::new(),
            k_cores: Vec::new(),
        }
    }

    /// Copy the computed core numbers into a caller-owned buffer.
    ///
    /// Buffer length is validated by the public entry point.
    pub fn write_results(&self, out: &mut [u32]) {
        for (slot, core) in out.iter_mut().zip(&self.k_cores) {
            *slot = core.load(Ordering::Relaxed);
        }
    }

    /// True iff every vertex has been peeled out of the graph.
    fn graph_empty(&self) -> bool {
        self.deleted.iter().all(|d| d.load(Ordering::Relaxed))
    }
}

impl Problem for KcoreProblem<'_> {
    fn init(&mut self) -> Result<()> {
        let n = self.graph.num_nodes();
        self.degrees = alloc_array(n, || AtomicI32::new(0))?;
        self.deleted = alloc_array(n, || AtomicBool::new(false))?;
        self.to_be_deleted = alloc_array(n, || AtomicBool::new(false))?;
        self.k_cores = alloc_array(n, || AtomicU32::new(0))?;
        Ok(())
    }

    fn reset(&mut self) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        for (v, degree) in self.degrees.iter().enumerate() {
            let d = self.graph.out_degree(NodeId(v as u32)) as i32;
            degree.store(d, Ordering::Relaxed);
            // Isolated vertices belong to no core; they start out deleted
            // with core number 0.
            self.deleted[v].store(d == 0, Ordering::Relaxed);
            self.to_be_deleted[v].store(false, Ordering::Relaxed);
            self.k_cores[v].store(0, Ordering::Relaxed);
        }
    }
}

/// Enactor policy for k-core decomposition.
#[derive(Debug)]
pub struct KcoreProgram<'g> {
    problem: KcoreProblem<'g>,
}

impl<'g> KcoreProgram<'g> {
    /// Wrap an initialized, reset problem.
    #[must_use]
    pub fn new(problem: KcoreProblem<'g>) -> Self {
        Self { problem }
    }

    /// Consume the program, returning the problem and its results.
    #[must_use]
    pub fn into_problem(self) -> KcoreProblem<'g> {
        self.problem
    }
}

impl Program for KcoreProgram<'_> {
    fn prepare_frontier(&mut self, state: &mut RunState) {
        // All vertices participate in the first round.
        state
            .frontier_mut()
            .sequence(NodeId(0), self.problem.graph.num_nodes());
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    fn step(&mut self, state: &mut RunState) {
        let k = state.iteration as i32 + 1;
        let problem = &self.problem;
        let graph = problem.graph;

        // Mark vertices with remaining degree <= k for deletion and fan out
        // to their surviving neighbors.
        let advance_op = |src: NodeId, dst: NodeId, _edge: EdgeId, _weight: f32| -> bool {
            let s = src.0 as usize;

            if problem.deleted[s].load(Ordering::Relaxed) {
                return false;
            }
            if problem.degrees[s].load(Ordering::Relaxed) > k {
                return false;
            }

            problem.k_cores[s].store(k as u32, Ordering::Relaxed);
            problem.to_be_deleted[s].store(true, Ordering::Relaxed);
            !problem.deleted[dst.0 as usize].load(Ordering::Relaxed)
        };

        // One decrement per removed edge; re-admit the vertex only when the
        // counter was left at exactly k + 1.
        let filter_op = |vertex: NodeId| -> bool {
            let v = vertex.0 as usize;

            if problem.deleted[v].load(Ordering::Relaxed) {
                return false;
            }

            let old_degree = problem.degrees[v].fetch_sub(1, Ordering::Relaxed);
            old_degree == k + 1
        };

        while !state.frontier().is_empty() {
            {
                let (input, output) = state.buffers();
                advance(
                    graph,
                    &UniformChunking,
                    Direction::Forward,
                    input,
                    output,
                    &advance_op,
                );
            }
            state.swap_buffers();

            // Commit this wave's marks before the degree decrements.
            problem
                .deleted
                .par_iter()
                .zip(problem.to_be_deleted.par_iter())
                .for_each(|(deleted, pending)| {
                    if pending.load(Ordering::Relaxed) {
                        deleted.store(true, Ordering::Relaxed);
                    }
                });

            {
                let (input, output) = state.buffers();
                filter(input, output, &filter_op);
            }
            state.swap_buffers();
        }
    }

    fn is_converged(&mut self, state: &mut RunState) -> bool {
        if self.problem.graph_empty() {
            debug!(degeneracy = state.iteration, "k-core decomposition converged");
            return true;
        }

        // Survivors are re-tested against the next threshold from scratch.
        state
            .frontier_mut()
            .sequence(NodeId(0), self.problem.graph.num_nodes());
        false
    }
}

/// Compute the k-core decomposition, writing each vertex's core number into
/// `k_cores`.
///
/// Returns the elapsed wall-clock time of the enactment.
///
/// # Errors
///
/// Returns an error if `k_cores` does not match the vertex count or if
/// problem state cannot be allocated.
///
/// # Example
///
/// ```
/// use frontier_graph::{kcore, CsrGraph, NodeId};
///
/// // Triangle: every vertex sits in the 2-core
/// let graph = CsrGraph::from_edge_list_undirected(&[
///     (NodeId(0), NodeId(1), 1.0),
///     (NodeId(1), NodeId(2), 1.0),
///     (NodeId(2), NodeId(0), 1.0),
/// ])
/// .unwrap();
///
/// let mut k_cores = vec![0; graph.num_nodes()];
/// kcore(&graph, &mut k_cores).unwrap();
/// assert_eq!(k_cores, vec![2, 2, 2]);
/// ```
pub fn kcore(graph: &CsrGraph, k_cores: &mut [u32]) -> Result<Duration> {
    if k_cores.len() != graph.num_nodes() {
        return Err(EngineError::OutputLength {
            expected: graph.num_nodes(),
            got: k_cores.len(),
        }
        .into());
    }

    let mut problem = KcoreProblem::new(graph);
    problem.init()?;
    problem.reset();

    let mut enactor = Enactor::new(KcoreProgram::new(problem));
    let elapsed = enactor.enact();

    enactor.into_program().into_problem().write_results(k_cores);
    Ok(elapsed)
}
