//! Single-source betweenness centrality
//!
//! Brandes-style two-phase computation sharing one problem. The forward
//! phase labels vertices with shortest-path depth ("first writer wins" via
//! compare-and-swap against an unset sentinel) and accumulates path counts
//! (`sigma`) along shortest-path DAG edges. Once the forward frontier
//! drains, the enactor reseeds the frontier to the full vertex range and
//! walks the DAG backward by decreasing depth, accumulating dependency
//! (`delta`) and centrality (`bc_values`) contributions. On convergence all
//! centrality values are halved to undo undirected double counting.

use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Duration;

use rayon::prelude::*;
use tracing::debug;

use crate::engine::{
    advance, alloc_array, AtomicF32, Direction, Enactor, EngineError, Problem, Program, RunState,
    UniformChunking,
};
use crate::storage::{CsrGraph, EdgeId, NodeId};
use crate::Result;

/// Depth label of a vertex the forward phase has not reached.
const UNSET_LABEL: i32 = -1;

/// Per-vertex betweenness-centrality state.
#[derive(Debug)]
pub struct BcProblem<'g> {
    graph: &'g CsrGraph,
    source: NodeId,
    labels: Vec<AtomicI32>,
    sigmas: Vec<AtomicF32>,
    deltas: Vec<AtomicF32>,
    bc_values: Vec<AtomicF32>,
}

impl<'g> BcProblem<'g> {
    /// Create an uninitialized problem over `graph` rooted at `source`.
    #[must_use]
    pub fn new(graph: &'g CsrGraph, source: NodeId) -> Self {
        Self {
            graph,
            source,
            labels: Vec::new(),
            sigmas: Vec::new(),
            deltas: Vec::new(),
            bc_values: Vec::new(),
        }
    }

    /// Change the source vertex for the next run. Takes effect at `reset`.
    pub fn set_source(&mut self, source: NodeId) {
        self.source = source;
    }

    /// Copy path counts and centrality values into caller-owned buffers.
    pub fn write_results(&self, sigmas: &mut [f32], bc_values: &mut [f32]) {
        for (slot, sigma) in sigmas.iter_mut().zip(&self.sigmas) {
            *slot = sigma.load();
        }
        for (slot, bc) in bc_values.iter_mut().zip(&self.bc_values) {
            *slot = bc.load();
        }
    }
}

impl Problem for BcProblem<'_> {
    fn init(&mut self) -> Result<()> {
        let n = self.graph.num_nodes();
        self.labels = alloc_array(n, || AtomicI32::new(UNSET_LABEL))?;
        self.sigmas = alloc_array(n, || AtomicF32::new(0.0))?;
        self.deltas = alloc_array(n, || AtomicF32::new(0.0))?;
        self.bc_values = alloc_array(n, || AtomicF32::new(0.0))?;
        Ok(())
    }

    fn reset(&mut self) {
        for v in 0..self.graph.num_nodes() {
            self.labels[v].store(UNSET_LABEL, Ordering::Relaxed);
            self.sigmas[v].store(0.0);
            self.deltas[v].store(0.0);
            self.bc_values[v].store(0.0);
        }

        let s = self.source.0 as usize;
        self.labels[s].store(0, Ordering::Relaxed);
        self.sigmas[s].store(1.0);
    }
}

/// Enactor policy for betweenness centrality: forward labeling, then the
/// backward dependency walk.
#[derive(Debug)]
pub struct BcProgram<'g> {
    problem: BcProblem<'g>,
    forward: bool,
    depth: i32,
}

impl<'g> BcProgram<'g> {
    /// Wrap an initialized, reset problem, starting in the forward phase.
    #[must_use]
    pub fn new(problem: BcProblem<'g>) -> Self {
        Self {
            problem,
            forward: true,
            depth: 0,
        }
    }

    /// Consume the program, returning the problem and its results.
    #[must_use]
    pub fn into_problem(self) -> BcProblem<'g> {
        self.problem
    }
}

impl Program for BcProgram<'_> {
    fn prepare_frontier(&mut self, state: &mut RunState) {
        state.frontier_mut().clear();
        state.frontier_mut().push_back(self.problem.source);
    }

    fn step(&mut self, state: &mut RunState) {
        let problem = &self.problem;
        let graph = problem.graph;

        if self.forward {
            // First writer claims the label; sigma accumulates over every
            // shortest-path DAG edge, including ties discovered by racing
            // same-depth parents.
            let forward_op = |src: NodeId, dst: NodeId, _edge: EdgeId, _weight: f32| -> bool {
                let new_label = problem.labels[src.0 as usize].load(Ordering::Relaxed) + 1;
                let old_label = match problem.labels[dst.0 as usize].compare_exchange(
                    UNSET_LABEL,
                    new_label,
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(previous) | Err(previous) => previous,
                };

                if old_label != UNSET_LABEL && new_label != old_label {
                    return false;
                }

                problem.sigmas[dst.0 as usize]
                    .fetch_add(problem.sigmas[src.0 as usize].load());
                old_label == UNSET_LABEL
            };

            {
                let (input, output) = state.buffers();
                advance(
                    graph,
                    &UniformChunking,
                    Direction::Forward,
                    input,
                    output,
                    &forward_op,
                );
            }
            state.swap_buffers();
            self.depth += 1;
        } else {
            let depth = self.depth;
            let source = problem.source;

            // Walk DAG edges whose endpoints sit at (depth, depth + 1),
            // pushing dependency back to the shallower endpoint.
            let backward_op = |src: NodeId, dst: NodeId, _edge: EdgeId, _weight: f32| -> bool {
                if src == source {
                    return false;
                }

                let src_label = problem.labels[src.0 as usize].load(Ordering::Relaxed);
                if src_label != depth {
                    return false;
                }

                let dst_label = problem.labels[dst.0 as usize].load(Ordering::Relaxed);
                if dst_label != src_label + 1 {
                    return false;
                }

                let update = problem.sigmas[src.0 as usize].load()
                    / problem.sigmas[dst.0 as usize].load()
                    * (1.0 + problem.deltas[dst.0 as usize].load());
                problem.deltas[src.0 as usize].fetch_add(update);
                problem.bc_values[src.0 as usize].fetch_add(update);

                false
            };

            // No swap: the full-range frontier stays active for every
            // backward round.
            let (input, output) = state.buffers();
            advance(
                graph,
                &UniformChunking,
                Direction::Forward,
                input,
                output,
                &backward_op,
            );
            self.depth -= 1;
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn is_converged(&mut self, state: &mut RunState) -> bool {
        let problem = &self.problem;
        let n = problem.graph.num_nodes();

        if self.forward {
            if state.frontier().is_empty() {
                // Forward phase exhausted: switch to the backward walk from
                // one depth level below the last expansion.
                self.depth = state.iteration as i32 - 1;
                self.forward = false;
                state.frontier_mut().sequence(NodeId(0), n);
            }
            false
        } else {
            debug!(depth = self.depth, "backward pass");

            if self.depth == 0 {
                // Undirected graphs count every dependency twice.
                problem.bc_values.par_iter().for_each(|bc| {
                    bc.store(0.5 * bc.load());
                });
                state.frontier_mut().clear();
                return true;
            }
            false
        }
    }
}

/// Compute single-source betweenness centrality from `source`, writing path
/// counts into `sigmas` and centrality values into `bc_values`.
///
/// Returns the elapsed wall-clock time of the enactment.
///
/// # Errors
///
/// Returns an error if either output buffer does not match the vertex count,
/// if `source` is out of range, or if problem state cannot be allocated.
///
/// # Example
///
/// ```
/// use frontier_graph::{betweenness_centrality, CsrGraph, NodeId};
///
/// // Path 0 - 1 - 2: all shortest paths between the ends cross vertex 1
/// let graph = CsrGraph::from_edge_list_undirected(&[
///     (NodeId(0), NodeId(1), 1.0),
///     (NodeId(1), NodeId(2), 1.0),
/// ])
/// .unwrap();
///
/// let mut sigmas = vec![0.0; 3];
/// let mut bc_values = vec![0.0; 3];
/// betweenness_centrality(&graph, NodeId(0), &mut sigmas, &mut bc_values).unwrap();
///
/// assert_eq!(sigmas[0], 1.0);
/// assert_eq!(bc_values[0], 0.0);
/// ```
pub fn betweenness_centrality(
    graph: &CsrGraph,
    source: NodeId,
    sigmas: &mut [f32],
    bc_values: &mut [f32],
) -> Result<Duration> {
    let n = graph.num_nodes();
    for len in [sigmas.len(), bc_values.len()] {
        if len != n {
            return Err(EngineError::OutputLength {
                expected: n,
                got: len,
            }
            .into());
        }
    }
    if source.0 as usize >= n {
        return Err(EngineError::SourceOutOfRange(source.0).into());
    }

    let mut problem = BcProblem::new(graph, source);
    problem.init()?;
    problem.reset();

    let mut enactor = Enactor::new(BcProgram::new(problem));
    let elapsed = enactor.enact();

    enactor
        .into_program()
        .into_problem()
        .write_results(sigmas, bc_values);
    Ok(elapsed)
}
