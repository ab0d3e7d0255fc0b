//! Advance: edge-parallel frontier expansion
//!
//! Based on the Gunrock advance operator (Wang et al., ACM `ToPC` 2017):
//! every qualifying edge incident to the input frontier is visited by some
//! lane, in unspecified order, and the user predicate decides what the
//! output frontier receives.
//!
//! Work distribution goes through a [`LoadBalance`] strategy over the
//! frontier's combined edge list (see `load_balance`), so lane occupancy does
//! not depend on the degree distribution of the frontier.

use rayon::prelude::*;

use crate::engine::frontier::Frontier;
use crate::engine::load_balance::LoadBalance;
use crate::storage::{CsrGraph, EdgeId, NodeId};

/// Traversal direction for Advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Traverse out-edges (forward CSR)
    Forward,
    /// Traverse in-edges (reverse CSR)
    Reverse,
}

/// Element kind an Advance emits into its output frontier.
///
/// Selected statically by the output frontier's element type:
/// `Frontier<NodeId>` receives destinations (vertex-to-vertex),
/// `Frontier<EdgeId>` receives edge slots (vertex-to-edge).
pub trait AdvanceOutput: Copy + Send {
    /// Build the output element for a qualifying edge.
    fn emit(destination: NodeId, edge: EdgeId) -> Self;
}

impl AdvanceOutput for NodeId {
    fn emit(destination: NodeId, _edge: EdgeId) -> Self {
        destination
    }
}

impl AdvanceOutput for EdgeId {
    fn emit(_destination: NodeId, edge: EdgeId) -> Self {
        edge
    }
}

/// Visit every edge incident to the input frontier, in parallel.
///
/// For each edge the predicate receives `(source, destination, edge, weight)`
/// and returns whether the edge's output element joins the output frontier.
/// The output frontier's previous contents are discarded; its resulting order
/// is unspecified.
///
/// Guarantees: every edge of every frontier element is visited at least once
/// per call (elements appearing twice are expanded twice). Visitation order
/// among lanes is unspecified — predicate side effects must be idempotent or
/// commutative atomic updates.
#[allow(clippy::cast_possible_truncation)] // edge slots fit u32 by storage contract
pub fn advance<T, B, F>(
    graph: &CsrGraph,
    balancer: &B,
    direction: Direction,
    input: &Frontier<NodeId>,
    output: &mut Frontier<T>,
    op: F,
) where
    T: AdvanceOutput,
    B: LoadBalance + ?Sized,
    F: Fn(NodeId, NodeId, EdgeId, f32) -> bool + Sync,
{
    output.clear();

    let (offsets, indices, weights) = match direction {
        Direction::Forward => graph.csr_components(),
        Direction::Reverse => graph.rev_csr_components(),
    };

    // Exclusive prefix sum of frontier-element degrees: rank space for the
    // load balancer.
    let sources = input.as_slice();
    let mut prefix = Vec::with_capacity(sources.len() + 1);
    prefix.push(0_usize);
    for &src in sources {
        let idx = src.0 as usize;
        let degree = (offsets[idx + 1] - offsets[idx]) as usize;
        prefix.push(prefix[prefix.len() - 1] + degree);
    }

    let total = prefix.last().copied().unwrap_or(0);
    if total == 0 {
        return;
    }

    let chunks = balancer.partition(&prefix, rayon::current_num_threads());

    let gathered: Vec<Vec<T>> = chunks
        .par_iter()
        .map(|chunk| {
            let mut lane_output = Vec::new();

            // Locate the frontier element owning the span's first rank, then
            // sweep; ranks within a span are consecutive.
            let mut element = prefix.partition_point(|&p| p <= chunk.start) - 1;
            for rank in chunk.start..chunk.end {
                while prefix[element + 1] <= rank {
                    element += 1;
                }

                let src = sources[element];
                let slot = offsets[src.0 as usize] as usize + (rank - prefix[element]);
                let dst = NodeId(indices[slot]);
                let edge = EdgeId(slot as u32);

                if op(src, dst, edge, weights[slot]) {
                    lane_output.push(T::emit(dst, edge));
                }
            }

            lane_output
        })
        .collect();

    for lane_output in gathered {
        output.extend(lane_output);
    }
}
