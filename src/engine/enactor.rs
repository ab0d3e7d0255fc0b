//! Enactor: the round-by-round iteration driver
//!
//! An algorithm supplies a [`Program`] — the {prepare, step, converged}
//! policy — and the enactor runs the bulk-synchronous loop around it. Each
//! round is one `step` call; the iteration counter increments once per round
//! and is visible to both `step` and `is_converged` for depth-dependent
//! logic. Static dispatch keeps the per-round indirection off the hot path.
//!
//! Operator dispatches inside `step` fork-join on the lane pool, so by the
//! time `step` returns, every state mutation of the round is globally
//! visible: that join is the full barrier separating rounds. The engine
//! imposes no maximum iteration count — termination is a property of the
//! program, observable externally only through the iteration counter.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::engine::frontier::Frontier;
use crate::storage::NodeId;

/// Per-run mutable state: the iteration counter and the double-buffered
/// frontier pair operators read from and write into.
#[derive(Debug)]
pub struct RunState {
    /// Rounds completed so far; increments once per round, starts at 0.
    pub iteration: usize,
    input: Frontier<NodeId>,
    output: Frontier<NodeId>,
}

impl RunState {
    fn new() -> Self {
        Self {
            iteration: 0,
            input: Frontier::new(),
            output: Frontier::new(),
        }
    }

    /// The active frontier (the next operator call's input).
    #[must_use]
    pub fn frontier(&self) -> &Frontier<NodeId> {
        &self.input
    }

    /// Mutable access to the active frontier, for seeding and re-seeding.
    pub fn frontier_mut(&mut self) -> &mut Frontier<NodeId> {
        &mut self.input
    }

    /// Split borrow of `(active input, scratch output)` for an operator call.
    pub fn buffers(&mut self) -> (&Frontier<NodeId>, &mut Frontier<NodeId>) {
        (&self.input, &mut self.output)
    }

    /// Make the last operator's output the next operator's input.
    ///
    /// A program that skips the swap keeps its input frontier live across
    /// rounds (the betweenness-centrality backward phase relies on this).
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.input, &mut self.output);
    }
}

/// Per-algorithm policy driven by the enactor.
///
/// Implementations hold their Problem state (and any phase flags) and express
/// each round through Advance/Filter calls over the supplied [`RunState`].
pub trait Program {
    /// Seed the initial active set (e.g. all vertices, or a single source).
    fn prepare_frontier(&mut self, state: &mut RunState);

    /// Execute one round. May iterate operators internally until an inner
    /// frontier drains.
    fn step(&mut self, state: &mut RunState);

    /// Decide whether the run stops. May re-seed the frontier for the next
    /// round and/or flip internal phase flags as side effects.
    fn is_converged(&mut self, state: &mut RunState) -> bool;
}

/// Generic iteration driver: `prepare`, then `step` until `is_converged`.
#[derive(Debug)]
pub struct Enactor<P: Program> {
    program: P,
    state: RunState,
}

impl<P: Program> Enactor<P> {
    /// Create an enactor around `program` with fresh run state.
    pub fn new(program: P) -> Self {
        Self {
            program,
            state: RunState::new(),
        }
    }

    /// Run to convergence, returning the elapsed wall-clock time.
    pub fn enact(&mut self) -> Duration {
        let start = Instant::now();

        self.program.prepare_frontier(&mut self.state);

        while !self.program.is_converged(&mut self.state) {
            debug!(
                iteration = self.state.iteration,
                frontier_len = self.state.input.len(),
                "engine round"
            );
            self.program.step(&mut self.state);
            self.state.iteration += 1;
        }

        start.elapsed()
    }

    /// Rounds completed by the last `enact` call.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.state.iteration
    }

    /// The run state (e.g. to observe the frontier after convergence).
    #[must_use]
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Consume the enactor, returning the program (and its results).
    pub fn into_program(self) -> P {
        self.program
    }
}
