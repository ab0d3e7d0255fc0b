//! Worked algorithm instantiations on the operator engine
//!
//! Each algorithm is a `Problem` (flat per-vertex state with an init/reset
//! lifecycle) plus a `Program` (the prepare/step/converged policy the
//! enactor drives), with a one-call entry point that wires them together.

pub mod bc;
pub mod kcore;

pub use bc::{betweenness_centrality, BcProblem, BcProgram};
pub use kcore::{kcore, KcoreProblem, KcoreProgram};
