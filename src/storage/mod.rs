//! Graph storage (CSR format)
//!
//! The immutable adjacency source consumed by the operator engine.

pub mod csr;

pub use csr::{CsrGraph, EdgeId, NodeId};
