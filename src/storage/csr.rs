//! CSR (Compressed Sparse Row) graph representation
//!
//! The engine's read-only Graph collaborator. Both a forward CSR (out-edges)
//! and a reverse CSR (in-edges) are materialized so the Advance operator can
//! traverse in either direction with the same flat-slice access pattern.
//!
//! # CSR Format
//!
//! ```text
//! Graph: 0 → 1, 0 → 2, 1 → 2
//!
//! CSR:
//!   row_offsets: [0, 2, 3, 3]  // Node 0: edges [0..2), Node 1: [2..3), Node 2: [3..3)
//!   col_indices: [1, 2, 2]      // Edge 0 → node 1, edge 1 → node 2, edge 2 → node 2
//!   edge_weights: [1.0, 1.0, 1.0]
//! ```

use anyhow::{anyhow, Result};

/// Node identifier (zero-indexed, dense range `[0, n)`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Edge identifier: an index into the edge slots of the CSR representation
/// being traversed (forward or reverse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

/// CSR (Compressed Sparse Row) graph
///
/// Immutable for the duration of an engine run. Optimized for:
/// - O(1) access to outgoing edges (via forward CSR)
/// - O(1) access to incoming edges (via reverse CSR)
/// - Flat, lane-friendly memory layout
///
/// # Example
///
/// ```
/// use frontier_graph::{CsrGraph, NodeId};
///
/// let mut graph = CsrGraph::new();
/// graph.add_edge(NodeId(0), NodeId(1), 1.0).unwrap();
/// graph.add_edge(NodeId(0), NodeId(2), 1.0).unwrap();
///
/// assert_eq!(graph.out_degree(NodeId(0)), 2);
/// assert_eq!(graph.outgoing_neighbors(NodeId(0)).unwrap(), &[1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Forward CSR: Row offsets for outgoing edges
    /// node i's edges start at `row_offsets`[i]
    /// Length: `num_nodes` + 1
    row_offsets: Vec<u32>,

    /// Forward CSR: Column indices (edge targets)
    /// Length: `num_edges`
    col_indices: Vec<u32>,

    /// Forward CSR: Edge weights
    /// Length: `num_edges`
    edge_weights: Vec<f32>,

    /// Reverse CSR: Row offsets for incoming edges
    /// Length: `num_nodes` + 1
    rev_row_offsets: Vec<u32>,

    /// Reverse CSR: Column indices (edge sources)
    /// Length: `num_edges`
    rev_col_indices: Vec<u32>,

    /// Reverse CSR: Edge weights (same as forward, but reordered)
    /// Length: `num_edges`
    rev_edge_weights: Vec<f32>,

    /// Number of nodes
    num_nodes: usize,
}

impl CsrGraph {
    /// Create new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            row_offsets: vec![0], // Start with single offset
            col_indices: Vec::new(),
            edge_weights: Vec::new(),
            rev_row_offsets: vec![0],
            rev_col_indices: Vec::new(),
            rev_edge_weights: Vec::new(),
            num_nodes: 0,
        }
    }

    /// Create graph from edge list
    ///
    /// # Arguments
    ///
    /// * `edges` - List of (source, target, weight) tuples
    ///
    /// # Errors
    ///
    /// Returns error if the edge list is non-empty but yields no maximum
    /// node id (cannot happen in practice; kept for parity with the
    /// construction contract).
    pub fn from_edge_list(edges: &[(NodeId, NodeId, f32)]) -> Result<Self> {
        if edges.is_empty() {
            return Ok(Self::new());
        }

        // Find max node ID to determine graph size
        let max_node = edges
            .iter()
            .flat_map(|(src, dst, _)| [src.0, dst.0])
            .max()
            .ok_or_else(|| anyhow!("Empty edge list"))?;

        let num_nodes = (max_node + 1) as usize;

        // Build adjacency lists (temporary) for both forward and reverse
        let mut adj_list: Vec<Vec<(u32, f32)>> = vec![Vec::new(); num_nodes];
        let mut rev_adj_list: Vec<Vec<(u32, f32)>> = vec![Vec::new(); num_nodes];

        for (src, dst, weight) in edges {
            adj_list[src.0 as usize].push((dst.0, *weight));
            rev_adj_list[dst.0 as usize].push((src.0, *weight)); // Reverse: dst ← src
        }

        let (row_offsets, col_indices, edge_weights) = Self::pack_csr(&adj_list);
        let (rev_row_offsets, rev_col_indices, rev_edge_weights) = Self::pack_csr(&rev_adj_list);

        Ok(Self {
            row_offsets,
            col_indices,
            edge_weights,
            rev_row_offsets,
            rev_col_indices,
            rev_edge_weights,
            num_nodes,
        })
    }

    /// Create an undirected graph from an edge list
    ///
    /// Each `(u, v, w)` pair is inserted as both `u → v` and `v → u`, the
    /// usual presentation for k-core and betweenness-centrality inputs.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CsrGraph::from_edge_list`].
    pub fn from_edge_list_undirected(edges: &[(NodeId, NodeId, f32)]) -> Result<Self> {
        let mut symmetric = Vec::with_capacity(edges.len() * 2);
        for &(src, dst, weight) in edges {
            symmetric.push((src, dst, weight));
            symmetric.push((dst, src, weight));
        }
        Self::from_edge_list(&symmetric)
    }

    /// Pack temporary adjacency lists into (offsets, indices, weights)
    fn pack_csr(adj_list: &[Vec<(u32, f32)>]) -> (Vec<u32>, Vec<u32>, Vec<f32>) {
        let mut offsets = Vec::with_capacity(adj_list.len() + 1);
        let mut indices = Vec::new();
        let mut weights = Vec::new();

        let mut offset = 0_u32;
        offsets.push(offset);

        for neighbors in adj_list {
            #[allow(clippy::cast_possible_truncation)] // Graphs >4B edges not supported
            let len_u32 = neighbors.len() as u32;
            offset += len_u32;
            offsets.push(offset);

            for (target, weight) in neighbors {
                indices.push(*target);
                weights.push(*weight);
            }
        }

        (offsets, indices, weights)
    }

    /// Add edge to graph (dynamic insertion)
    ///
    /// Note: For large graphs, use `from_edge_list` for better performance.
    ///
    /// # Errors
    ///
    /// Does not currently fail; the `Result` mirrors the batch constructor's
    /// contract.
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId, weight: f32) -> Result<()> {
        // Expand graph if needed
        let max_node = src.0.max(dst.0) as usize;
        if max_node >= self.num_nodes {
            self.expand_to(max_node + 1);
        }

        // Insert forward edge (src → dst)
        let src_idx = src.0 as usize;
        let end = self.row_offsets[src_idx + 1] as usize;

        self.col_indices.insert(end, dst.0);
        self.edge_weights.insert(end, weight);

        for offset in &mut self.row_offsets[src_idx + 1..] {
            *offset += 1;
        }

        // Insert reverse edge (dst ← src)
        let dst_idx = dst.0 as usize;
        let rev_end = self.rev_row_offsets[dst_idx + 1] as usize;

        self.rev_col_indices.insert(rev_end, src.0);
        self.rev_edge_weights.insert(rev_end, weight);

        for offset in &mut self.rev_row_offsets[dst_idx + 1..] {
            *offset += 1;
        }

        Ok(())
    }

    /// Get outgoing neighbors of a node
    ///
    /// # Errors
    ///
    /// Returns error if node ID is out of bounds
    pub fn outgoing_neighbors(&self, node: NodeId) -> Result<&[u32]> {
        if (node.0 as usize) >= self.num_nodes {
            return Err(anyhow!("Node ID {} out of bounds", node.0));
        }

        let idx = node.0 as usize;
        let start = self.row_offsets[idx] as usize;
        let end = self.row_offsets[idx + 1] as usize;

        Ok(&self.col_indices[start..end])
    }

    /// Get incoming neighbors of a node via the reverse CSR.
    ///
    /// # Errors
    ///
    /// Returns error if node ID is out of bounds
    pub fn incoming_neighbors(&self, target: NodeId) -> Result<&[u32]> {
        if (target.0 as usize) >= self.num_nodes {
            return Err(anyhow!("Node ID {} out of bounds", target.0));
        }

        let idx = target.0 as usize;
        let start = self.rev_row_offsets[idx] as usize;
        let end = self.rev_row_offsets[idx + 1] as usize;

        Ok(&self.rev_col_indices[start..end])
    }

    /// Number of outgoing edges of `node` (0 for out-of-range ids).
    #[must_use]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let idx = node.0 as usize;
        if idx >= self.num_nodes {
            return 0;
        }
        (self.row_offsets[idx + 1] - self.row_offsets[idx]) as usize
    }

    /// Number of incoming edges of `node` (0 for out-of-range ids).
    #[must_use]
    pub fn in_degree(&self, node: NodeId) -> usize {
        let idx = node.0 as usize;
        if idx >= self.num_nodes {
            return 0;
        }
        (self.rev_row_offsets[idx + 1] - self.rev_row_offsets[idx]) as usize
    }

    /// Get number of nodes
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Get number of edges
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.col_indices.len()
    }

    /// Forward CSR components `(row_offsets, col_indices, edge_weights)`
    #[must_use]
    pub fn csr_components(&self) -> (&[u32], &[u32], &[f32]) {
        (&self.row_offsets, &self.col_indices, &self.edge_weights)
    }

    /// Reverse CSR components `(rev_row_offsets, rev_col_indices, rev_edge_weights)`
    #[must_use]
    pub fn rev_csr_components(&self) -> (&[u32], &[u32], &[f32]) {
        (
            &self.rev_row_offsets,
            &self.rev_col_indices,
            &self.rev_edge_weights,
        )
    }

    /// Expand graph to accommodate new nodes
    fn expand_to(&mut self, new_size: usize) {
        if new_size <= self.num_nodes {
            return;
        }

        // Add row offsets for new nodes (all point to same offset = no edges)
        let last_offset = *self.row_offsets.last().unwrap_or(&0);
        for _ in self.num_nodes..new_size {
            self.row_offsets.push(last_offset);
        }

        let rev_last_offset = *self.rev_row_offsets.last().unwrap_or(&0);
        for _ in self.num_nodes..new_size {
            self.rev_row_offsets.push(rev_last_offset);
        }

        self.num_nodes = new_size;
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::new()
    }
}
