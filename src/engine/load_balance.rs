//! Load-balancing strategies for edge-parallel work
//!
//! Out-degree varies by orders of magnitude across real graphs, so mapping
//! one lane per frontier vertex leaves most lanes idle behind a few hubs.
//! The Advance operator instead works over *edge ranks*: the frontier's
//! per-vertex degrees are prefix-summed into one combined edge list, and a
//! strategy partitions `[0, total_edges)` into spans regardless of which
//! source vertex an edge belongs to.
//!
//! Strategies receive the exclusive prefix array (length = frontier size + 1,
//! last element = total edge count) and the lane count, and return disjoint
//! spans covering the full rank range.

/// A contiguous span of edge ranks assigned to one lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkChunk {
    /// First edge rank in the span (inclusive)
    pub start: usize,
    /// One past the last edge rank (exclusive)
    pub end: usize,
}

impl WorkChunk {
    /// Number of edge ranks in the span.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// True iff the span covers no ranks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Partitioning strategy over the combined edge list of a frontier.
pub trait LoadBalance: Sync {
    /// Split `[0, prefix.last())` into disjoint covering spans.
    ///
    /// `prefix` is the exclusive prefix sum of per-frontier-element degrees;
    /// `lanes` is the number of parallel execution lanes available.
    fn partition(&self, prefix: &[usize], lanes: usize) -> Vec<WorkChunk>;
}

/// Near-equal spans of the combined edge list, ignoring vertex boundaries.
///
/// The general-purpose default: lane occupancy stays balanced regardless of
/// the frontier's degree distribution.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformChunking;

impl LoadBalance for UniformChunking {
    fn partition(&self, prefix: &[usize], lanes: usize) -> Vec<WorkChunk> {
        let total = prefix.last().copied().unwrap_or(0);
        if total == 0 {
            return Vec::new();
        }

        let lanes = lanes.clamp(1, total);
        let span = total.div_ceil(lanes);

        (0..lanes)
            .map(|lane| WorkChunk {
                start: lane * span,
                end: ((lane + 1) * span).min(total),
            })
            .filter(|chunk| !chunk.is_empty())
            .collect()
    }
}

/// One span per frontier vertex: the naive mapping.
///
/// Kept as the skew-prone baseline; a single hub vertex serializes its whole
/// neighborhood onto one lane.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexMapped;

impl LoadBalance for VertexMapped {
    fn partition(&self, prefix: &[usize], _lanes: usize) -> Vec<WorkChunk> {
        prefix
            .windows(2)
            .map(|w| WorkChunk {
                start: w[0],
                end: w[1],
            })
            .filter(|chunk| !chunk.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covering(chunks: &[WorkChunk], total: usize) {
        // Disjoint, ordered, and covering [0, total)
        let mut expected_start = 0;
        for chunk in chunks {
            assert_eq!(chunk.start, expected_start);
            assert!(chunk.end > chunk.start);
            expected_start = chunk.end;
        }
        assert_eq!(expected_start, total);
    }

    #[test]
    fn test_uniform_even_split() {
        // 4 vertices of degree 25 each, 4 lanes
        let prefix = [0, 25, 50, 75, 100];
        let chunks = UniformChunking.partition(&prefix, 4);

        assert_covering(&chunks, 100);
        assert_eq!(chunks.len(), 4);
        for chunk in &chunks {
            assert_eq!(chunk.len(), 25);
        }
    }

    #[test]
    fn test_uniform_ignores_skew() {
        // One hub of degree 97 among tiny vertices still splits evenly
        let prefix = [0, 1, 98, 99, 100];
        let chunks = UniformChunking.partition(&prefix, 4);

        assert_covering(&chunks, 100);
        let max = chunks.iter().map(WorkChunk::len).max().unwrap();
        let min = chunks.iter().map(WorkChunk::len).min().unwrap();
        assert!(max - min <= 1, "spans should be near-equal: {chunks:?}");
    }

    #[test]
    fn test_uniform_more_lanes_than_work() {
        let prefix = [0, 2, 3];
        let chunks = UniformChunking.partition(&prefix, 16);

        assert_covering(&chunks, 3);
        // No empty spans handed to lanes
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_uniform_empty_frontier() {
        let prefix = [0];
        assert!(UniformChunking.partition(&prefix, 8).is_empty());

        // All-zero-degree frontier
        let prefix = [0, 0, 0];
        assert!(UniformChunking.partition(&prefix, 8).is_empty());
    }

    #[test]
    fn test_vertex_mapped_follows_boundaries() {
        let prefix = [0, 1, 98, 99, 100];
        let chunks = VertexMapped.partition(&prefix, 4);

        assert_covering(&chunks, 100);
        // Spans mirror per-vertex degrees, skew included
        let lens: Vec<usize> = chunks.iter().map(WorkChunk::len).collect();
        assert_eq!(lens, vec![1, 97, 1, 1]);
    }

    #[test]
    fn test_vertex_mapped_skips_isolated() {
        // Middle vertex has degree 0 and gets no span
        let prefix = [0, 3, 3, 5];
        let chunks = VertexMapped.partition(&prefix, 2);
        assert_eq!(
            chunks,
            vec![WorkChunk { start: 0, end: 3 }, WorkChunk { start: 3, end: 5 }]
        );
    }
}
