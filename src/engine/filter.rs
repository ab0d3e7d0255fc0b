//! Filter: vertex-parallel frontier contraction
//!
//! The predicated-filter counterpart to Advance: each input element is
//! evaluated exactly once — no duplication, no omission — which makes it the
//! right place for exactly-once local state transitions such as "decrement a
//! shared counter and test the value it left behind".

use rayon::prelude::*;

use crate::engine::frontier::Frontier;

/// Evaluate `pred` exactly once per input element, in parallel, writing the
/// elements for which it returned `true` to the output frontier.
///
/// The output frontier's previous contents are discarded; survivor order is
/// unspecified.
pub fn filter<T, G>(input: &Frontier<T>, output: &mut Frontier<T>, pred: G)
where
    T: Copy + Send + Sync,
    G: Fn(T) -> bool + Sync,
{
    output.clear();

    let kept: Vec<T> = input
        .as_slice()
        .par_iter()
        .copied()
        .filter(|&item| pred(item))
        .collect();

    output.extend(kept);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::NodeId;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_keeps_only_passing_elements() {
        let mut input = Frontier::new();
        input.sequence(NodeId(0), 10);

        let mut output = Frontier::new();
        filter(&input, &mut output, |v: NodeId| v.0 % 2 == 0);

        let mut ids: Vec<u32> = output.iter().map(|v| v.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_exactly_once_evaluation() {
        let evaluations: Vec<AtomicU32> = (0..64).map(|_| AtomicU32::new(0)).collect();

        let mut input = Frontier::new();
        input.sequence(NodeId(0), 64);

        let mut output = Frontier::new();
        filter(&input, &mut output, |v: NodeId| {
            evaluations[v.0 as usize].fetch_add(1, Ordering::Relaxed);
            true
        });

        assert_eq!(output.len(), 64);
        for (vertex, count) in evaluations.iter().enumerate() {
            assert_eq!(count.load(Ordering::Relaxed), 1, "vertex {vertex}");
        }
    }

    #[test]
    fn test_duplicates_each_evaluated() {
        // Filter treats duplicate entries as distinct elements.
        let hits = AtomicU32::new(0);

        let mut input = Frontier::new();
        input.push_back(NodeId(7));
        input.push_back(NodeId(7));

        let mut output = Frontier::new();
        filter(&input, &mut output, |_v: NodeId| {
            hits.fetch_add(1, Ordering::Relaxed);
            true
        });

        assert_eq!(hits.load(Ordering::Relaxed), 2);
        assert_eq!(output.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let input: Frontier = Frontier::new();
        let mut output = Frontier::new();
        output.push_back(NodeId(1)); // stale contents are discarded

        filter(&input, &mut output, |_v: NodeId| true);
        assert!(output.is_empty());
    }

    #[test]
    fn test_all_rejected() {
        let mut input = Frontier::new();
        input.sequence(NodeId(0), 5);

        let mut output = Frontier::new();
        filter(&input, &mut output, |_v: NodeId| false);
        assert!(output.is_empty());
    }
}
