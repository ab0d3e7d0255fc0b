//! Integration tests for frontier-graph
//!
//! End-to-end runs of both algorithms through the public API, checked
//! against independent reference implementations.

use std::collections::VecDeque;

use frontier_graph::{betweenness_centrality, kcore, CsrGraph, NodeId};

fn undirected(edges: &[(u32, u32)]) -> CsrGraph {
    let list: Vec<_> = edges
        .iter()
        .map(|&(a, b)| (NodeId(a), NodeId(b), 1.0))
        .collect();
    CsrGraph::from_edge_list_undirected(&list).unwrap()
}

/// Reference k-core: repeated min-degree peeling, O(n^2) but obviously
/// correct on test-sized graphs.
fn reference_core_numbers(graph: &CsrGraph) -> Vec<u32> {
    let n = graph.num_nodes();
    #[allow(clippy::cast_possible_truncation)]
    let mut degree: Vec<i64> = (0..n)
        .map(|v| graph.out_degree(NodeId(v as u32)) as i64)
        .collect();
    let mut removed: Vec<bool> = degree.iter().map(|&d| d == 0).collect();
    let mut core = vec![0_u32; n];

    let mut k: i64 = 0;
    while removed.iter().any(|r| !r) {
        k += 1;
        loop {
            let mut changed = false;
            for v in 0..n {
                if !removed[v] && degree[v] <= k {
                    removed[v] = true;
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    {
                        core[v] = k as u32;
                    }
                    #[allow(clippy::cast_possible_truncation)]
                    for &u in graph.outgoing_neighbors(NodeId(v as u32)).unwrap() {
                        if !removed[u as usize] {
                            degree[u as usize] -= 1;
                        }
                    }
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
    }

    core
}

/// Reference single-source betweenness: textbook Brandes on the BFS DAG,
/// halved for undirected double counting like the engine's result.
#[allow(clippy::cast_possible_truncation)]
fn brute_force_bc(graph: &CsrGraph, source: NodeId) -> (Vec<f32>, Vec<f32>) {
    let n = graph.num_nodes();
    let mut dist = vec![-1_i64; n];
    let mut sigma = vec![0.0_f64; n];
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    dist[source.0 as usize] = 0;
    sigma[source.0 as usize] = 1.0;
    queue.push_back(source.0 as usize);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        for &w in graph.outgoing_neighbors(NodeId(v as u32)).unwrap() {
            let w = w as usize;
            if dist[w] == -1 {
                dist[w] = dist[v] + 1;
                queue.push_back(w);
            }
            if dist[w] == dist[v] + 1 {
                sigma[w] += sigma[v];
            }
        }
    }

    let mut delta = vec![0.0_f64; n];
    for &w in order.iter().rev() {
        for &v in graph.outgoing_neighbors(NodeId(w as u32)).unwrap() {
            let v = v as usize;
            if dist[v] >= 0 && dist[v] + 1 == dist[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    let sigmas: Vec<f32> = sigma.iter().map(|&s| s as f32).collect();
    #[allow(clippy::cast_possible_truncation)]
    let bc_values: Vec<f32> = (0..n)
        .map(|v| {
            if v == source.0 as usize {
                0.0
            } else {
                (delta[v] / 2.0) as f32
            }
        })
        .collect();

    (sigmas, bc_values)
}

fn assert_close(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len());
    for (v, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < 1e-4, "vertex {v}: got {a}, expected {e}");
    }
}

#[test]
fn test_kcore_path_graph() {
    // 0 - 1 - 2 - 3 - 4: degeneracy 1
    let graph = undirected(&[(0, 1), (1, 2), (2, 3), (3, 4)]);

    let mut k_cores = vec![0; 5];
    kcore(&graph, &mut k_cores).unwrap();

    assert_eq!(k_cores, vec![1; 5]);
}

#[test]
fn test_kcore_star_graph() {
    // Center 0, leaves 1-4: degeneracy 1
    let graph = undirected(&[(0, 1), (0, 2), (0, 3), (0, 4)]);

    let mut k_cores = vec![0; 5];
    kcore(&graph, &mut k_cores).unwrap();

    assert_eq!(k_cores, vec![1; 5]);
}

#[test]
fn test_kcore_triangle() {
    let graph = undirected(&[(0, 1), (1, 2), (2, 0)]);

    let mut k_cores = vec![0; 3];
    kcore(&graph, &mut k_cores).unwrap();

    assert_eq!(k_cores, vec![2; 3]);
}

#[test]
fn test_kcore_matches_reference_on_layered_graph() {
    // Two triangles bridged by an edge, plus a pendant chain: mixed cores
    let graph = undirected(&[
        (0, 1),
        (1, 2),
        (2, 0), // triangle A
        (3, 4),
        (4, 5),
        (5, 3), // triangle B
        (2, 3), // bridge
        (5, 6),
        (6, 7), // pendant chain
    ]);

    let mut k_cores = vec![0; 8];
    kcore(&graph, &mut k_cores).unwrap();

    assert_eq!(k_cores, reference_core_numbers(&graph));
}

#[test]
fn test_kcore_matches_reference_on_clique_with_fringe() {
    // 4-clique (core 3) with each clique vertex holding one leaf (core 1)
    let graph = undirected(&[
        (0, 1),
        (0, 2),
        (0, 3),
        (1, 2),
        (1, 3),
        (2, 3), // clique
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7), // leaves
    ]);

    let mut k_cores = vec![0; 8];
    kcore(&graph, &mut k_cores).unwrap();

    let expected = reference_core_numbers(&graph);
    assert_eq!(k_cores, expected);
    assert_eq!(&k_cores[..4], &[3, 3, 3, 3]);
    assert_eq!(&k_cores[4..], &[1, 1, 1, 1]);
}

#[test]
fn test_bc_path_middle_source_matches_brute_force() {
    // 5-vertex path, source at the middle vertex
    let graph = undirected(&[(0, 1), (1, 2), (2, 3), (3, 4)]);

    let mut sigmas = vec![0.0; 5];
    let mut bc_values = vec![0.0; 5];
    betweenness_centrality(&graph, NodeId(2), &mut sigmas, &mut bc_values).unwrap();

    let (expected_sigmas, expected_bc) = brute_force_bc(&graph, NodeId(2));
    assert_close(&sigmas, &expected_sigmas);
    assert_close(&bc_values, &expected_bc);
}

#[test]
fn test_bc_matches_brute_force_on_bridged_triangles() {
    let graph = undirected(&[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)]);

    for source in 0..6 {
        let mut sigmas = vec![0.0; 6];
        let mut bc_values = vec![0.0; 6];
        betweenness_centrality(&graph, NodeId(source), &mut sigmas, &mut bc_values).unwrap();

        let (expected_sigmas, expected_bc) = brute_force_bc(&graph, NodeId(source));
        assert_close(&sigmas, &expected_sigmas);
        assert_close(&bc_values, &expected_bc);
    }
}

#[test]
fn test_bc_disconnected_component_untouched() {
    // 0 - 1 - 2 plus a separate edge 3 - 4
    let graph = undirected(&[(0, 1), (1, 2), (3, 4)]);

    let mut sigmas = vec![0.0; 5];
    let mut bc_values = vec![0.0; 5];
    betweenness_centrality(&graph, NodeId(0), &mut sigmas, &mut bc_values).unwrap();

    // Unreached vertices keep their reset values
    assert_eq!(sigmas[3], 0.0);
    assert_eq!(sigmas[4], 0.0);
    assert_eq!(bc_values[3], 0.0);
    assert_eq!(bc_values[4], 0.0);

    // The reached component still matches the reference
    let (expected_sigmas, expected_bc) = brute_force_bc(&graph, NodeId(0));
    assert_close(&sigmas, &expected_sigmas);
    assert_close(&bc_values, &expected_bc);
}

#[test]
fn test_rerunning_on_same_graph_is_deterministic() {
    // Lane interleaving varies between runs; results must not.
    let graph = undirected(&[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)]);

    let mut first = vec![0; 6];
    kcore(&graph, &mut first).unwrap();

    for _ in 0..10 {
        let mut again = vec![0; 6];
        kcore(&graph, &mut again).unwrap();
        assert_eq!(first, again);
    }
}
