// Shared fixtures for the integration tests.
#![allow(dead_code)]

use u_jabeja::graph::{Graph, InitColorPolicy, NodeId};
use u_jabeja::jabeja::{NodeSelectionPolicy, RunConfig, RunConfigBuilder};

/// A complete builder; tests override what they care about.
pub fn builder() -> RunConfigBuilder {
    RunConfig::builder()
        .with_num_partitions(2)
        .with_rounds(1)
        .with_random_neighbor_sample_size(3)
        .with_temperature(2.0)
        .with_delta(0.003)
        .with_seed(0)
        .with_uniform_random_sample_size(2)
        .with_graph_file_path("square.graph")
        .with_output_dir("output")
        .with_init_color_policy(InitColorPolicy::RoundRobin)
        .with_node_selection_policy(NodeSelectionPolicy::Local)
        .with_alpha(2.0)
        .with_restart(false)
        .with_restart_interval(10)
        .with_enhanced(false)
        .with_temp_enh(1.0)
        .with_min_temp_enh(0.01)
        .with_alpha_enh(0.9)
        .with_iter_enh(2)
}

/// 4-cycle 0-1-2-3-0 colored A B A B.
pub fn alternating_square() -> Graph {
    Graph::from_edges(
        &[(0, 0), (1, 1), (2, 0), (3, 1)],
        &[(0, 1), (1, 2), (2, 3), (3, 0)],
    )
    .unwrap()
}

/// Ring lattice: every node linked to its `k` nearest successors.
pub fn ring_lattice(n: u32, k: u32, colors: u32) -> Graph {
    let nodes: Vec<(NodeId, u32)> = (0..n).map(|i| (i, i % colors)).collect();
    let mut edges = Vec::new();
    for i in 0..n {
        for j in 1..=k {
            edges.push((i, (i + j) % n));
        }
    }
    Graph::from_edges(&nodes, &edges).unwrap()
}

/// Counts (neighbor pairs with differing colors) from both endpoints.
pub fn gray_links(graph: &Graph) -> usize {
    graph
        .nodes()
        .map(|node| {
            node.neighbors()
                .iter()
                .filter(|&&n| graph.node(n).unwrap().color() != node.color())
                .count()
        })
        .sum()
}
