//! Per-round partition quality metrics.
//!
//! Everything here is recomputed from the graph on demand; nothing is
//! tracked incrementally across swaps.

use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::graph::{Color, Graph, Node};

/// One line of the per-round report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundReport {
    /// Round number, 0-based.
    pub round: usize,
    /// Edges whose endpoints hold different colors.
    pub edge_cut: usize,
    /// Swaps since the start of the run (cumulative).
    pub swap_count: u64,
    /// Nodes whose color differs from their initial color.
    pub migrations: usize,
}

/// Snapshot of the quantities derived from a coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionMetrics {
    pub edge_cut: usize,
    pub migrations: usize,
}

/// Neighbors of `node` holding a different color.
fn gray_links(graph: &Graph, node: &Node) -> usize {
    node.neighbors()
        .iter()
        .filter(|&&n| graph.color(n) != node.color())
        .count()
}

/// Recounts edge-cut and migrations in one pass over the nodes.
///
/// Every crossing edge is seen from both endpoints, so the gray-link total
/// is always even and the edge-cut is exactly half of it.
#[cfg(not(feature = "parallel"))]
pub fn measure(graph: &Graph) -> PartitionMetrics {
    let (gray, migrations) = graph.nodes().fold((0usize, 0usize), |(gray, moved), node| {
        (
            gray + gray_links(graph, node),
            moved + usize::from(node.has_migrated()),
        )
    });
    PartitionMetrics {
        edge_cut: gray / 2,
        migrations,
    }
}

/// Recounts edge-cut and migrations, splitting the node scan across rayon
/// workers. The graph is only read, so the result matches a sequential scan.
#[cfg(feature = "parallel")]
pub fn measure(graph: &Graph) -> PartitionMetrics {
    let (gray, migrations) = graph
        .node_map()
        .par_iter()
        .map(|(_, node)| (gray_links(graph, node), usize::from(node.has_migrated())))
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));
    PartitionMetrics {
        edge_cut: gray / 2,
        migrations,
    }
}

/// Number of edges whose endpoints hold different colors.
pub fn edge_cut(graph: &Graph) -> usize {
    measure(graph).edge_cut
}

/// Number of nodes whose color differs from their initial color.
pub fn migrations(graph: &Graph) -> usize {
    measure(graph).migrations
}

/// Node count per color. Swaps never change these counts.
pub fn partition_sizes(graph: &Graph) -> BTreeMap<Color, usize> {
    let mut sizes = BTreeMap::new();
    for node in graph.nodes() {
        *sizes.entry(node.color()).or_insert(0) += 1;
    }
    sizes
}
