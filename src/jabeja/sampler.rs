//! Candidate sampling.
//!
//! A node never sees global state: it only inspects a bounded sample of its
//! own neighbors or a bounded uniform sample of the whole graph.

use crate::error::{JabejaError, Result};
use crate::graph::{Graph, NodeId};
use crate::random::RandomSource;

/// Up to `k` distinct neighbors of `node`, drawn without replacement.
///
/// When the node has at most `k` neighbors they are all returned in
/// adjacency order and no draws are consumed. Fails with
/// [`JabejaError::UnknownNode`] if `node` is not in the graph.
pub fn sample_neighbors<R: RandomSource + ?Sized>(
    graph: &Graph,
    node: NodeId,
    k: usize,
    rng: &mut R,
) -> Result<Vec<NodeId>> {
    let neighbors = graph
        .node(node)
        .ok_or(JabejaError::UnknownNode(node))?
        .neighbors();
    if neighbors.len() <= k {
        return Ok(neighbors.to_vec());
    }

    let mut picked = Vec::with_capacity(k);
    while picked.len() < k {
        let candidate = neighbors[rng.next_index(neighbors.len())];
        if !picked.contains(&candidate) {
            picked.push(candidate);
        }
    }
    Ok(picked)
}

/// `k` distinct node ids drawn uniformly from the graph, excluding `exclude`.
///
/// Uses rejection sampling: draws that hit `exclude` or an id already picked
/// are discarded. Requesting more ids than `|graph| - 1` is a caller error.
pub fn sample_random<R: RandomSource + ?Sized>(
    graph: &Graph,
    exclude: NodeId,
    k: usize,
    rng: &mut R,
) -> Result<Vec<NodeId>> {
    let ids = graph.ids();
    let available = ids.len() - usize::from(graph.contains(exclude));
    if k > available {
        return Err(JabejaError::SampleTooLarge {
            requested: k,
            available,
        });
    }

    let mut picked = Vec::with_capacity(k);
    while picked.len() < k {
        let candidate = ids[rng.next_index(ids.len())];
        if candidate != exclude && !picked.contains(&candidate) {
            picked.push(candidate);
        }
    }
    Ok(picked)
}
