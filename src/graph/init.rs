//! Initial color assignment.

use std::fmt;
use std::str::FromStr;

use super::types::{Adjacency, Color, Graph, Node};
use crate::error::{JabejaError, Result};
use crate::random::RandomSource;

/// How labels are handed out before the first round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum InitColorPolicy {
    /// The i-th node (by ascending id) gets label `i % k`.
    #[default]
    RoundRobin,
    /// Every node draws a uniform label.
    Random,
    /// Contiguous id ranges of roughly `n / k` nodes share a label.
    Batch,
}

impl fmt::Display for InitColorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InitColorPolicy::RoundRobin => "ROUND_ROBIN",
            InitColorPolicy::Random => "RANDOM",
            InitColorPolicy::Batch => "BATCH",
        })
    }
}

impl FromStr for InitColorPolicy {
    type Err = JabejaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "ROUND_ROBIN" => Ok(InitColorPolicy::RoundRobin),
            "RANDOM" => Ok(InitColorPolicy::Random),
            "BATCH" => Ok(InitColorPolicy::Batch),
            other => Err(JabejaError::invalid(format!(
                "unknown init color policy {other:?}"
            ))),
        }
    }
}

/// Colors an adjacency into a [`Graph`] with labels in `0..num_partitions`.
///
/// Only [`InitColorPolicy::Random`] consumes draws from `rng`.
pub fn color_graph<R: RandomSource + ?Sized>(
    adjacency: Adjacency,
    policy: InitColorPolicy,
    num_partitions: u32,
    rng: &mut R,
) -> Result<Graph> {
    if num_partitions == 0 {
        return Err(JabejaError::invalid("num_partitions must be at least 1"));
    }
    let n = adjacency.len() as u64;
    let k = num_partitions as u64;

    let nodes: Vec<Node> = adjacency
        .into_iter()
        .enumerate()
        .map(|(i, (id, neighbors))| {
            let color: Color = match policy {
                InitColorPolicy::RoundRobin => (i as u64 % k) as Color,
                InitColorPolicy::Random => rng.next_index(num_partitions as usize) as Color,
                InitColorPolicy::Batch => (i as u64 * k / n) as Color,
            };
            Node::new(id, color, neighbors)
        })
        .collect();
    Graph::new(nodes)
}
