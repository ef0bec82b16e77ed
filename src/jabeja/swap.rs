//! Per-node sample-and-swap step.

use log::trace;

use super::config::NodeSelectionPolicy;
use super::evaluator::PartnerEvaluator;
use super::sampler::{sample_neighbors, sample_random};
use super::schedule::RunState;
use crate::error::{JabejaError, Result};
use crate::graph::{Graph, NodeId};
use crate::random::RandomSource;

/// Finds a partner for one node and exchanges their colors.
#[derive(Debug, Clone, Copy)]
pub struct SwapExecutor {
    policy: NodeSelectionPolicy,
    neighbor_sample_size: usize,
    uniform_sample_size: usize,
    evaluator: PartnerEvaluator,
}

impl SwapExecutor {
    pub fn new(
        policy: NodeSelectionPolicy,
        neighbor_sample_size: usize,
        uniform_sample_size: usize,
        evaluator: PartnerEvaluator,
    ) -> Self {
        Self {
            policy,
            neighbor_sample_size,
            uniform_sample_size,
            evaluator,
        }
    }

    /// Samples candidates for `node`, picks a partner and swaps colors.
    ///
    /// Returns the partner when a swap happened. A node that finds no
    /// acceptable partner, or whose partner already has the same color,
    /// keeps its color and `state.swap_count` is left unchanged.
    pub fn try_swap<R: RandomSource + ?Sized>(
        &self,
        graph: &mut Graph,
        state: &mut RunState,
        node: NodeId,
        rng: &mut R,
    ) -> Result<Option<NodeId>> {
        if !graph.contains(node) {
            return Err(JabejaError::UnknownNode(node));
        }

        let partner = match self.policy {
            NodeSelectionPolicy::Local => self.local_partner(graph, state, node, rng)?,
            NodeSelectionPolicy::Random => self.random_partner(graph, state, node, rng)?,
            NodeSelectionPolicy::Hybrid => match self.local_partner(graph, state, node, rng)? {
                Some(q) => Some(q),
                None => self.random_partner(graph, state, node, rng)?,
            },
        };

        match partner {
            Some(q) if graph.color(q) != graph.color(node) => {
                graph.swap_colors(node, q);
                state.swap_count += 1;
                trace!("round {}: swapped {node} <-> {q}", state.round);
                Ok(Some(q))
            }
            _ => Ok(None),
        }
    }

    fn local_partner<R: RandomSource + ?Sized>(
        &self,
        graph: &Graph,
        state: &RunState,
        node: NodeId,
        rng: &mut R,
    ) -> Result<Option<NodeId>> {
        let candidates = sample_neighbors(graph, node, self.neighbor_sample_size, rng)?;
        self.evaluator
            .find_partner(graph, node, &candidates, state.temperature, rng)
    }

    fn random_partner<R: RandomSource + ?Sized>(
        &self,
        graph: &Graph,
        state: &RunState,
        node: NodeId,
        rng: &mut R,
    ) -> Result<Option<NodeId>> {
        let candidates = sample_random(graph, node, self.uniform_sample_size, rng)?;
        self.evaluator
            .find_partner(graph, node, &candidates, state.temperature, rng)
    }
}
