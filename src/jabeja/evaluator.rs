//! Local cost function and swap acceptance.
//!
//! For a node `p` and candidate `q` the cost of the current coloring is
//!
//! ```text
//! old = d(p, c_p)^alpha + d(q, c_q)^alpha
//! new = d(p, c_q)^alpha + d(q, c_p)^alpha
//! ```
//!
//! where `d(x, c)` counts neighbors of `x` holding color `c`. Higher is
//! better: a swap is attractive when it gives both nodes more same-colored
//! neighbors.

use super::schedule::Temperature;
use crate::error::{JabejaError, Result};
use crate::graph::{Color, Graph, NodeId};
use crate::random::RandomSource;

/// Number of neighbors of `node` currently holding `color`.
pub fn degree(graph: &Graph, node: NodeId, color: Color) -> Result<usize> {
    ensure_known(graph, &[node])?;
    Ok(same_color_neighbors(graph, node, color))
}

fn ensure_known(graph: &Graph, ids: &[NodeId]) -> Result<()> {
    match ids.iter().find(|&&id| !graph.contains(id)) {
        Some(&id) => Err(JabejaError::UnknownNode(id)),
        None => Ok(()),
    }
}

// Callers guarantee `node` is in the graph; neighbors always are.
fn same_color_neighbors(graph: &Graph, node: NodeId, color: Color) -> usize {
    graph
        .neighbors(node)
        .iter()
        .filter(|&&n| graph.color(n) == color)
        .count()
}

/// Acceptance test for a swap moving the local cost from `old` to `new`.
///
/// - Standard: `new * T > old`, strictly. No draw is consumed.
/// - Enhanced: draws `r` in `[0, 1)` and accepts iff `exp((new - old) / T) > r`.
///   At `T == 0` this degenerates to accepting only strict improvements.
pub fn accept<R: RandomSource + ?Sized>(
    temperature: Temperature,
    old: f64,
    new: f64,
    rng: &mut R,
) -> bool {
    match temperature {
        Temperature::Standard(t) => new * t > old,
        Temperature::Enhanced(t) => {
            let probability = ((new - old) / t).exp();
            probability > rng.next_unit()
        }
    }
}

/// Scores candidate partners with the degree-based cost function.
#[derive(Debug, Clone, Copy)]
pub struct PartnerEvaluator {
    alpha: f64,
}

impl PartnerEvaluator {
    /// `alpha` is the exponent applied to every degree term.
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    /// Picks the best acceptable swap partner for `node` among `candidates`.
    ///
    /// A candidate is taken when it passes [`accept`] and its `new` cost
    /// strictly exceeds the best `new` seen so far, which starts at 0. The
    /// acceptance test runs first for every candidate, so under the enhanced
    /// schedule each candidate consumes exactly one draw. On ties the earlier
    /// candidate wins.
    ///
    /// Fails with [`JabejaError::UnknownNode`] before any draw if `node` or a
    /// candidate is not in the graph.
    pub fn find_partner<R: RandomSource + ?Sized>(
        &self,
        graph: &Graph,
        node: NodeId,
        candidates: &[NodeId],
        temperature: Temperature,
        rng: &mut R,
    ) -> Result<Option<NodeId>> {
        ensure_known(graph, &[node])?;
        ensure_known(graph, candidates)?;

        let color_p = graph.color(node);
        let d_pp = self.weight(same_color_neighbors(graph, node, color_p));

        let mut best = None;
        let mut highest = 0.0;
        for &q in candidates {
            let color_q = graph.color(q);
            let old = d_pp + self.weight(same_color_neighbors(graph, q, color_q));
            let new = self.weight(same_color_neighbors(graph, node, color_q))
                + self.weight(same_color_neighbors(graph, q, color_p));

            if accept(temperature, old, new, rng) && new > highest {
                best = Some(q);
                highest = new;
            }
        }
        Ok(best)
    }

    fn weight(&self, degree: usize) -> f64 {
        (degree as f64).powf(self.alpha)
    }
}
