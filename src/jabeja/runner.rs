//! Round loop.
//!
//! # Algorithm
//!
//! For each of `rounds` rounds:
//! 1. Visit every node in ascending id order and run the sample-and-swap
//!    step. A swap is visible to every node visited after it.
//! 2. Apply the cooling transition, then the reheat check.
//! 3. Recount edge-cut and migrations and hand the report to the sink.
//!
//! # Reference
//!
//! Rahimian, Payberah, Girdzijauskas, Jelasity & Haridi (2013),
//! "JA-BE-JA: A Distributed Algorithm for Balanced Graph Partitioning".

use log::info;

use super::config::RunConfig;
use super::evaluator::PartnerEvaluator;
use super::schedule::{AnnealingSchedule, RunState, Temperature};
use super::swap::SwapExecutor;
use crate::error::{JabejaError, Result};
use crate::graph::Graph;
use crate::random::RandomSource;
use crate::report::{measure, ReportSink, RoundReport};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JabejaResult {
    /// Rounds executed (always `RunConfig::rounds`).
    pub rounds: usize,
    /// Edge-cut after the last round.
    pub edge_cut: usize,
    /// Total swaps performed.
    pub swap_count: u64,
    /// Nodes away from their initial color after the last round.
    pub migrations: usize,
    /// Temperature after the last transition.
    pub final_temperature: Temperature,
    /// Reheats performed.
    pub restarts: usize,
}

/// Executes Ja-be-Ja on a graph.
pub struct JabejaRunner;

impl JabejaRunner {
    /// Runs exactly `config.rounds()` rounds, mutating `graph` in place.
    ///
    /// All stochastic decisions draw from `rng`, in a fixed order, so the
    /// same graph, configuration and seed always give the same reports.
    ///
    /// # Errors
    ///
    /// Fails before the first round if a graph-wide sample of
    /// `uniform_random_sample_size` ids cannot be drawn, and at any round
    /// where the sink fails to record.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_jabeja::graph::{Graph, InitColorPolicy};
    /// use u_jabeja::jabeja::{JabejaRunner, NodeSelectionPolicy, RunConfig};
    /// use u_jabeja::random::SeededRandom;
    /// use u_jabeja::report::RoundReport;
    ///
    /// let config = RunConfig::builder()
    ///     .with_num_partitions(2)
    ///     .with_rounds(3)
    ///     .with_random_neighbor_sample_size(3)
    ///     .with_temperature(1.0)
    ///     .with_delta(0.0)
    ///     .with_seed(1)
    ///     .with_uniform_random_sample_size(2)
    ///     .with_graph_file_path("square.graph")
    ///     .with_output_dir("output")
    ///     .with_init_color_policy(InitColorPolicy::RoundRobin)
    ///     .with_node_selection_policy(NodeSelectionPolicy::Local)
    ///     .with_alpha(2.0)
    ///     .with_restart(false)
    ///     .with_restart_interval(1)
    ///     .with_enhanced(false)
    ///     .with_temp_enh(1.0)
    ///     .with_min_temp_enh(0.1)
    ///     .with_alpha_enh(0.5)
    ///     .with_iter_enh(1)
    ///     .build()
    ///     .unwrap();
    ///
    /// let mut graph = Graph::from_edges(
    ///     &[(0, 0), (1, 1), (2, 0), (3, 1)],
    ///     &[(0, 1), (1, 2), (2, 3), (3, 0)],
    /// )
    /// .unwrap();
    /// let mut rng = SeededRandom::new(config.seed());
    /// let mut reports: Vec<RoundReport> = Vec::new();
    ///
    /// let result = JabejaRunner::run(&mut graph, &config, &mut rng, &mut reports).unwrap();
    /// assert_eq!(reports.len(), 3);
    /// assert!(result.edge_cut < 4);
    /// ```
    pub fn run<R, S>(
        graph: &mut Graph,
        config: &RunConfig,
        rng: &mut R,
        mut sink: S,
    ) -> Result<JabejaResult>
    where
        R: RandomSource + ?Sized,
        S: ReportSink,
    {
        if config.node_selection_policy().samples_graph() {
            let available = graph.len().saturating_sub(1);
            let requested = config.uniform_random_sample_size();
            if requested > available {
                return Err(JabejaError::SampleTooLarge {
                    requested,
                    available,
                });
            }
        }

        let schedule = AnnealingSchedule::new(config.cooling(), config.restart_policy());
        let executor = SwapExecutor::new(
            config.node_selection_policy(),
            config.random_neighbor_sample_size(),
            config.uniform_random_sample_size(),
            PartnerEvaluator::new(config.alpha()),
        );
        let mut state = schedule.initial_state();
        let ids = graph.ids().to_vec();

        info!(
            "starting {} rounds on {} nodes / {} edges ({}, {:?})",
            config.rounds(),
            graph.len(),
            graph.edge_count(),
            config.node_selection_policy(),
            state.temperature
        );

        let mut last = measure(graph);
        for round in 0..config.rounds() {
            state.round = round;
            for &id in &ids {
                executor.try_swap(graph, &mut state, id, rng)?;
            }

            schedule.end_round(&mut state);

            last = measure(graph);
            let report = round_report(&state, last.edge_cut, last.migrations);
            info!(
                "round: {}, edge cut: {}, swaps: {}, migrations: {}",
                report.round, report.edge_cut, report.swap_count, report.migrations
            );
            sink.record(&report)?;
        }

        Ok(JabejaResult {
            rounds: config.rounds(),
            edge_cut: last.edge_cut,
            swap_count: state.swap_count,
            migrations: last.migrations,
            final_temperature: state.temperature,
            restarts: state.restarts,
        })
    }
}

fn round_report(state: &RunState, edge_cut: usize, migrations: usize) -> RoundReport {
    RoundReport {
        round: state.round,
        edge_cut,
        swap_count: state.swap_count,
        migrations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{color_graph, Adjacency, InitColorPolicy};
    use crate::jabeja::config::tests::full_builder;
    use crate::jabeja::NodeSelectionPolicy;
    use crate::random::SeededRandom;
    use crate::report::{edge_cut, partition_sizes, NullSink};

    /// `w x h` grid, 4-connected.
    fn grid(w: u32, h: u32) -> Adjacency {
        let mut adj = Adjacency::new();
        for y in 0..h {
            for x in 0..w {
                let id = y * w + x;
                let mut nb = Vec::new();
                if y > 0 {
                    nb.push(id - w);
                }
                if x > 0 {
                    nb.push(id - 1);
                }
                if x + 1 < w {
                    nb.push(id + 1);
                }
                if y + 1 < h {
                    nb.push(id + w);
                }
                adj.insert(id, nb);
            }
        }
        adj
    }

    fn grid_graph(policy: InitColorPolicy) -> Graph {
        let mut rng = SeededRandom::new(0);
        color_graph(grid(7, 7), policy, 4, &mut rng).unwrap()
    }

    #[test]
    fn test_reports_every_round() {
        let config = full_builder().with_rounds(7).build().unwrap();
        let mut g = grid_graph(InitColorPolicy::RoundRobin);
        let mut rng = SeededRandom::new(config.seed());
        let mut reports: Vec<RoundReport> = Vec::new();
        let result = JabejaRunner::run(&mut g, &config, &mut rng, &mut reports).unwrap();

        assert_eq!(reports.len(), 7);
        assert!(reports.iter().enumerate().all(|(i, r)| r.round == i));
        assert_eq!(result.rounds, 7);
        let last = reports.last().unwrap();
        assert_eq!(result.edge_cut, last.edge_cut);
        assert_eq!(result.swap_count, last.swap_count);
        assert_eq!(last.edge_cut, edge_cut(&g));
    }

    #[test]
    fn test_swap_count_is_cumulative() {
        let config = full_builder().with_rounds(10).build().unwrap();
        let mut g = grid_graph(InitColorPolicy::Random);
        let mut rng = SeededRandom::new(3);
        let mut reports: Vec<RoundReport> = Vec::new();
        JabejaRunner::run(&mut g, &config, &mut rng, &mut reports).unwrap();
        for w in reports.windows(2) {
            assert!(w[1].swap_count >= w[0].swap_count);
        }
    }

    #[test]
    fn test_run_improves_round_robin_grid() {
        let config = full_builder().with_rounds(50).build().unwrap();
        let mut g = grid_graph(InitColorPolicy::RoundRobin);
        let initial = edge_cut(&g);
        let sizes = partition_sizes(&g);
        let mut rng = SeededRandom::new(config.seed());
        let result = JabejaRunner::run(&mut g, &config, &mut rng, NullSink).unwrap();
        assert!(
            result.edge_cut < initial,
            "edge cut did not improve: {} -> {}",
            initial,
            result.edge_cut
        );
        assert_eq!(partition_sizes(&g), sizes);
    }

    #[test]
    fn test_same_seed_same_reports() {
        let config = full_builder().with_rounds(15).with_enhanced(true).build().unwrap();
        let run = || {
            let mut g = grid_graph(InitColorPolicy::Random);
            let mut rng = SeededRandom::new(99);
            let mut reports: Vec<RoundReport> = Vec::new();
            JabejaRunner::run(&mut g, &config, &mut rng, &mut reports).unwrap();
            (reports, g.coloring())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_zero_rounds_leaves_graph_untouched() {
        let config = full_builder().with_rounds(0).build().unwrap();
        let mut g = grid_graph(InitColorPolicy::RoundRobin);
        let before = g.coloring();
        let mut rng = SeededRandom::new(0);
        let mut reports: Vec<RoundReport> = Vec::new();
        let result = JabejaRunner::run(&mut g, &config, &mut rng, &mut reports).unwrap();
        assert!(reports.is_empty());
        assert_eq!(g.coloring(), before);
        assert_eq!(result.swap_count, 0);
        assert_eq!(result.final_temperature, Temperature::Standard(2.0));
    }

    #[test]
    fn test_uniform_sample_checked_before_first_round() {
        let config = full_builder()
            .with_node_selection_policy(NodeSelectionPolicy::Random)
            .with_uniform_random_sample_size(49)
            .build()
            .unwrap();
        let mut g = grid_graph(InitColorPolicy::RoundRobin);
        let before = g.coloring();
        let mut rng = SeededRandom::new(0);
        let mut reports: Vec<RoundReport> = Vec::new();
        let err = JabejaRunner::run(&mut g, &config, &mut rng, &mut reports).unwrap_err();
        assert!(matches!(
            err,
            JabejaError::SampleTooLarge {
                requested: 49,
                available: 48
            }
        ));
        assert!(reports.is_empty());
        assert_eq!(g.coloring(), before);
    }

    #[test]
    fn test_local_policy_ignores_uniform_sample_size() {
        let config = full_builder()
            .with_node_selection_policy(NodeSelectionPolicy::Local)
            .with_uniform_random_sample_size(1000)
            .with_rounds(2)
            .build()
            .unwrap();
        let mut g = grid_graph(InitColorPolicy::RoundRobin);
        let mut rng = SeededRandom::new(0);
        assert!(JabejaRunner::run(&mut g, &config, &mut rng, NullSink).is_ok());
    }

    #[test]
    fn test_restart_counts_reheats() {
        // T starts frozen, so every round counts towards a reheat.
        let config = full_builder()
            .with_temperature(1.0)
            .with_restart(true)
            .with_restart_interval(4)
            .with_rounds(12)
            .build()
            .unwrap();
        let mut g = grid_graph(InitColorPolicy::RoundRobin);
        let mut rng = SeededRandom::new(0);
        let result = JabejaRunner::run(&mut g, &config, &mut rng, NullSink).unwrap();
        assert_eq!(result.restarts, 3);
        assert_eq!(result.final_temperature, Temperature::Standard(1.0));
    }
}
