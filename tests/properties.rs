// Property tests for the invariants that must hold for any graph and seed.
mod common;

use proptest::prelude::*;

use common::{builder, gray_links};
use u_jabeja::graph::{Graph, NodeId};
use u_jabeja::jabeja::{
    sample_neighbors, sample_random, AnnealingSchedule, CoolingSchedule, JabejaRunner,
    NodeSelectionPolicy, Temperature,
};
use u_jabeja::random::SeededRandom;
use u_jabeja::report::{measure, partition_sizes, RoundReport};

/// Random simple graph with `n` nodes, colors in `0..k`.
fn arb_graph() -> impl Strategy<Value = Graph> {
    (2u32..30, 1u32..5).prop_flat_map(|(n, k)| {
        (
            proptest::collection::vec(0..k, n as usize),
            proptest::collection::vec((0..n, 0..n), 0..(3 * n as usize)),
        )
            .prop_map(|(colors, edges)| {
                let nodes: Vec<(NodeId, u32)> =
                    colors.into_iter().enumerate().map(|(i, c)| (i as NodeId, c)).collect();
                let edges: Vec<(NodeId, NodeId)> =
                    edges.into_iter().filter(|(a, b)| a != b).collect();
                Graph::from_edges(&nodes, &edges).unwrap()
            })
    })
}

fn arb_policy() -> impl Strategy<Value = NodeSelectionPolicy> {
    prop_oneof![
        Just(NodeSelectionPolicy::Local),
        Just(NodeSelectionPolicy::Random),
        Just(NodeSelectionPolicy::Hybrid),
    ]
}

fn is_distinct(ids: &[NodeId]) -> bool {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len() == ids.len()
}

proptest! {
    #[test]
    fn neighbor_samples_are_distinct_neighbors(g in arb_graph(), k in 1usize..6, seed: u64) {
        let mut rng = SeededRandom::new(seed);
        for &id in g.ids() {
            let neighbors = g.node(id).unwrap().neighbors();
            let sample = sample_neighbors(&g, id, k, &mut rng).unwrap();
            prop_assert_eq!(sample.len(), k.min(neighbors.len()));
            prop_assert!(is_distinct(&sample));
            prop_assert!(sample.iter().all(|n| neighbors.contains(n)));
            prop_assert!(!sample.contains(&id));
        }
    }

    #[test]
    fn uniform_samples_exclude_self(g in arb_graph(), k in 1usize..30, seed: u64) {
        let mut rng = SeededRandom::new(seed);
        let id = g.ids()[0];
        match sample_random(&g, id, k, &mut rng) {
            Ok(sample) => {
                prop_assert!(k < g.len());
                prop_assert_eq!(sample.len(), k);
                prop_assert!(is_distinct(&sample));
                prop_assert!(!sample.contains(&id));
                prop_assert!(sample.iter().all(|&n| g.contains(n)));
            }
            Err(_) => prop_assert!(k >= g.len()),
        }
    }

    #[test]
    fn runs_preserve_sizes_and_report_integral_cuts(
        g in arb_graph(),
        policy in arb_policy(),
        enhanced: bool,
        seed: u64,
    ) {
        let mut g = g;
        let config = builder()
            .with_rounds(4)
            .with_node_selection_policy(policy)
            .with_uniform_random_sample_size(1)
            .with_enhanced(enhanced)
            .build()
            .unwrap();
        let labels: Vec<u32> = g.nodes().map(|n| n.color()).collect();
        let sizes = partition_sizes(&g);
        let mut rng = SeededRandom::new(seed);
        let mut reports: Vec<RoundReport> = Vec::new();
        JabejaRunner::run(&mut g, &config, &mut rng, &mut reports).unwrap();

        prop_assert_eq!(partition_sizes(&g), sizes);
        prop_assert!(g.nodes().all(|n| labels.contains(&n.color())));
        let gray = gray_links(&g);
        prop_assert_eq!(gray % 2, 0);
        let metrics = measure(&g);
        prop_assert_eq!(metrics.edge_cut * 2, gray);
        prop_assert_eq!(reports.last().unwrap().edge_cut, metrics.edge_cut);
        prop_assert_eq!(
            metrics.migrations,
            g.nodes().filter(|n| n.color() != n.init_color()).count()
        );
    }

    #[test]
    fn standard_temperature_never_increases(initial in 1.0f64..10.0, delta in 0.0f64..2.0, rounds in 1usize..200) {
        let schedule = AnnealingSchedule::new(CoolingSchedule::Standard { initial, delta }, None);
        let mut state = schedule.initial_state();
        let mut prev = state.temperature.value();
        for round in 0..rounds {
            state.round = round;
            schedule.end_round(&mut state);
            let t = state.temperature.value();
            prop_assert!(t <= prev);
            prop_assert!(t >= 1.0);
            prev = t;
        }
    }

    #[test]
    fn enhanced_temperature_moves_only_on_period_boundaries(
        alpha in 0.05f64..0.95,
        min in 0.001f64..0.5,
        every in 1usize..10,
        rounds in 1usize..200,
    ) {
        let schedule = AnnealingSchedule::new(
            CoolingSchedule::Enhanced { initial: 1.0, min, alpha, every },
            None,
        );
        let mut state = schedule.initial_state();
        let mut prev = state.temperature.value();
        for round in 0..rounds {
            state.round = round;
            schedule.end_round(&mut state);
            let t = state.temperature.value();
            if round % every != every - 1 {
                prop_assert_eq!(t, prev);
            }
            prop_assert!(t <= prev);
            prop_assert!(t == 0.0 || t >= min);
            prop_assert!(matches!(state.temperature, Temperature::Enhanced(_)));
            prev = t;
        }
    }
}
