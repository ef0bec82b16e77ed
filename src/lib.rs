//! Ja-be-Ja graph re-partitioning.
//!
//! Reduces the edge-cut of a partitioned graph through local, pairwise color
//! swaps driven by simulated annealing, emulating a decentralized protocol
//! in which each node only samples its neighbors or a random subset of the
//! graph.
//!
//! - [`graph`]: node/edge storage, METIS loading, initial coloring.
//! - [`random`]: the injectable, seedable random source.
//! - [`jabeja`]: sampling, partner evaluation, annealing schedule, swaps and
//!   the round loop.
//! - [`report`]: per-round edge-cut/migration metrics and report sinks.
//!
//! # Example
//!
//! ```no_run
//! use u_jabeja::graph::{color_graph, load_metis, InitColorPolicy};
//! use u_jabeja::jabeja::{JabejaRunner, NodeSelectionPolicy, RunConfig};
//! use u_jabeja::random::SeededRandom;
//! use u_jabeja::report::FileSink;
//!
//! # fn main() -> u_jabeja::error::Result<()> {
//! let config = RunConfig::builder()
//!     .with_num_partitions(4)
//!     .with_rounds(1000)
//!     .with_graph_file_path("graphs/3elt.graph")
//!     .with_output_dir("output")
//!     .with_init_color_policy(InitColorPolicy::RoundRobin)
//!     .with_node_selection_policy(NodeSelectionPolicy::Hybrid)
//! #   .with_random_neighbor_sample_size(3)
//! #   .with_temperature(2.0)
//! #   .with_delta(0.003)
//! #   .with_seed(0)
//! #   .with_uniform_random_sample_size(6)
//! #   .with_alpha(2.0)
//! #   .with_restart(false)
//! #   .with_restart_interval(400)
//! #   .with_enhanced(false)
//! #   .with_temp_enh(1.0)
//! #   .with_min_temp_enh(0.00001)
//! #   .with_alpha_enh(0.9)
//! #   .with_iter_enh(10)
//!     .build()?;
//! let mut rng = SeededRandom::new(config.seed());
//! let adjacency = load_metis(config.graph_file_path())?;
//! let mut graph = color_graph(
//!     adjacency,
//!     config.init_color_policy(),
//!     config.num_partitions(),
//!     &mut rng,
//! )?;
//! let sink = FileSink::for_config(&config)?;
//! let result = JabejaRunner::run(&mut graph, &config, &mut rng, sink)?;
//! println!("edge cut: {}", result.edge_cut);
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `serde`: (de)serialization of configuration, reports and results.
//! - `parallel`: metric recounts run on rayon.

pub mod error;
pub mod graph;
pub mod jabeja;
pub mod random;
pub mod report;
