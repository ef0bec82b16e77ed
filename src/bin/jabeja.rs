//! Command-line driver: load a METIS graph, color it, run Ja-be-Ja and
//! write the per-round report file.
//!
//! Logging goes to stderr; set `RUST_LOG=info` to see every round.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use u_jabeja::graph::{color_graph, load_metis, InitColorPolicy};
use u_jabeja::jabeja::{JabejaRunner, NodeSelectionPolicy, RunConfig};
use u_jabeja::random::SeededRandom;
use u_jabeja::report::{partition_sizes, FileSink};

#[derive(Parser, Debug)]
#[command(
    name = "jabeja",
    version,
    about = "Balanced graph partitioning by decentralized color swaps"
)]
struct Args {
    /// Graph file in METIS adjacency format.
    #[arg(long, default_value = "./graphs/ws-250.graph")]
    graph: PathBuf,

    /// Directory for the report file.
    #[arg(long, default_value = "./output")]
    output_dir: PathBuf,

    /// Number of partitions.
    #[arg(long, default_value_t = 4)]
    partitions: u32,

    /// Number of rounds.
    #[arg(long, default_value_t = 1000)]
    rounds: usize,

    /// Neighbors sampled per node under the local policy.
    #[arg(long, default_value_t = 3)]
    close_by_neighbors: usize,

    /// Nodes drawn from the whole graph under the random policy.
    #[arg(long, default_value_t = 6)]
    uniform_random_sample_size: usize,

    /// Initial standard temperature.
    #[arg(long, default_value_t = 2.0)]
    temp: f64,

    /// Standard cooling step per round.
    #[arg(long, default_value_t = 0.003)]
    delta: f64,

    /// Seed of the random source.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Exponent of the degree-based cost function.
    #[arg(long, default_value_t = 2.0)]
    alpha: f64,

    /// Initial coloring: ROUND_ROBIN, RANDOM or BATCH.
    #[arg(long, default_value = "ROUND_ROBIN")]
    graph_init_color_policy: InitColorPolicy,

    /// Partner selection: LOCAL, RANDOM or HYBRID.
    #[arg(long, default_value = "HYBRID")]
    node_selection_policy: NodeSelectionPolicy,

    /// Reheat once the temperature has stayed frozen for a while.
    #[arg(long)]
    restart: bool,

    /// Frozen rounds before a reheat.
    #[arg(long, default_value_t = 400)]
    restart_interval: usize,

    /// Use the geometric schedule with probabilistic acceptance.
    #[arg(long)]
    enhanced: bool,

    /// Initial enhanced temperature.
    #[arg(long, default_value_t = 1.0)]
    temp_enh: f64,

    /// Enhanced temperature below which the run freezes.
    #[arg(long, default_value_t = 0.00001)]
    min_temp_enh: f64,

    /// Enhanced cooling factor.
    #[arg(long, default_value_t = 0.9)]
    alpha_enh: f64,

    /// Rounds between enhanced cooling steps.
    #[arg(long, default_value_t = 10)]
    iter_enh: usize,
}

impl Args {
    fn into_config(self) -> u_jabeja::error::Result<RunConfig> {
        RunConfig::builder()
            .with_num_partitions(self.partitions)
            .with_rounds(self.rounds)
            .with_random_neighbor_sample_size(self.close_by_neighbors)
            .with_temperature(self.temp)
            .with_delta(self.delta)
            .with_seed(self.seed)
            .with_uniform_random_sample_size(self.uniform_random_sample_size)
            .with_graph_file_path(self.graph)
            .with_output_dir(self.output_dir)
            .with_init_color_policy(self.graph_init_color_policy)
            .with_node_selection_policy(self.node_selection_policy)
            .with_alpha(self.alpha)
            .with_restart(self.restart)
            .with_restart_interval(self.restart_interval)
            .with_enhanced(self.enhanced)
            .with_temp_enh(self.temp_enh)
            .with_min_temp_enh(self.min_temp_enh)
            .with_alpha_enh(self.alpha_enh)
            .with_iter_enh(self.iter_enh)
            .build()
    }
}

fn run(args: Args) -> u_jabeja::error::Result<()> {
    let config = args.into_config()?;
    let mut rng = SeededRandom::new(config.seed());

    let adjacency = load_metis(config.graph_file_path())?;
    let mut graph = color_graph(
        adjacency,
        config.init_color_policy(),
        config.num_partitions(),
        &mut rng,
    )?;
    info!(
        "loaded {} ({} nodes, {} edges), partition sizes {:?}",
        config.graph_file_path().display(),
        graph.len(),
        graph.edge_count(),
        partition_sizes(&graph)
    );

    let sink = FileSink::for_config(&config)?;
    let report_path = sink.path().to_path_buf();
    let result = JabejaRunner::run(&mut graph, &config, &mut rng, sink)?;

    println!(
        "edge cut: {}, swaps: {}, migrations: {}, restarts: {}",
        result.edge_cut, result.swap_count, result.migrations, result.restarts
    );
    println!("report: {}", report_path.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("jabeja: {e}");
            ExitCode::FAILURE
        }
    }
}
