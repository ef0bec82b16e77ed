//! Run configuration and selection/cooling policies.
//!
//! [`RunConfig`] is immutable and only obtainable through
//! [`RunConfigBuilder::build`], which rejects missing or unusable options
//! before any round runs.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{JabejaError, Result};
use crate::graph::InitColorPolicy;

/// Where a node looks for swap partners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum NodeSelectionPolicy {
    /// A bounded sample of the node's direct neighbors.
    Local,
    /// A uniform sample of the whole graph.
    Random,
    /// Neighbors first; the uniform sample only if no neighbor is accepted.
    #[default]
    Hybrid,
}

impl NodeSelectionPolicy {
    /// Whether the policy may draw a graph-wide uniform sample.
    pub fn samples_graph(self) -> bool {
        matches!(self, NodeSelectionPolicy::Random | NodeSelectionPolicy::Hybrid)
    }
}

impl fmt::Display for NodeSelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeSelectionPolicy::Local => "LOCAL",
            NodeSelectionPolicy::Random => "RANDOM",
            NodeSelectionPolicy::Hybrid => "HYBRID",
        })
    }
}

impl FromStr for NodeSelectionPolicy {
    type Err = JabejaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "LOCAL" => Ok(NodeSelectionPolicy::Local),
            "RANDOM" => Ok(NodeSelectionPolicy::Random),
            "HYBRID" => Ok(NodeSelectionPolicy::Hybrid),
            other => Err(JabejaError::invalid(format!(
                "unknown node selection policy {other:?}"
            ))),
        }
    }
}

/// Temperature schedule derived from a [`RunConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoolingSchedule {
    /// Linear decrease by `delta` per round, floored at 1.
    ///
    /// Acceptance is deterministic: `new * T > old`.
    Standard {
        /// Temperature at round 0 and after a reheat.
        initial: f64,
        /// Amount subtracted after every round.
        delta: f64,
    },

    /// Geometric decrease by `alpha` every `every` rounds, clamped to 0
    /// once it drops below `min`.
    ///
    /// Acceptance is probabilistic: `exp((new - old) / T) > r`.
    Enhanced {
        /// Temperature at round 0 and after a reheat.
        initial: f64,
        /// Threshold below which the temperature freezes at 0.
        min: f64,
        /// Cooling factor in (0, 1).
        alpha: f64,
        /// Cooling period in rounds.
        every: usize,
    },
}

/// Validated, immutable run configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunConfig {
    num_partitions: u32,
    rounds: usize,
    random_neighbor_sample_size: usize,
    temperature: f64,
    delta: f64,
    seed: u64,
    uniform_random_sample_size: usize,
    graph_file_path: PathBuf,
    output_dir: PathBuf,
    init_color_policy: InitColorPolicy,
    node_selection_policy: NodeSelectionPolicy,
    alpha: f64,
    restart: bool,
    restart_interval: usize,
    enhanced: bool,
    temp_enh: f64,
    min_temp_enh: f64,
    alpha_enh: f64,
    iter_enh: usize,
}

impl RunConfig {
    /// Starts an empty builder.
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// Number of partition labels.
    pub fn num_partitions(&self) -> u32 {
        self.num_partitions
    }

    /// Number of rounds to run. The run never stops early.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Maximum neighbors considered under the local policy.
    pub fn random_neighbor_sample_size(&self) -> usize {
        self.random_neighbor_sample_size
    }

    /// Initial standard temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Standard cooling step.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Size of the graph-wide uniform sample.
    pub fn uniform_random_sample_size(&self) -> usize {
        self.uniform_random_sample_size
    }

    pub fn graph_file_path(&self) -> &Path {
        &self.graph_file_path
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn init_color_policy(&self) -> InitColorPolicy {
        self.init_color_policy
    }

    pub fn node_selection_policy(&self) -> NodeSelectionPolicy {
        self.node_selection_policy
    }

    /// Exponent applied to each degree in the local cost function.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Whether frozen runs are reheated.
    pub fn restart(&self) -> bool {
        self.restart
    }

    /// Frozen rounds before a reheat.
    pub fn restart_interval(&self) -> usize {
        self.restart_interval
    }

    /// Whether the enhanced (geometric, probabilistic) schedule is used.
    pub fn enhanced(&self) -> bool {
        self.enhanced
    }

    pub fn temp_enh(&self) -> f64 {
        self.temp_enh
    }

    pub fn min_temp_enh(&self) -> f64 {
        self.min_temp_enh
    }

    pub fn alpha_enh(&self) -> f64 {
        self.alpha_enh
    }

    pub fn iter_enh(&self) -> usize {
        self.iter_enh
    }

    /// The active temperature schedule.
    pub fn cooling(&self) -> CoolingSchedule {
        if self.enhanced {
            CoolingSchedule::Enhanced {
                initial: self.temp_enh,
                min: self.min_temp_enh,
                alpha: self.alpha_enh,
                every: self.iter_enh,
            }
        } else {
            CoolingSchedule::Standard {
                initial: self.temperature,
                delta: self.delta,
            }
        }
    }

    /// Reheat interval, if restarts are enabled.
    pub fn restart_policy(&self) -> Option<usize> {
        self.restart.then_some(self.restart_interval)
    }

    fn validate(&self) -> Result<()> {
        if self.num_partitions == 0 {
            return Err(JabejaError::invalid("num_partitions must be at least 1"));
        }
        if self.random_neighbor_sample_size == 0 {
            return Err(JabejaError::invalid(
                "random_neighbor_sample_size must be at least 1",
            ));
        }
        if self.uniform_random_sample_size == 0 {
            return Err(JabejaError::invalid(
                "uniform_random_sample_size must be at least 1",
            ));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(JabejaError::invalid(format!(
                "alpha must be a non-negative number, got {}",
                self.alpha
            )));
        }
        if self.restart && self.restart_interval == 0 {
            return Err(JabejaError::invalid(
                "restart_interval must be at least 1 when restart is enabled",
            ));
        }
        match self.cooling() {
            CoolingSchedule::Standard { initial, delta } => {
                if !initial.is_finite() || initial < 1.0 {
                    return Err(JabejaError::invalid(format!(
                        "temperature must be at least 1, got {initial}"
                    )));
                }
                if !delta.is_finite() || delta < 0.0 {
                    return Err(JabejaError::invalid(format!(
                        "delta must be non-negative, got {delta}"
                    )));
                }
            }
            CoolingSchedule::Enhanced {
                initial,
                min,
                alpha,
                every,
            } => {
                if !(min > 0.0 && min < initial && initial.is_finite()) {
                    return Err(JabejaError::invalid(format!(
                        "need 0 < min_temp_enh < temp_enh, got {min} and {initial}"
                    )));
                }
                if alpha <= 0.0 || alpha >= 1.0 {
                    return Err(JabejaError::invalid(format!(
                        "alpha_enh must be in (0, 1), got {alpha}"
                    )));
                }
                if every == 0 {
                    return Err(JabejaError::invalid("iter_enh must be at least 1"));
                }
            }
        }
        Ok(())
    }
}

/// Collects options for a [`RunConfig`]. Every option is required.
///
/// # Examples
///
/// ```
/// use u_jabeja::graph::InitColorPolicy;
/// use u_jabeja::jabeja::{NodeSelectionPolicy, RunConfig};
///
/// let config = RunConfig::builder()
///     .with_num_partitions(4)
///     .with_rounds(100)
///     .with_random_neighbor_sample_size(3)
///     .with_temperature(2.0)
///     .with_delta(0.003)
///     .with_seed(0)
///     .with_uniform_random_sample_size(6)
///     .with_graph_file_path("graphs/3elt.graph")
///     .with_output_dir("output")
///     .with_init_color_policy(InitColorPolicy::RoundRobin)
///     .with_node_selection_policy(NodeSelectionPolicy::Hybrid)
///     .with_alpha(2.0)
///     .with_restart(false)
///     .with_restart_interval(100)
///     .with_enhanced(false)
///     .with_temp_enh(1.0)
///     .with_min_temp_enh(0.00001)
///     .with_alpha_enh(0.9)
///     .with_iter_enh(10)
///     .build()
///     .unwrap();
/// assert_eq!(config.rounds(), 100);
///
/// assert!(RunConfig::builder().with_rounds(10).build().is_err());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct RunConfigBuilder {
    num_partitions: Option<u32>,
    rounds: Option<usize>,
    random_neighbor_sample_size: Option<usize>,
    temperature: Option<f64>,
    delta: Option<f64>,
    seed: Option<u64>,
    uniform_random_sample_size: Option<usize>,
    graph_file_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    init_color_policy: Option<InitColorPolicy>,
    node_selection_policy: Option<NodeSelectionPolicy>,
    alpha: Option<f64>,
    restart: Option<bool>,
    restart_interval: Option<usize>,
    enhanced: Option<bool>,
    temp_enh: Option<f64>,
    min_temp_enh: Option<f64>,
    alpha_enh: Option<f64>,
    iter_enh: Option<usize>,
}

impl RunConfigBuilder {
    pub fn with_num_partitions(mut self, n: u32) -> Self {
        self.num_partitions = Some(n);
        self
    }

    pub fn with_rounds(mut self, n: usize) -> Self {
        self.rounds = Some(n);
        self
    }

    pub fn with_random_neighbor_sample_size(mut self, n: usize) -> Self {
        self.random_neighbor_sample_size = Some(n);
        self
    }

    /// Initial standard temperature. Must be at least 1, the floor that
    /// standard cooling clamps to; values below it fail in
    /// [`build`](Self::build) instead of being raised after round 0.
    pub fn with_temperature(mut self, t: f64) -> Self {
        self.temperature = Some(t);
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = Some(delta);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_uniform_random_sample_size(mut self, n: usize) -> Self {
        self.uniform_random_sample_size = Some(n);
        self
    }

    pub fn with_graph_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.graph_file_path = Some(path.into());
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_init_color_policy(mut self, policy: InitColorPolicy) -> Self {
        self.init_color_policy = Some(policy);
        self
    }

    pub fn with_node_selection_policy(mut self, policy: NodeSelectionPolicy) -> Self {
        self.node_selection_policy = Some(policy);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_restart(mut self, restart: bool) -> Self {
        self.restart = Some(restart);
        self
    }

    pub fn with_restart_interval(mut self, n: usize) -> Self {
        self.restart_interval = Some(n);
        self
    }

    pub fn with_enhanced(mut self, enhanced: bool) -> Self {
        self.enhanced = Some(enhanced);
        self
    }

    pub fn with_temp_enh(mut self, t: f64) -> Self {
        self.temp_enh = Some(t);
        self
    }

    pub fn with_min_temp_enh(mut self, t: f64) -> Self {
        self.min_temp_enh = Some(t);
        self
    }

    pub fn with_alpha_enh(mut self, alpha: f64) -> Self {
        self.alpha_enh = Some(alpha);
        self
    }

    pub fn with_iter_enh(mut self, n: usize) -> Self {
        self.iter_enh = Some(n);
        self
    }

    /// Checks that every option is present and usable.
    pub fn build(self) -> Result<RunConfig> {
        let config = RunConfig {
            num_partitions: require(self.num_partitions, "num_partitions")?,
            rounds: require(self.rounds, "rounds")?,
            random_neighbor_sample_size: require(
                self.random_neighbor_sample_size,
                "random_neighbor_sample_size",
            )?,
            temperature: require(self.temperature, "temperature")?,
            delta: require(self.delta, "delta")?,
            seed: require(self.seed, "seed")?,
            uniform_random_sample_size: require(
                self.uniform_random_sample_size,
                "uniform_random_sample_size",
            )?,
            graph_file_path: require(self.graph_file_path, "graph_file_path")?,
            output_dir: require(self.output_dir, "output_dir")?,
            init_color_policy: require(self.init_color_policy, "init_color_policy")?,
            node_selection_policy: require(self.node_selection_policy, "node_selection_policy")?,
            alpha: require(self.alpha, "alpha")?,
            restart: require(self.restart, "restart")?,
            restart_interval: require(self.restart_interval, "restart_interval")?,
            enhanced: require(self.enhanced, "enhanced")?,
            temp_enh: require(self.temp_enh, "temp_enh")?,
            min_temp_enh: require(self.min_temp_enh, "min_temp_enh")?,
            alpha_enh: require(self.alpha_enh, "alpha_enh")?,
            iter_enh: require(self.iter_enh, "iter_enh")?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn require<T>(value: Option<T>, name: &'static str) -> Result<T> {
    value.ok_or(JabejaError::MissingOption(name))
}
