//! Ja-be-Ja: decentralized balanced graph partitioning.
//!
//! Every node repeatedly looks for a partner, either among its neighbors or
//! in a small uniform sample of the graph, and swaps colors with it when
//! the swap increases the number of same-colored neighbors of both nodes.
//! Swaps never change partition sizes, so a balanced initial coloring stays
//! balanced. Simulated annealing lets early rounds accept slightly worse
//! swaps to escape local optima.
//!
//! # References
//!
//! - Rahimian et al. (2013), "JA-BE-JA: A Distributed Algorithm for Balanced
//!   Graph Partitioning", IEEE SASO.
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

pub(crate) mod config;
mod evaluator;
mod runner;
mod sampler;
mod schedule;
mod swap;

pub use config::{CoolingSchedule, NodeSelectionPolicy, RunConfig, RunConfigBuilder};
pub use evaluator::{accept, degree, PartnerEvaluator};
pub use runner::{JabejaResult, JabejaRunner};
pub use sampler::{sample_neighbors, sample_random};
pub use schedule::{AnnealingSchedule, RunState, Temperature};
pub use swap::SwapExecutor;
