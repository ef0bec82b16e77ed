//! Graph model and its collaborators.
//!
//! - [`Graph`] / [`Node`]: fixed topology, mutable colors.
//! - [`parse_metis`] / [`load_metis`]: adjacency from METIS text.
//! - [`color_graph`]: initial partition labels by [`InitColorPolicy`].

mod init;
mod loader;
mod types;

pub use init::{color_graph, InitColorPolicy};
pub use loader::{load_metis, parse_metis};
pub use types::{Adjacency, Color, Graph, Node, NodeId};
