//! Error type shared by every fallible operation in the crate.

use crate::graph::NodeId;
use thiserror::Error;

/// Errors raised while configuring, loading or running a Ja-be-Ja job.
///
/// Nothing in the annealing loop itself fails: a node that finds no
/// partner simply keeps its color. Every variant here is either an input
/// problem surfaced before round 0 or an I/O failure at the report sink.
#[derive(Error, Debug)]
pub enum JabejaError {
    /// A required configuration option was never set.
    #[error("missing configuration option: {0}")]
    MissingOption(&'static str),

    /// A configuration option was set to an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// More distinct ids were requested than the population can supply.
    #[error("cannot sample {requested} distinct nodes, only {available} available")]
    SampleTooLarge { requested: usize, available: usize },

    /// A node id was referenced but is not part of the graph.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// `from` lists `to` as a neighbor but not the other way around.
    #[error("asymmetric edge: {from} lists {to} but {to} does not list {from}")]
    AsymmetricEdge { from: NodeId, to: NodeId },

    /// The same node id was supplied twice.
    #[error("duplicate node {0}")]
    DuplicateNode(NodeId),

    /// A node lists itself as a neighbor.
    #[error("node {0} is its own neighbor")]
    SelfLoop(NodeId),

    /// A graph file could not be parsed.
    #[error("graph format error at line {line}: {message}")]
    GraphFormat { line: usize, message: String },

    /// I/O failure while reading a graph or writing a report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl JabejaError {
    /// Creates an invalid-configuration error.
    pub fn invalid(message: impl Into<String>) -> Self {
        JabejaError::InvalidConfig(message.into())
    }

    /// Creates a graph-format error at a 1-based line number.
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        JabejaError::GraphFormat {
            line,
            message: message.into(),
        }
    }
}

/// Shorthand for results carrying a [`JabejaError`].
pub type Result<T> = std::result::Result<T, JabejaError>;
