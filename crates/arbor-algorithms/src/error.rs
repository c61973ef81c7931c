//! Error types for arbor-algorithms.

use arbor_structures::{EdgeId, NodeId};
use thiserror::Error;

/// Result type for algorithm runs.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors an algorithm can report.
///
/// Algorithms are total over validated input, so every error is a property
/// of the input rather than a transient failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Shortest-path search needs a non-negative weight on every edge.
    #[error("edge {edge} has invalid weight {weight:?}")]
    InvalidWeight { edge: EdgeId, weight: Option<f64> },

    /// The target is not reachable from the start.
    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },

    /// The start node does not exist.
    #[error("invalid start node {0}")]
    InvalidStart(NodeId),

    /// The target node does not exist.
    #[error("unknown target node {0}")]
    UnknownTarget(NodeId),

    /// The algorithm name is not recognised.
    #[error("unknown algorithm {0:?}")]
    UnknownAlgorithm(String),
}
