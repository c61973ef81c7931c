//! Error types for arbor-structures.

use thiserror::Error;

use crate::{EdgeId, NodeId};

/// Result type for structure mutations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while mutating a structure.
///
/// A mutation that fails leaves the structure exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The key is already present in the binary search tree.
    #[error("duplicate value {0} in binary search tree")]
    DuplicateValue(String),

    /// The key is not present in the binary search tree.
    #[error("value {0} not found in binary search tree")]
    NotFound(String),

    /// No node with this id exists.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// An edge may not join a node to itself.
    #[error("self-loop on node {0} is not allowed")]
    SelfLoop(NodeId),

    /// An edge between these endpoints already exists.
    #[error("edge {0} already exists")]
    DuplicateEdge(EdgeId),

    /// Edge weights must be finite numbers.
    #[error("edge {edge} has non-finite weight {weight}")]
    NonFiniteWeight { edge: EdgeId, weight: f64 },
}
