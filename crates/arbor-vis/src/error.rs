//! Error types for arbor-vis.

use arbor_algorithms::{Algorithm, StructureKind};
use thiserror::Error;

/// Result type for session and playback operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the caller of a session or sequencer operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A structure mutation was rejected.
    #[error(transparent)]
    Structure(#[from] arbor_structures::Error),

    /// The algorithm could not produce a sequence.
    #[error(transparent)]
    Algorithm(#[from] arbor_algorithms::Error),

    /// The structure may not change while a run is in flight.
    #[error("structure cannot be modified while a sequence is running")]
    ConcurrentMutation,

    /// Only one sequence may run at a time; the new one was rejected.
    #[error("a sequence is already running")]
    AlreadyRunning,

    /// The algorithm does not apply to this kind of structure.
    #[error("{algorithm} cannot run on a {structure}")]
    UnsupportedAlgorithm {
        algorithm: Algorithm,
        structure: StructureKind,
    },

    /// The algorithm needs an end node and none was given.
    #[error("{0} requires a target node")]
    MissingTarget(Algorithm),

    /// A run was requested against a structure with no nodes.
    #[error("cannot start a run on an empty {0}")]
    EmptyStructure(StructureKind),
}
