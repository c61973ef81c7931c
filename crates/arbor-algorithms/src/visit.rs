//! Visitation events.

use arbor_structures::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};

/// One step of algorithm progress.
///
/// A visit means nothing on its own; its position in the emitted sequence
/// is what a renderer animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Visit {
    pub node: NodeId,
    /// Edge the node was reached through (graphs only; `None` for the start).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<EdgeId>,
}

impl Visit {
    /// A visit with no incoming edge.
    pub const fn node(node: NodeId) -> Self {
        Self { node, edge: None }
    }

    /// A visit reached through `edge`.
    pub const fn via(node: NodeId, edge: EdgeId) -> Self {
        Self {
            node,
            edge: Some(edge),
        }
    }
}

/// Project a visit sequence onto its node ids.
pub fn node_ids(visits: &[Visit]) -> Vec<NodeId> {
    visits.iter().map(|v| v.node).collect()
}
