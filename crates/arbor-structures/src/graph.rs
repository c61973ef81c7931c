//! Weighted undirected graph.
//!
//! Edges are keyed by an [`EdgeId`] built from the unordered endpoint pair,
//! so `(a, b)` and `(b, a)` name the same edge and can never both exist.
//! Adjacency lists keep edge insertion order, which makes every traversal
//! over the graph deterministic.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};
use crate::id::IdAllocator;
use crate::NodeId;

/// Canonical identifier of an undirected edge.
///
/// The smaller endpoint is always stored first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId {
    low: NodeId,
    high: NodeId,
}

impl EdgeId {
    /// Build the id of the edge joining `a` and `b`, in either order.
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Both endpoints, smaller id first.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.low, self.high)
    }

    /// Whether `node` is one of the endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.low == node || self.high == node
    }

    /// The endpoint opposite `node`, if `node` is an endpoint.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.low {
            Some(self.high)
        } else if node == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// A labelled graph node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
}

/// An undirected edge with an optional weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphEdge {
    pub id: EdgeId,
    /// Endpoint as supplied when the edge was added.
    pub from: NodeId,
    /// Endpoint as supplied when the edge was added.
    pub to: NodeId,
    pub weight: Option<f64>,
}

impl GraphEdge {
    /// Weight, or [`DEFAULT_EDGE_WEIGHT`](crate::DEFAULT_EDGE_WEIGHT) when unset.
    pub fn weight_or_default(&self) -> f64 {
        self.weight.unwrap_or(crate::DEFAULT_EDGE_WEIGHT)
    }
}

/// A weighted undirected graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    // NodeIds are monotonic, so key order is insertion order.
    nodes: BTreeMap<NodeId, GraphNode>,
    edges: HashMap<EdgeId, GraphEdge>,
    adjacency: HashMap<NodeId, Vec<EdgeId>>,
    edge_order: Vec<EdgeId>,
    ids: IdAllocator,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with the given label.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let id = self.ids.next();
        let label = label.into();
        debug!(node = %id, %label, "graph add node");
        self.nodes.insert(id, GraphNode { id, label });
        self.adjacency.insert(id, Vec::new());
        id
    }

    /// Join two existing nodes with an undirected edge.
    ///
    /// Rejects unknown endpoints, self-loops, a second edge between the same
    /// pair (in either order) and non-finite weights.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: Option<f64>) -> Result<EdgeId> {
        for endpoint in [from, to] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(Error::UnknownNode(endpoint));
            }
        }
        if from == to {
            return Err(Error::SelfLoop(from));
        }

        let id = EdgeId::new(from, to);
        if self.edges.contains_key(&id) {
            return Err(Error::DuplicateEdge(id));
        }
        if let Some(weight) = weight.filter(|w| !w.is_finite()) {
            return Err(Error::NonFiniteWeight { edge: id, weight });
        }

        debug!(edge = %id, ?weight, "graph add edge");
        self.edges.insert(id, GraphEdge { id, from, to, weight });
        self.edge_order.push(id);
        for endpoint in [from, to] {
            self.adjacency.entry(endpoint).or_default().push(id);
        }
        Ok(id)
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Get an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&GraphEdge> {
        self.edges.get(&id)
    }

    /// Find the edge joining `a` and `b`, in either order.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&GraphEdge> {
        self.edges.get(&EdgeId::new(a, b))
    }

    /// Neighbors of `id` with the connecting edge, in edge insertion order.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &GraphEdge)> + '_ {
        self.adjacency
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(move |edge_id| {
                let edge = self.edges.get(edge_id)?;
                Some((edge_id.other(id)?, edge))
            })
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edge_order.iter().filter_map(|id| self.edges.get(id))
    }

    /// The first node ever added (and still present).
    pub fn first_node(&self) -> Option<NodeId> {
        self.nodes.keys().next().copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove every node and edge and restart id allocation.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.adjacency.clear();
        self.edge_order.clear();
        self.ids.reset();
    }
}
