//! Arbor Structure Model
//!
//! Canonical representations of the structures a user builds before running
//! an algorithm over them.
//!
//! # Structures
//!
//! - [`BinaryTree`]: arena of nodes linked by left/right child ids
//! - [`BinarySearchTree`]: a binary tree whose shape follows insertion order
//!   and keeps the `left < node < right` invariant
//! - [`Graph`]: labelled nodes joined by undirected, optionally weighted edges
//! - [`TreeLayout`]: positioned nodes from which a binary tree shape is
//!   derived geometrically
//!
//! Every structure hands out [`NodeId`]s from a monotonic counter. Ids are
//! stable for the lifetime of a node and are only reused after `clear()`.

mod bst;
mod error;
mod graph;
mod id;
mod layout;
mod tree;

pub use bst::BinarySearchTree;
pub use error::{Error, Result};
pub use graph::{EdgeId, Graph, GraphEdge, GraphNode};
pub use id::NodeId;
pub use layout::{LayoutConfig, Position, PositionedNode, TreeLayout};
pub use tree::{BinaryTree, TreeNode};

/// Weight assumed for an unweighted edge by the unweighted traversals.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;
