//! The fixed set of algorithms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which kind of structure an algorithm runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    Tree,
    Graph,
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureKind::Tree => f.write_str("tree"),
            StructureKind::Graph => f.write_str("graph"),
        }
    }
}

/// A traversal or search algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Left, node, right
    InOrder,
    /// Node, left, right
    PreOrder,
    /// Left, right, node
    PostOrder,
    /// Breadth-first over tree levels
    LevelOrder,
    /// Breadth-first graph search
    Bfs,
    /// Depth-first graph search
    Dfs,
    /// Dijkstra shortest path
    Dijkstra,
}

impl Algorithm {
    /// Every algorithm, tree traversals first.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::InOrder,
        Algorithm::PreOrder,
        Algorithm::PostOrder,
        Algorithm::LevelOrder,
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
    ];

    /// Canonical name, as accepted by [`FromStr`].
    pub const fn name(&self) -> &'static str {
        match self {
            Algorithm::InOrder => "inorder",
            Algorithm::PreOrder => "preorder",
            Algorithm::PostOrder => "postorder",
            Algorithm::LevelOrder => "levelorder",
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
        }
    }

    /// The structure this algorithm runs over.
    pub const fn structure(&self) -> StructureKind {
        match self {
            Algorithm::InOrder
            | Algorithm::PreOrder
            | Algorithm::PostOrder
            | Algorithm::LevelOrder => StructureKind::Tree,
            Algorithm::Bfs | Algorithm::Dfs | Algorithm::Dijkstra => StructureKind::Graph,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Parse a name such as `"inorder"`, `"In-Order"` or `"level_order"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == normalized)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}
