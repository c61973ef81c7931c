//! Geometric tree-shape adapter.
//!
//! A [`TreeLayout`] holds freely placed nodes and derives a [`BinaryTree`]
//! from their coordinates:
//!
//! 1. Nodes are bucketed into levels on a fixed vertical grid.
//! 2. The first node (in insertion order) of the shallowest level is the root.
//! 3. Each node looks one level down for a left child inside
//!    `[min, parent.x)` and a right child inside `(parent.x, max]`, taking the
//!    horizontally nearest candidate. Children inherit the narrowed interval.
//!
//! The derivation is a best effort and ambiguous under coordinate ties; ties
//! go to the earlier candidate and a node is never assigned twice. Traversals
//! only ever see the derived links.

use std::collections::{BTreeMap, HashSet};

use tracing::trace;

use crate::error::{Error, Result};
use crate::id::IdAllocator;
use crate::{BinaryTree, NodeId};

/// A point on the layout canvas. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A node with a value and a canvas position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionedNode<V> {
    pub id: NodeId,
    pub value: V,
    pub position: Position,
}

/// Configuration for shape derivation.
#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig {
    /// Height of one level on the vertical grid.
    pub level_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { level_height: 50.0 }
    }
}

impl LayoutConfig {
    /// Set the level height.
    #[must_use]
    pub fn with_level_height(mut self, level_height: f64) -> Self {
        self.level_height = level_height;
        self
    }

    fn level_of(&self, y: f64) -> i64 {
        (y / self.level_height).round() as i64
    }
}

/// Freely positioned nodes from which a binary tree is derived.
#[derive(Debug, Clone)]
pub struct TreeLayout<V> {
    nodes: Vec<PositionedNode<V>>,
    config: LayoutConfig,
    ids: IdAllocator,
}

impl<V> Default for TreeLayout<V> {
    fn default() -> Self {
        Self::with_config(LayoutConfig::default())
    }
}

impl<V: Clone> TreeLayout<V> {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V> TreeLayout<V> {
    /// Create an empty layout with a custom grid.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            nodes: Vec::new(),
            config,
            ids: IdAllocator::default(),
        }
    }

    /// Where the n-th added node lands before the user moves it: one row
    /// along the top of the canvas.
    pub fn default_position(n: usize) -> Position {
        Position::new(n as f64 * 60.0 + 50.0, 50.0)
    }

    /// Add a node at `position`.
    pub fn add_node(&mut self, value: V, position: Position) -> NodeId {
        let id = self.ids.next();
        self.nodes.push(PositionedNode { id, value, position });
        id
    }

    /// Add a node at its default position.
    pub fn push(&mut self, value: V) -> NodeId {
        let position = Self::default_position(self.nodes.len());
        self.add_node(value, position)
    }

    /// Move a node.
    pub fn move_node(&mut self, id: NodeId, position: Position) -> Result<()> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(Error::UnknownNode(id))?;
        node.position = position;
        Ok(())
    }

    /// Remove a node.
    pub fn remove_node(&mut self, id: NodeId) -> Result<PositionedNode<V>> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or(Error::UnknownNode(id))?;
        Ok(self.nodes.remove(index))
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[PositionedNode<V>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove every node and restart id allocation.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.ids.reset();
    }
}

impl<V: Clone> TreeLayout<V> {
    /// Derive the binary tree implied by the current positions.
    ///
    /// Node ids carry over unchanged. Nodes that cannot be attached anywhere
    /// are left out of the tree.
    pub fn to_tree(&self) -> BinaryTree<V> {
        let mut tree = BinaryTree::new();

        let mut levels: BTreeMap<i64, Vec<&PositionedNode<V>>> = BTreeMap::new();
        for node in &self.nodes {
            levels
                .entry(self.config.level_of(node.position.y))
                .or_default()
                .push(node);
        }
        let levels: Vec<Vec<&PositionedNode<V>>> = levels.into_values().collect();

        let Some(root) = levels.first().and_then(|level| level.first()) else {
            return tree;
        };
        tree.insert_with_id(root.id, root.value.clone());
        tree.set_root(Some(root.id));

        let mut assigned: HashSet<NodeId> = HashSet::from([root.id]);
        // (node, x, index of the level its children live on, min, max)
        let mut work = vec![(root.id, root.position.x, 1usize, f64::NEG_INFINITY, f64::INFINITY)];

        while let Some((parent, x, level, min, max)) = work.pop() {
            let Some(candidates) = levels.get(level) else {
                continue;
            };

            let left = nearest(candidates, x, &assigned, |cx| cx < x && cx >= min);
            if let Some(child) = left {
                assigned.insert(child.id);
            }
            let right = nearest(candidates, x, &assigned, |cx| cx > x && cx <= max);
            if let Some(child) = right {
                assigned.insert(child.id);
            }

            // Right pushed first so the left subtree is resolved first.
            if let Some(child) = right {
                tree.insert_with_id(child.id, child.value.clone());
                tree.set_right(parent, Some(child.id));
                work.push((child.id, child.position.x, level + 1, x, max));
            }
            if let Some(child) = left {
                tree.insert_with_id(child.id, child.value.clone());
                tree.set_left(parent, Some(child.id));
                work.push((child.id, child.position.x, level + 1, min, x));
            }
        }

        trace!(
            placed = self.nodes.len(),
            attached = tree.len(),
            "derived tree from layout"
        );
        tree
    }
}

/// Nearest unassigned candidate to `x` accepted by `within`; earliest wins ties.
fn nearest<'a, V>(
    candidates: &[&'a PositionedNode<V>],
    x: f64,
    assigned: &HashSet<NodeId>,
    within: impl Fn(f64) -> bool,
) -> Option<&'a PositionedNode<V>> {
    let mut best: Option<&'a PositionedNode<V>> = None;
    for &candidate in candidates {
        let cx = candidate.position.x;
        if assigned.contains(&candidate.id) || !within(cx) {
            continue;
        }
        let closer = match best {
            None => true,
            Some(current) => (cx - x).abs() < (current.position.x - x).abs(),
        };
        if closer {
            best = Some(candidate);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ```text
    ///         5
    ///       /   \
    ///      3     8
    ///     / \
    ///    1   4
    /// ```
    fn sample() -> TreeLayout<i64> {
        let mut layout = TreeLayout::new();
        layout.add_node(5, Position::new(200.0, 50.0));
        layout.add_node(3, Position::new(100.0, 100.0));
        layout.add_node(8, Position::new(300.0, 100.0));
        layout.add_node(1, Position::new(50.0, 150.0));
        layout.add_node(4, Position::new(150.0, 150.0));
        layout
    }

    #[test]
    fn empty_layout_has_no_root() {
        let layout: TreeLayout<i64> = TreeLayout::new();
        assert_eq!(layout.to_tree().root(), None);
    }

    #[test]
    fn derives_expected_shape() {
        let tree = sample().to_tree();
        let root = tree.node(tree.root().unwrap()).unwrap();
        assert_eq!(root.value, 5);
        assert_eq!(root.left, Some(NodeId(1)));
        assert_eq!(root.right, Some(NodeId(2)));

        let three = tree.node(NodeId(1)).unwrap();
        assert_eq!(three.left, Some(NodeId(3)));
        assert_eq!(three.right, Some(NodeId(4)));
        assert!(tree.node(NodeId(2)).unwrap().is_leaf());
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn positions_snap_to_grid() {
        let mut layout = TreeLayout::new();
        layout.add_node(1, Position::new(100.0, 48.0));
        layout.add_node(2, Position::new(60.0, 104.0));
        let tree = layout.to_tree();
        assert_eq!(tree.node(NodeId(0)).unwrap().left, Some(NodeId(1)));
    }

    #[test]
    fn child_must_respect_inherited_interval() {
        let mut layout = TreeLayout::new();
        layout.add_node(10, Position::new(200.0, 50.0));
        layout.add_node(5, Position::new(100.0, 100.0));
        // Right of the root, so out of range for the left subtree.
        layout.add_node(7, Position::new(250.0, 150.0));
        let tree = layout.to_tree();
        assert!(tree.node(NodeId(1)).unwrap().is_leaf());
        assert!(!tree.contains(NodeId(2)));
    }

    #[test]
    fn nearest_candidate_wins() {
        let mut layout = TreeLayout::new();
        layout.add_node(0, Position::new(200.0, 50.0));
        layout.add_node(1, Position::new(20.0, 100.0));
        layout.add_node(2, Position::new(150.0, 100.0));
        let tree = layout.to_tree();
        assert_eq!(tree.node(NodeId(0)).unwrap().left, Some(NodeId(2)));
    }

    #[test]
    fn sparse_levels_still_adjacent() {
        let mut layout = TreeLayout::new();
        layout.add_node(0, Position::new(200.0, 50.0));
        layout.add_node(1, Position::new(100.0, 200.0));
        // The second bucket is still the next level, however far down it is.
        let tree = layout.to_tree();
        assert_eq!(tree.node(NodeId(0)).unwrap().left, Some(NodeId(1)));
    }

    #[test]
    fn move_and_remove() {
        let mut layout = sample();
        layout.move_node(NodeId(2), Position::new(120.0, 150.0)).unwrap();
        assert_eq!(layout.nodes()[2].position, Position::new(120.0, 150.0));
        assert_eq!(layout.remove_node(NodeId(4)).unwrap().value, 4);
        assert_eq!(
            layout.move_node(NodeId(4), Position::default()),
            Err(Error::UnknownNode(NodeId(4)))
        );
    }

    #[test]
    fn default_positions_form_a_row() {
        let mut layout = TreeLayout::new();
        layout.push(1);
        layout.push(2);
        assert_eq!(layout.nodes()[1].position, Position::new(110.0, 50.0));
        // Every node on one level: only the root is attached.
        assert_eq!(layout.to_tree().len(), 1);
    }
}
