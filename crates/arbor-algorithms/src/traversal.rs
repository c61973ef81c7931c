//! Binary tree traversals.
//!
//! All four orders use an explicit stack or queue, so a fully skewed tree of
//! any depth is fine. Each call builds its own visited set; a node reachable
//! through more than one link is still emitted once.

use std::collections::{HashSet, VecDeque};

use arbor_structures::{BinaryTree, NodeId};
use tracing::debug;

use crate::Visit;

/// Left subtree, node, right subtree.
pub fn in_order<V>(tree: &BinaryTree<V>) -> Vec<Visit> {
    let mut visits = Vec::with_capacity(tree.len());
    let mut visited: HashSet<NodeId> = HashSet::with_capacity(tree.len());
    let mut stack = Vec::new();
    let mut cursor = tree.root();

    loop {
        while let Some(node) = cursor
            .filter(|id| visited.insert(*id))
            .and_then(|id| tree.node(id))
        {
            stack.push(node);
            cursor = node.left;
        }
        let Some(node) = stack.pop() else {
            break;
        };
        visits.push(Visit::node(node.id));
        cursor = node.right;
    }

    debug!(visits = visits.len(), "in-order traversal");
    visits
}

/// Node, left subtree, right subtree.
pub fn pre_order<V>(tree: &BinaryTree<V>) -> Vec<Visit> {
    let mut visits = Vec::with_capacity(tree.len());
    let mut visited: HashSet<NodeId> = HashSet::with_capacity(tree.len());
    let mut stack: Vec<NodeId> = tree.root().into_iter().collect();

    while let Some(id) = stack.pop() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        if !visited.insert(id) {
            continue;
        }
        visits.push(Visit::node(id));
        // Right first so left is popped first.
        stack.extend(node.right);
        stack.extend(node.left);
    }

    debug!(visits = visits.len(), "pre-order traversal");
    visits
}

/// Left subtree, right subtree, node.
///
/// Builds the reverse order (node, right, left) on one stack and unwinds it.
pub fn post_order<V>(tree: &BinaryTree<V>) -> Vec<Visit> {
    let mut visited: HashSet<NodeId> = HashSet::with_capacity(tree.len());
    let mut pending: Vec<NodeId> = tree.root().into_iter().collect();
    let mut reversed = Vec::with_capacity(tree.len());

    while let Some(id) = pending.pop() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        if !visited.insert(id) {
            continue;
        }
        reversed.push(id);
        pending.extend(node.left);
        pending.extend(node.right);
    }

    let visits: Vec<_> = reversed.into_iter().rev().map(Visit::node).collect();
    debug!(visits = visits.len(), "post-order traversal");
    visits
}

/// Breadth-first by level, left to right.
pub fn level_order<V>(tree: &BinaryTree<V>) -> Vec<Visit> {
    let mut visits = Vec::with_capacity(tree.len());
    let mut visited: HashSet<NodeId> = HashSet::with_capacity(tree.len());
    let mut queue: VecDeque<NodeId> = tree.root().into_iter().collect();

    while let Some(id) = queue.pop_front() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        if !visited.insert(id) {
            continue;
        }
        visits.push(Visit::node(id));
        queue.extend(node.children());
    }

    debug!(visits = visits.len(), "level-order traversal");
    visits
}
