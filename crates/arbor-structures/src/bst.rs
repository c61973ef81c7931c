//! Binary search tree mutator.
//!
//! The shape is fully determined by insertion order. Both walks below are
//! iterative, so degenerate (sorted-insert) trees do not grow the call stack.

use std::cmp::Ordering;
use std::fmt::Debug;

use tracing::debug;

use crate::error::{Error, Result};
use crate::{BinaryTree, NodeId};

/// A binary search tree with unique keys.
#[derive(Debug, Clone)]
pub struct BinarySearchTree<V> {
    tree: BinaryTree<V>,
}

impl<V> Default for BinarySearchTree<V> {
    fn default() -> Self {
        Self {
            tree: BinaryTree::new(),
        }
    }
}

impl<V: Ord + Clone + Debug> BinarySearchTree<V> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by inserting values in order, skipping duplicates.
    pub fn from_values<I: IntoIterator<Item = V>>(values: I) -> Self {
        let mut bst = Self::new();
        for value in values {
            let _ = bst.insert(value);
        }
        bst
    }

    /// Borrow the underlying binary tree.
    pub fn as_tree(&self) -> &BinaryTree<V> {
        &self.tree
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove every node and restart id allocation.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Insert a value as a new leaf.
    ///
    /// Fails with [`Error::DuplicateValue`] if an equal key is met on the way
    /// down; the tree is left untouched in that case.
    pub fn insert(&mut self, value: V) -> Result<NodeId> {
        let mut parent: Option<(NodeId, Ordering)> = None;
        let mut cursor = self.tree.root();

        while let Some(id) = cursor {
            let Some(node) = self.tree.node(id) else {
                break;
            };
            let ordering = value.cmp(&node.value);
            cursor = match ordering {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Err(Error::DuplicateValue(format!("{value:?}"))),
            };
            parent = Some((id, ordering));
        }

        debug!(?value, "bst insert");
        let id = self.tree.allocate(value);
        match parent {
            None => self.tree.set_root(Some(id)),
            Some((parent, Ordering::Less)) => self.tree.set_left(parent, Some(id)),
            Some((parent, _)) => self.tree.set_right(parent, Some(id)),
        }
        Ok(id)
    }

    /// Delete the node holding `value`.
    ///
    /// A node with two children takes the value of its in-order successor
    /// (the leftmost node of its right subtree) and keeps its own id; the
    /// successor is then unlinked, which is always the zero- or one-child case.
    pub fn delete(&mut self, value: &V) -> Result<()> {
        let (parent, target) = self
            .locate(value)
            .ok_or_else(|| Error::NotFound(format!("{value:?}")))?;
        debug!(?value, node = %target, "bst delete");

        let Some(node) = self.tree.node(target) else {
            return Err(Error::NotFound(format!("{value:?}")));
        };

        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let (successor_parent, successor) = self.leftmost(target, right);
                let Some(successor_node) = self.tree.remove(successor) else {
                    return Err(Error::NotFound(format!("{value:?}")));
                };
                self.tree
                    .replace_link(Some(successor_parent), successor, successor_node.right);
                if let Some(node) = self.tree.node_mut(target) {
                    node.value = successor_node.value;
                }
            }
            (left, right) => {
                self.tree.remove(target);
                self.tree.replace_link(parent, target, left.or(right));
            }
        }
        Ok(())
    }

    /// Whether the tree holds `value`.
    pub fn contains(&self, value: &V) -> bool {
        self.locate(value).is_some()
    }

    /// Find the node holding `value`.
    pub fn find(&self, value: &V) -> Option<NodeId> {
        self.locate(value).map(|(_, id)| id)
    }

    /// Smallest key.
    pub fn min(&self) -> Option<&V> {
        let root = self.tree.root()?;
        let (_, id) = self.leftmost(root, root);
        self.tree.value(id)
    }

    /// Largest key.
    pub fn max(&self) -> Option<&V> {
        let mut cursor = self.tree.root()?;
        while let Some(right) = self.tree.node(cursor).and_then(|n| n.right) {
            cursor = right;
        }
        self.tree.value(cursor)
    }

    /// All keys in ascending order.
    pub fn values(&self) -> Vec<V> {
        let mut values = Vec::with_capacity(self.tree.len());
        let mut stack = Vec::new();
        let mut cursor = self.tree.root();
        loop {
            while let Some(node) = cursor.and_then(|id| self.tree.node(id)) {
                stack.push(node);
                cursor = node.left;
            }
            let Some(node) = stack.pop() else {
                break;
            };
            values.push(node.value.clone());
            cursor = node.right;
        }
        values
    }

    /// Check the ordering invariant over every node.
    ///
    /// Each node must lie strictly inside the open interval inherited from
    /// its ancestors.
    pub fn check_invariant(&self) -> bool {
        let mut stack: Vec<(NodeId, Option<&V>, Option<&V>)> =
            self.tree.root().map(|r| (r, None, None)).into_iter().collect();
        let mut seen = 0;
        while let Some((id, low, high)) = stack.pop() {
            let Some(node) = self.tree.node(id) else {
                return false;
            };
            seen += 1;
            if low.is_some_and(|low| node.value <= *low)
                || high.is_some_and(|high| node.value >= *high)
            {
                return false;
            }
            if let Some(left) = node.left {
                stack.push((left, low, Some(&node.value)));
            }
            if let Some(right) = node.right {
                stack.push((right, Some(&node.value), high));
            }
        }
        seen == self.tree.len()
    }

    /// Walk down to `value`, returning `(parent, node)`.
    fn locate(&self, value: &V) -> Option<(Option<NodeId>, NodeId)> {
        let mut parent = None;
        let mut cursor = self.tree.root();
        while let Some(id) = cursor {
            let node = self.tree.node(id)?;
            cursor = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some((parent, id)),
            };
            parent = Some(id);
        }
        None
    }

    /// Follow left links from `start`, returning `(parent, leftmost)`.
    ///
    /// `parent` is the node above `start` on entry.
    fn leftmost(&self, parent: NodeId, start: NodeId) -> (NodeId, NodeId) {
        let mut parent = parent;
        let mut cursor = start;
        while let Some(left) = self.tree.node(cursor).and_then(|n| n.left) {
            parent = cursor;
            cursor = left;
        }
        (parent, cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> BinarySearchTree<i64> {
        BinarySearchTree::from_values([5, 3, 8, 1, 4])
    }

    #[test]
    fn empty_tree_becomes_single_node() {
        let mut bst = BinarySearchTree::new();
        let id = bst.insert(10).unwrap();
        assert_eq!(bst.as_tree().root(), Some(id));
        assert_eq!(bst.len(), 1);
    }

    #[test]
    fn insert_places_by_order() {
        let bst = sample();
        let tree = bst.as_tree();
        let root = tree.node(tree.root().unwrap()).unwrap();
        assert_eq!(root.value, 5);
        assert_eq!(tree.value(root.left.unwrap()), Some(&3));
        assert_eq!(tree.value(root.right.unwrap()), Some(&8));
        assert_eq!(bst.values(), vec![1, 3, 4, 5, 8]);
    }

    #[test]
    fn duplicate_insert_leaves_tree_unchanged() {
        let mut bst = sample();
        let before = bst.values();
        let height = bst.as_tree().height();

        let err = bst.insert(3).unwrap_err();
        assert_eq!(err, Error::DuplicateValue("3".into()));
        assert_eq!(bst.values(), before);
        assert_eq!(bst.as_tree().height(), height);

        // No id was consumed by the rejected insert
        assert_eq!(bst.insert(6).unwrap(), NodeId(5));
    }

    #[test]
    fn delete_missing_is_not_found() {
        let mut bst = sample();
        assert_eq!(bst.delete(&42), Err(Error::NotFound("42".into())));
        assert_eq!(bst.len(), 5);
    }

    #[test]
    fn delete_leaf() {
        let mut bst = sample();
        bst.delete(&1).unwrap();
        assert_eq!(bst.values(), vec![3, 4, 5, 8]);
        assert!(bst.check_invariant());
    }

    #[test]
    fn delete_one_child_promotes_subtree() {
        let mut bst = BinarySearchTree::from_values([5, 3, 1, 2]);
        bst.delete(&3).unwrap();
        let tree = bst.as_tree();
        let root = tree.node(tree.root().unwrap()).unwrap();
        assert_eq!(tree.value(root.left.unwrap()), Some(&1));
        assert_eq!(bst.values(), vec![1, 2, 5]);
        assert!(bst.check_invariant());
    }

    #[test]
    fn delete_root_with_two_children() {
        let mut bst = sample();
        let root_id = bst.as_tree().root().unwrap();
        bst.delete(&5).unwrap();

        // Successor value moves into the root slot, which keeps its id
        assert_eq!(bst.as_tree().root(), Some(root_id));
        assert_eq!(bst.as_tree().value(root_id), Some(&8));
        assert_eq!(bst.values(), vec![1, 3, 4, 8]);
        assert!(bst.check_invariant());
    }

    #[test]
    fn delete_two_children_successor_has_right_child() {
        let mut bst = BinarySearchTree::from_values([10, 5, 20, 15, 30, 17, 16]);
        bst.delete(&10).unwrap();
        assert_eq!(bst.values(), vec![5, 15, 16, 17, 20, 30]);
        assert!(bst.check_invariant());
    }

    #[test]
    fn delete_only_node_empties_tree() {
        let mut bst = BinarySearchTree::from_values([1]);
        bst.delete(&1).unwrap();
        assert!(bst.is_empty());
        assert_eq!(bst.as_tree().root(), None);
    }

    #[test]
    fn min_max_and_contains() {
        let bst = sample();
        assert_eq!(bst.min(), Some(&1));
        assert_eq!(bst.max(), Some(&8));
        assert!(bst.contains(&4));
        assert!(!bst.contains(&7));
    }

    #[test]
    fn skewed_tree_does_not_recurse() {
        let bst = BinarySearchTree::from_values(0..3_000i64);
        assert_eq!(bst.as_tree().height(), 3_000);
        assert_eq!(bst.max(), Some(&2_999));
        assert!(bst.check_invariant());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(i16),
        Delete(i16),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-50i16..50).prop_map(Op::Insert),
            (-50i16..50).prop_map(Op::Delete),
        ]
    }

    proptest! {
        #[test]
        fn invariant_holds_after_any_mutations(ops in proptest::collection::vec(op(), 0..200)) {
            let mut bst = BinarySearchTree::new();
            let mut model = std::collections::BTreeSet::new();

            for op in ops {
                match op {
                    Op::Insert(v) => {
                        let inserted = bst.insert(v).is_ok();
                        prop_assert_eq!(inserted, model.insert(v));
                    }
                    Op::Delete(v) => {
                        let deleted = bst.delete(&v).is_ok();
                        prop_assert_eq!(deleted, model.remove(&v));
                    }
                }
                prop_assert!(bst.check_invariant());
            }

            prop_assert_eq!(bst.values(), model.into_iter().collect::<Vec<_>>());
        }
    }
}
