//! Binary tree arena.
//!
//! Nodes live in a map keyed by [`NodeId`] and refer to their children by id.
//! Each child id appears in exactly one parent, so the links form a tree
//! rooted at [`BinaryTree::root`].

use std::collections::HashMap;

use crate::id::IdAllocator;
use crate::NodeId;

/// A node of a binary tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode<V> {
    pub id: NodeId,
    pub value: V,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl<V> TreeNode<V> {
    /// Create a leaf node.
    pub fn leaf(id: NodeId, value: V) -> Self {
        Self {
            id,
            value,
            left: None,
            right: None,
        }
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Iterate over present children, left first.
    pub fn children(&self) -> impl Iterator<Item = NodeId> {
        self.left.into_iter().chain(self.right)
    }
}

/// A binary tree stored as an id-keyed arena.
#[derive(Debug, Clone)]
pub struct BinaryTree<V> {
    nodes: HashMap<NodeId, TreeNode<V>>,
    root: Option<NodeId>,
    ids: IdAllocator,
}

impl<V> Default for BinaryTree<V> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            root: None,
            ids: IdAllocator::default(),
        }
    }
}

impl<V> BinaryTree<V> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the root id, if the tree is not empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&TreeNode<V>> {
        self.nodes.get(&id)
    }

    /// Get the value stored at a node.
    pub fn value(&self, id: NodeId) -> Option<&V> {
        self.nodes.get(&id).map(|n| &n.value)
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Iterate over all node ids in ascending id order.
    pub fn ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<_> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Height of the tree in nodes (0 for an empty tree).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children().map(|child| (child, depth + 1)));
            }
        }
        height
    }

    /// Remove every node and restart id allocation.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.ids.reset();
    }

    /// Allocate a detached node and return its id.
    ///
    /// The node becomes reachable once linked with [`set_root`](Self::set_root),
    /// [`set_left`](Self::set_left) or [`set_right`](Self::set_right).
    pub fn allocate(&mut self, value: V) -> NodeId {
        let id = self.ids.next();
        self.nodes.insert(id, TreeNode::leaf(id, value));
        id
    }

    /// Insert a detached node under an id chosen by the caller.
    ///
    /// Used by adapters that preserve externally assigned ids.
    pub(crate) fn insert_with_id(&mut self, id: NodeId, value: V) {
        self.nodes.insert(id, TreeNode::leaf(id, value));
    }

    /// Make `id` the root.
    pub fn set_root(&mut self, id: Option<NodeId>) {
        self.root = id;
    }

    /// Set the left child of `parent`.
    pub fn set_left(&mut self, parent: NodeId, child: Option<NodeId>) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.left = child;
        }
    }

    /// Set the right child of `parent`.
    pub fn set_right(&mut self, parent: NodeId, child: Option<NodeId>) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.right = child;
        }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode<V>> {
        self.nodes.get_mut(&id)
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> Option<TreeNode<V>> {
        self.nodes.remove(&id)
    }

    /// Point whichever link currently holds `old` at `new` instead.
    ///
    /// `parent == None` means `old` is the root.
    pub(crate) fn replace_link(
        &mut self,
        parent: Option<NodeId>,
        old: NodeId,
        new: Option<NodeId>,
    ) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                if let Some(node) = self.nodes.get_mut(&parent) {
                    if node.left == Some(old) {
                        node.left = new;
                    } else if node.right == Some(old) {
                        node.right = new;
                    }
                }
            }
        }
    }
}
