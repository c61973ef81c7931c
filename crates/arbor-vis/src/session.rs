//! Session facade: one structure, one sequencer.
//!
//! A [`Session`] pairs a structure with the [`Sequencer`] that animates it.
//! Algorithms run against a borrow of the structure up front and the frames
//! they produce are owned by the [`Run`], so nothing borrows the structure
//! while playback is in flight. Mutations are refused while a run is Running.

use std::fmt::Debug;

use arbor_algorithms::{
    bfs, dfs, dijkstra, in_order, level_order, post_order, pre_order, Algorithm, StructureKind,
};
use arbor_structures::{
    BinarySearchTree, BinaryTree, EdgeId, Graph, NodeId, Position, PositionedNode, TreeLayout,
};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::config::PlaybackConfig;
use crate::error::{Error, Result};
use crate::frames::{Highlight, Sequence};
use crate::playback::{Delivery, PlaybackStatus, Run, Sequencer};

/// A structure an algorithm can be visualized on.
pub trait Visualize {
    /// Which family of algorithms applies.
    const KIND: StructureKind;

    /// Run `algorithm` and turn its visit order into frames.
    ///
    /// `start` and `end` are only meaningful for graphs; tree traversals
    /// always begin at the root.
    fn plan(
        &self,
        algorithm: Algorithm,
        start: Option<NodeId>,
        end: Option<NodeId>,
        config: &PlaybackConfig,
    ) -> Result<Sequence>;

    /// Remove every node.
    fn clear(&mut self);

    fn is_empty(&self) -> bool;
}

fn unsupported(algorithm: Algorithm, structure: StructureKind) -> Error {
    Error::UnsupportedAlgorithm {
        algorithm,
        structure,
    }
}

fn plan_tree<V>(
    tree: &BinaryTree<V>,
    algorithm: Algorithm,
    config: &PlaybackConfig,
) -> Result<Sequence> {
    if algorithm.structure() != StructureKind::Tree {
        return Err(unsupported(algorithm, StructureKind::Tree));
    }
    if tree.is_empty() {
        return Err(Error::EmptyStructure(StructureKind::Tree));
    }

    let visits = match algorithm {
        Algorithm::InOrder => in_order(tree),
        Algorithm::PreOrder => pre_order(tree),
        Algorithm::PostOrder => post_order(tree),
        Algorithm::LevelOrder => level_order(tree),
        other => return Err(unsupported(other, StructureKind::Tree)),
    };
    Ok(Sequence::from_visits(algorithm, &visits, config.mode))
}

impl<V> Visualize for BinaryTree<V> {
    const KIND: StructureKind = StructureKind::Tree;

    fn plan(
        &self,
        algorithm: Algorithm,
        _start: Option<NodeId>,
        _end: Option<NodeId>,
        config: &PlaybackConfig,
    ) -> Result<Sequence> {
        plan_tree(self, algorithm, config)
    }

    fn clear(&mut self) {
        BinaryTree::clear(self);
    }

    fn is_empty(&self) -> bool {
        BinaryTree::is_empty(self)
    }
}

impl<V: Ord + Clone + Debug> Visualize for BinarySearchTree<V> {
    const KIND: StructureKind = StructureKind::Tree;

    fn plan(
        &self,
        algorithm: Algorithm,
        _start: Option<NodeId>,
        _end: Option<NodeId>,
        config: &PlaybackConfig,
    ) -> Result<Sequence> {
        plan_tree(self.as_tree(), algorithm, config)
    }

    fn clear(&mut self) {
        BinarySearchTree::clear(self);
    }

    fn is_empty(&self) -> bool {
        BinarySearchTree::is_empty(self)
    }
}

impl<V: Clone> Visualize for TreeLayout<V> {
    const KIND: StructureKind = StructureKind::Tree;

    fn plan(
        &self,
        algorithm: Algorithm,
        _start: Option<NodeId>,
        _end: Option<NodeId>,
        config: &PlaybackConfig,
    ) -> Result<Sequence> {
        plan_tree(&self.to_tree(), algorithm, config)
    }

    fn clear(&mut self) {
        TreeLayout::clear(self);
    }

    fn is_empty(&self) -> bool {
        TreeLayout::is_empty(self)
    }
}

impl Visualize for Graph {
    const KIND: StructureKind = StructureKind::Graph;

    fn plan(
        &self,
        algorithm: Algorithm,
        start: Option<NodeId>,
        end: Option<NodeId>,
        config: &PlaybackConfig,
    ) -> Result<Sequence> {
        if algorithm.structure() != StructureKind::Graph {
            return Err(unsupported(algorithm, StructureKind::Graph));
        }
        let start = match start.or_else(|| self.first_node()) {
            Some(start) => start,
            None => return Err(Error::EmptyStructure(StructureKind::Graph)),
        };

        let sequence = match algorithm {
            Algorithm::Bfs => Sequence::from_visits(algorithm, &bfs(self, start)?, config.mode),
            Algorithm::Dfs => Sequence::from_visits(algorithm, &dfs(self, start)?, config.mode),
            Algorithm::Dijkstra => {
                let end = end.ok_or(Error::MissingTarget(algorithm))?;
                let result = dijkstra(self, start, end)?;
                debug!(%start, %end, distance = result.distance, "shortest path found");
                Sequence::from_shortest_path(&result, config.mode, config.show_path)
            }
            other => return Err(unsupported(other, StructureKind::Graph)),
        };
        Ok(sequence)
    }

    fn clear(&mut self) {
        Graph::clear(self);
    }

    fn is_empty(&self) -> bool {
        Graph::is_empty(self)
    }
}

/// A structure plus the sequencer that plays algorithms over it.
#[derive(Debug)]
pub struct Session<S> {
    structure: S,
    config: PlaybackConfig,
    sequencer: Sequencer,
}

impl<S: Default> Default for Session<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> Session<S> {
    pub fn new(structure: S) -> Self {
        Self::with_config(structure, PlaybackConfig::default())
    }

    pub fn with_config(structure: S, config: PlaybackConfig) -> Self {
        Self {
            structure,
            config,
            sequencer: Sequencer::new(),
        }
    }

    pub fn structure(&self) -> &S {
        &self.structure
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Replace the playback configuration used by later runs.
    pub fn set_config(&mut self, config: PlaybackConfig) {
        self.config = config;
    }

    /// The sequencer; clone it to cancel from another task or a callback.
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn subscribe(&self) -> watch::Receiver<Highlight> {
        self.sequencer.subscribe()
    }

    pub fn watch_status(&self) -> watch::Receiver<PlaybackStatus> {
        self.sequencer.watch_status()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.sequencer.status()
    }

    pub fn is_running(&self) -> bool {
        self.sequencer.is_running()
    }

    /// Cancel the running sequence, if any.
    pub fn cancel(&self) -> bool {
        self.sequencer.cancel()
    }

    /// Apply `f` to the structure unless a run is in flight.
    pub fn mutate<T>(&mut self, f: impl FnOnce(&mut S) -> T) -> Result<T> {
        if self.sequencer.is_running() {
            warn!("mutation rejected while a sequence is running");
            return Err(Error::ConcurrentMutation);
        }
        Ok(f(&mut self.structure))
    }
}

impl<S: Visualize> Session<S> {
    /// Remove every node.
    pub fn clear(&mut self) -> Result<()> {
        self.mutate(S::clear)
    }

    /// Build the frame sequence for `algorithm` without playing it.
    pub fn plan(
        &self,
        algorithm: Algorithm,
        start: Option<NodeId>,
        end: Option<NodeId>,
    ) -> Result<Sequence> {
        let sequence = self.structure.plan(algorithm, start, end, &self.config)?;
        debug!(%algorithm, frames = sequence.len(), "sequence planned");
        Ok(sequence)
    }

    /// Plan `algorithm` and arm a run of it on this session's sequencer.
    pub fn run<F>(
        &self,
        algorithm: Algorithm,
        start: Option<NodeId>,
        end: Option<NodeId>,
        on_event: F,
    ) -> Result<Run<F>>
    where
        F: FnMut(Delivery<'_>) + Send,
    {
        if self.sequencer.is_running() {
            return Err(Error::AlreadyRunning);
        }
        let sequence = self.plan(algorithm, start, end)?;
        self.sequencer
            .start(sequence, self.config.interval_for(algorithm), on_event)
    }

    /// Like [`Session::run`], with the algorithm given by name.
    pub fn run_named<F>(
        &self,
        name: &str,
        start: Option<NodeId>,
        end: Option<NodeId>,
        on_event: F,
    ) -> Result<Run<F>>
    where
        F: FnMut(Delivery<'_>) + Send,
    {
        let algorithm: Algorithm = name.parse()?;
        self.run(algorithm, start, end, on_event)
    }
}

impl<V: Ord + Clone + Debug> Session<BinarySearchTree<V>> {
    /// Insert `value`; duplicates are rejected.
    pub fn insert(&mut self, value: V) -> Result<NodeId> {
        Ok(self.mutate(|bst| bst.insert(value))??)
    }

    /// Delete `value`; missing values are rejected.
    pub fn delete(&mut self, value: &V) -> Result<()> {
        Ok(self.mutate(|bst| bst.delete(value))??)
    }
}

impl Session<Graph> {
    pub fn add_node(&mut self, label: impl Into<String>) -> Result<NodeId> {
        self.mutate(|graph| graph.add_node(label))
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: Option<f64>) -> Result<EdgeId> {
        Ok(self.mutate(|graph| graph.add_edge(from, to, weight))??)
    }
}

impl<V: Clone> Session<TreeLayout<V>> {
    pub fn add_node(&mut self, value: V, position: Position) -> Result<NodeId> {
        self.mutate(|layout| layout.add_node(value, position))
    }

    /// Add a node at the next default position.
    pub fn push(&mut self, value: V) -> Result<NodeId> {
        self.mutate(|layout| layout.push(value))
    }

    pub fn move_node(&mut self, id: NodeId, position: Position) -> Result<()> {
        Ok(self.mutate(|layout| layout.move_node(id, position))??)
    }

    pub fn remove_node(&mut self, id: NodeId) -> Result<PositionedNode<V>> {
        Ok(self.mutate(|layout| layout.remove_node(id))??)
    }
}
