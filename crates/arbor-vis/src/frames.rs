//! Highlight frames for the playback timeline.

use arbor_algorithms::{Algorithm, ShortestPath, Visit};
use arbor_structures::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};

use crate::config::HighlightMode;

/// The complete set of highlighted ids at one point of playback.
///
/// Every delivery replaces the previous highlight; nothing accumulates on
/// the consumer side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
}

impl Highlight {
    /// Highlight a single visit.
    pub fn of_visit(visit: &Visit) -> Self {
        Self {
            nodes: vec![visit.node],
            edges: visit.edge.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// One scheduled delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// The visit this frame animates; `None` for the closing path frame.
    pub visit: Option<Visit>,
    pub highlight: Highlight,
}

/// An ordered list of frames produced by one algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    algorithm: Algorithm,
    frames: Vec<Frame>,
}

impl Sequence {
    /// Build frames from a visit order.
    pub fn from_visits(algorithm: Algorithm, visits: &[Visit], mode: HighlightMode) -> Self {
        let mut trail = Highlight::default();
        let frames = visits
            .iter()
            .map(|visit| {
                let highlight = match mode {
                    HighlightMode::Current => Highlight::of_visit(visit),
                    HighlightMode::Trail => {
                        trail.nodes.push(visit.node);
                        trail.edges.extend(visit.edge);
                        trail.clone()
                    }
                };
                Frame {
                    visit: Some(*visit),
                    highlight,
                }
            })
            .collect();

        Self { algorithm, frames }
    }

    /// Build frames from a Dijkstra result, optionally closing with the path.
    pub fn from_shortest_path(result: &ShortestPath, mode: HighlightMode, show_path: bool) -> Self {
        let mut sequence = Self::from_visits(Algorithm::Dijkstra, &result.visited, mode);
        if show_path {
            sequence.frames.push(Frame {
                visit: None,
                highlight: Highlight {
                    nodes: result.path.clone(),
                    edges: result.edges(),
                },
            });
        }
        sequence
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Node ids in visit order, skipping the path frame.
    pub fn visited_nodes(&self) -> Vec<NodeId> {
        self.frames
            .iter()
            .filter_map(|f| f.visit.map(|v| v.node))
            .collect()
    }

    pub(crate) fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: u64, b: u64) -> EdgeId {
        EdgeId::new(NodeId(a), NodeId(b))
    }

    fn visits() -> Vec<Visit> {
        vec![
            Visit::node(NodeId(0)),
            Visit::via(NodeId(1), edge(0, 1)),
            Visit::via(NodeId(2), edge(1, 2)),
        ]
    }

    #[test]
    fn current_mode_highlights_one_visit() {
        let seq = Sequence::from_visits(Algorithm::Bfs, &visits(), HighlightMode::Current);
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.frames()[0].highlight.nodes, vec![NodeId(0)]);
        assert!(seq.frames()[0].highlight.edges.is_empty());
        assert_eq!(seq.frames()[2].highlight.nodes, vec![NodeId(2)]);
        assert_eq!(seq.frames()[2].highlight.edges, vec![edge(1, 2)]);
    }

    #[test]
    fn trail_mode_accumulates() {
        let seq = Sequence::from_visits(Algorithm::Dfs, &visits(), HighlightMode::Trail);
        let last = &seq.frames()[2].highlight;
        assert_eq!(last.nodes, vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(last.edges, vec![edge(0, 1), edge(1, 2)]);
        assert_eq!(seq.frames()[0].highlight.nodes, vec![NodeId(0)]);
    }

    #[test]
    fn shortest_path_appends_path_frame() {
        let result = ShortestPath {
            path: vec![NodeId(0), NodeId(1), NodeId(2)],
            distance: 3.0,
            visited: visits(),
        };
        let seq = Sequence::from_shortest_path(&result, HighlightMode::Current, true);
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.visited_nodes(), vec![NodeId(0), NodeId(1), NodeId(2)]);

        let path = seq.frames().last().unwrap();
        assert_eq!(path.visit, None);
        assert_eq!(path.highlight.edges, vec![edge(0, 1), edge(1, 2)]);

        let without = Sequence::from_shortest_path(&result, HighlightMode::Current, false);
        assert_eq!(without.len(), 3);
    }

    #[test]
    fn frame_serializes_for_renderers() {
        let seq = Sequence::from_visits(
            Algorithm::InOrder,
            &[Visit::node(NodeId(4))],
            HighlightMode::Current,
        );
        let json = serde_json::to_string(&seq.frames()[0]).unwrap();
        assert!(json.contains(r#""nodes":[4]"#));
    }
}
