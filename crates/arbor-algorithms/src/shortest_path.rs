//! Dijkstra shortest path over an undirected, non-negatively weighted graph.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use arbor_structures::{EdgeId, Graph, NodeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::Visit;

/// Result of a shortest-path search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPath {
    /// Nodes from start to end inclusive.
    pub path: Vec<NodeId>,
    /// Total weight along `path`.
    pub distance: f64,
    /// Nodes in the order they were finalized, each with the edge of its
    /// best known predecessor.
    pub visited: Vec<Visit>,
}

impl ShortestPath {
    /// Edges along the path, in path order.
    pub fn edges(&self) -> Vec<EdgeId> {
        self.path
            .windows(2)
            .map(|pair| EdgeId::new(pair[0], pair[1]))
            .collect()
    }
}

/// Min-heap entry, ordered by distance then by discovery sequence.
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    distance: f64,
    sequence: u64,
    node: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// Find the shortest path from `start` to `end`.
///
/// Every edge must carry a non-negative weight. The search stops as soon as
/// `end` is finalized; among equal tentative distances the node discovered
/// first is finalized first.
pub fn dijkstra(graph: &Graph, start: NodeId, end: NodeId) -> Result<ShortestPath> {
    for edge in graph.edges() {
        match edge.weight {
            Some(weight) if weight >= 0.0 => {}
            weight => return Err(Error::InvalidWeight { edge: edge.id, weight }),
        }
    }
    if !graph.contains(start) {
        return Err(Error::InvalidStart(start));
    }
    if !graph.contains(end) {
        return Err(Error::UnknownTarget(end));
    }

    let mut distances: HashMap<NodeId, f64> = HashMap::from([(start, 0.0)]);
    let mut previous: HashMap<NodeId, (NodeId, EdgeId)> = HashMap::new();
    let mut finalized: HashSet<NodeId> = HashSet::new();
    let mut visited = Vec::new();
    let mut sequence = 0u64;
    let mut heap = BinaryHeap::from([Reverse(HeapEntry {
        distance: 0.0,
        sequence,
        node: start,
    })]);

    while let Some(Reverse(current)) = heap.pop() {
        if !finalized.insert(current.node) {
            continue;
        }
        visited.push(Visit {
            node: current.node,
            edge: previous.get(&current.node).map(|&(_, edge)| edge),
        });
        if current.node == end {
            break;
        }

        for (neighbor, edge) in graph.neighbors(current.node) {
            if finalized.contains(&neighbor) {
                continue;
            }
            let candidate = current.distance + edge.weight_or_default();
            // An overflowed sum is as unreachable as no edge at all.
            if !candidate.is_finite() {
                continue;
            }
            let improves = distances
                .get(&neighbor)
                .map_or(true, |&known| candidate < known);
            if improves {
                distances.insert(neighbor, candidate);
                previous.insert(neighbor, (current.node, edge.id));
                sequence += 1;
                heap.push(Reverse(HeapEntry {
                    distance: candidate,
                    sequence,
                    node: neighbor,
                }));
            }
        }
    }

    let Some(&distance) = distances.get(&end) else {
        debug!(%start, %end, finalized = visited.len(), "dijkstra found no path");
        return Err(Error::NoPath { from: start, to: end });
    };

    let mut path = vec![end];
    let mut cursor = end;
    while let Some(&(prev, _)) = previous.get(&cursor) {
        path.push(prev);
        cursor = prev;
    }
    path.reverse();

    debug!(%start, %end, distance, hops = path.len() - 1, finalized = visited.len(), "dijkstra");
    Ok(ShortestPath {
        path,
        distance,
        visited,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_ids;

    fn triangle() -> (Graph, [NodeId; 3]) {
        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        graph.add_edge(a, b, Some(1.0)).unwrap();
        graph.add_edge(b, c, Some(2.0)).unwrap();
        graph.add_edge(a, c, Some(4.0)).unwrap();
        (graph, [a, b, c])
    }

    #[test]
    fn prefers_cheaper_two_hop_path() {
        let (graph, [a, b, c]) = triangle();
        let result = dijkstra(&graph, a, c).unwrap();
        assert_eq!(result.path, vec![a, b, c]);
        assert_eq!(result.distance, 3.0);
        assert_eq!(result.edges(), vec![EdgeId::new(a, b), EdgeId::new(b, c)]);
        assert_eq!(node_ids(&result.visited), vec![a, b, c]);
        assert_eq!(result.visited[2].edge, Some(EdgeId::new(b, c)));
    }

    #[test]
    fn start_equals_end() {
        let (graph, [a, _, _]) = triangle();
        let result = dijkstra(&graph, a, a).unwrap();
        assert_eq!(result.path, vec![a]);
        assert_eq!(result.distance, 0.0);
        assert_eq!(result.visited, vec![Visit::node(a)]);
    }

    #[test]
    fn stops_once_end_is_finalized() {
        let (mut graph, [a, b, c]) = triangle();
        let far = graph.add_node("far");
        graph.add_edge(c, far, Some(10.0)).unwrap();
        let result = dijkstra(&graph, a, b).unwrap();
        assert_eq!(result.path, vec![a, b]);
        assert!(!node_ids(&result.visited).contains(&far));
    }

    #[test]
    fn negative_weight_rejected() {
        let (mut graph, [a, _, c]) = triangle();
        let d = graph.add_node("D");
        graph.add_edge(c, d, Some(-1.0)).unwrap();
        assert_eq!(
            dijkstra(&graph, a, c),
            Err(Error::InvalidWeight {
                edge: EdgeId::new(c, d),
                weight: Some(-1.0)
            })
        );
    }

    #[test]
    fn missing_weight_rejected() {
        let (mut graph, [a, _, c]) = triangle();
        let d = graph.add_node("D");
        graph.add_edge(d, a, None).unwrap();
        assert!(matches!(
            dijkstra(&graph, a, c),
            Err(Error::InvalidWeight { weight: None, .. })
        ));
    }

    #[test]
    fn unreachable_target_is_no_path() {
        let (mut graph, [a, _, _]) = triangle();
        let island = graph.add_node("island");
        assert_eq!(
            dijkstra(&graph, a, island),
            Err(Error::NoPath { from: a, to: island })
        );
    }

    #[test]
    fn overflowing_distance_is_no_path() {
        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        graph.add_edge(a, b, Some(f64::MAX)).unwrap();
        graph.add_edge(b, c, Some(f64::MAX)).unwrap();
        assert_eq!(dijkstra(&graph, a, c), Err(Error::NoPath { from: a, to: c }));
        assert_eq!(dijkstra(&graph, a, b).unwrap().distance, f64::MAX);

        let d = graph.add_node("D");
        graph.add_edge(a, d, Some(1.0)).unwrap();
        graph.add_edge(d, c, Some(1.0)).unwrap();
        let result = dijkstra(&graph, a, c).unwrap();
        assert_eq!(result.path, vec![a, d, c]);
        assert_eq!(result.distance, 2.0);
    }

    #[test]
    fn unknown_endpoints() {
        let (graph, [a, _, _]) = triangle();
        assert_eq!(dijkstra(&graph, NodeId(9), a), Err(Error::InvalidStart(NodeId(9))));
        assert_eq!(dijkstra(&graph, a, NodeId(9)), Err(Error::UnknownTarget(NodeId(9))));
    }

    #[test]
    fn ties_finalize_first_discovered() {
        // A connects to B then C at equal cost; B was discovered first.
        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        let d = graph.add_node("D");
        graph.add_edge(a, b, Some(1.0)).unwrap();
        graph.add_edge(a, c, Some(1.0)).unwrap();
        graph.add_edge(b, d, Some(1.0)).unwrap();
        graph.add_edge(c, d, Some(1.0)).unwrap();

        let result = dijkstra(&graph, a, d).unwrap();
        assert_eq!(node_ids(&result.visited), vec![a, b, c, d]);
        assert_eq!(result.path, vec![a, b, d]);
        assert_eq!(result, dijkstra(&graph, a, d).unwrap());
    }

    #[test]
    fn zero_weight_edges_allowed() {
        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        graph.add_edge(a, b, Some(0.0)).unwrap();
        assert_eq!(dijkstra(&graph, a, b).unwrap().distance, 0.0);
    }
}
