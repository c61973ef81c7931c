//! Breadth-first and depth-first graph traversal.
//!
//! Both searches differ only in their frontier discipline. Every reachable
//! node is emitted once, together with the edge it was reached through so a
//! renderer can light up the search tree. Edge weights are ignored.

use std::collections::{HashSet, VecDeque};

use arbor_structures::{Graph, NodeId};
use tracing::debug;

use crate::error::{Error, Result};
use crate::Visit;

/// Breadth-first search from `start` with a FIFO frontier.
pub fn bfs(graph: &Graph, start: NodeId) -> Result<Vec<Visit>> {
    if !graph.contains(start) {
        return Err(Error::InvalidStart(start));
    }

    let mut visits = Vec::with_capacity(graph.node_count());
    let mut discovered: HashSet<NodeId> = HashSet::from([start]);
    let mut frontier = VecDeque::from([Visit::node(start)]);

    while let Some(visit) = frontier.pop_front() {
        visits.push(visit);
        for (neighbor, edge) in graph.neighbors(visit.node) {
            if discovered.insert(neighbor) {
                frontier.push_back(Visit::via(neighbor, edge.id));
            }
        }
    }

    debug!(%start, visits = visits.len(), "bfs");
    Ok(visits)
}

/// Depth-first search from `start` with a LIFO frontier.
///
/// Neighbors are pushed in reverse so the first neighbor is explored first,
/// giving the same order (and the same tree edges) as the recursive form.
pub fn dfs(graph: &Graph, start: NodeId) -> Result<Vec<Visit>> {
    if !graph.contains(start) {
        return Err(Error::InvalidStart(start));
    }

    let mut visits = Vec::with_capacity(graph.node_count());
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut frontier = vec![Visit::node(start)];

    while let Some(visit) = frontier.pop() {
        if !visited.insert(visit.node) {
            continue;
        }
        visits.push(visit);

        let next: Vec<Visit> = graph
            .neighbors(visit.node)
            .filter(|(neighbor, _)| !visited.contains(neighbor))
            .map(|(neighbor, edge)| Visit::via(neighbor, edge.id))
            .collect();
        frontier.extend(next.into_iter().rev());
    }

    debug!(%start, visits = visits.len(), "dfs");
    Ok(visits)
}
