//! Benchmarks for Arbor algorithms
//!
//! Measures performance of:
//! - Tree traversals on balanced and skewed trees
//! - BFS / DFS on grid graphs
//! - Dijkstra corner-to-corner on weighted grids

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use arbor_algorithms::{bfs, dfs, dijkstra, in_order, level_order, post_order, pre_order};
use arbor_structures::{BinarySearchTree, Graph, NodeId};

/// Insert keys so the resulting tree is balanced.
fn balanced_bst(size: i64) -> BinarySearchTree<i64> {
    let mut bst = BinarySearchTree::new();
    let mut ranges = vec![(0, size)];
    while let Some((low, high)) = ranges.pop() {
        if low >= high {
            continue;
        }
        let mid = low + (high - low) / 2;
        let _ = bst.insert(mid);
        ranges.push((low, mid));
        ranges.push((mid + 1, high));
    }
    bst
}

/// A `side` x `side` grid with weights varying by position.
fn grid(side: u64) -> (Graph, NodeId, NodeId) {
    let mut graph = Graph::new();
    let ids: Vec<_> = (0..side * side).map(|i| graph.add_node(i.to_string())).collect();
    for row in 0..side {
        for col in 0..side {
            let here = ids[(row * side + col) as usize];
            if col + 1 < side {
                let right = ids[(row * side + col + 1) as usize];
                let _ = graph.add_edge(here, right, Some(((row + col) % 7 + 1) as f64));
            }
            if row + 1 < side {
                let below = ids[((row + 1) * side + col) as usize];
                let _ = graph.add_edge(here, below, Some(((row * col) % 5 + 1) as f64));
            }
        }
    }
    let first = ids[0];
    let last = ids[ids.len() - 1];
    (graph, first, last)
}

/// Benchmark the four tree orders
fn bench_tree_traversals(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_traversal");

    for &size in &[100i64, 1_000, 10_000] {
        let bst = balanced_bst(size);
        let tree = bst.as_tree();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("in_order", size), tree, |b, t| {
            b.iter(|| in_order(black_box(t)))
        });
        group.bench_with_input(BenchmarkId::new("pre_order", size), tree, |b, t| {
            b.iter(|| pre_order(black_box(t)))
        });
        group.bench_with_input(BenchmarkId::new("post_order", size), tree, |b, t| {
            b.iter(|| post_order(black_box(t)))
        });
        group.bench_with_input(BenchmarkId::new("level_order", size), tree, |b, t| {
            b.iter(|| level_order(black_box(t)))
        });
    }
    group.finish();
}

/// Benchmark BST mutation with balanced insertion order
fn bench_bst_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("bst_build");

    for &size in &[100i64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &s| {
            b.iter(|| balanced_bst(black_box(s)))
        });
    }
    group.finish();
}

/// Benchmark graph searches on grids
fn bench_graph_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_search");

    for &side in &[10u64, 30, 100] {
        let (graph, first, last) = grid(side);
        group.throughput(Throughput::Elements(side * side));
        group.bench_with_input(BenchmarkId::new("bfs", side), &graph, |b, g| {
            b.iter(|| bfs(black_box(g), first))
        });
        group.bench_with_input(BenchmarkId::new("dfs", side), &graph, |b, g| {
            b.iter(|| dfs(black_box(g), first))
        });
        group.bench_with_input(BenchmarkId::new("dijkstra", side), &graph, |b, g| {
            b.iter(|| dijkstra(black_box(g), first, last))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_tree_traversals,
    bench_bst_build,
    bench_graph_search,
);

criterion_main!(benches);
