//! Minimum spanning tree algorithms.
//!
//! Both algorithms expect undirected semantics expressed as paired directed
//! edges and return a new graph of the same representation holding the
//! selected edges. The reverse of a selected edge is copied over whenever the
//! input graph has it. On disconnected input the result is a minimum spanning
//! forest.
//!
//! - Kruskal: stable sort of all edges by weight, greedy selection with [`UnionFind`]
//! - Prim: grow a tree from the first node, always taking the cheapest boundary edge
//!
//! The parallel variants only distribute the preprocessing (edge sort for
//! Kruskal, boundary minimum scan for Prim); the greedy selection itself stays
//! sequential.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use super::union_find::UnionFind;
use crate::models::{Edge, GraphStore, NodeId};
use crate::pool::{partition_ranges, WorkerPool};
use crate::{GraphError, Result};

/// Spanning tree algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MstAlgorithm {
    /// Sort edges, join components with union-find.
    Kruskal,
    /// Grow a single tree with a priority queue.
    Prim,
}

impl FromStr for MstAlgorithm {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kruskal" => Ok(MstAlgorithm::Kruskal),
            "prim" => Ok(MstAlgorithm::Prim),
            other => Err(GraphError::NotImplemented(format!(
                "minimum spanning tree algorithm '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for MstAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MstAlgorithm::Kruskal => write!(f, "kruskal"),
            MstAlgorithm::Prim => write!(f, "prim"),
        }
    }
}

/// Compute a minimum spanning tree (forest) of `graph`.
pub fn minimum_spanning_tree<G: GraphStore>(graph: &G, algorithm: MstAlgorithm) -> Result<G> {
    debug!(
        "Computing MST (algorithm={}, nodes={}, edges={})",
        algorithm,
        graph.node_count(),
        graph.edge_count()
    );

    let mst = match algorithm {
        MstAlgorithm::Kruskal => kruskal_select(graph, sorted_edges(graph)),
        MstAlgorithm::Prim => prim(graph),
    };
    Ok(mst)
}

/// Compute a minimum spanning tree with `worker_count` workers for preprocessing.
///
/// Produces the same edge set as [`minimum_spanning_tree`] when edge weights
/// are distinct.
///
/// # Errors
///
/// [`GraphError::InvalidWorkerCount`] if `worker_count` is zero.
pub fn minimum_spanning_tree_parallel<G: GraphStore>(
    graph: &G,
    algorithm: MstAlgorithm,
    worker_count: usize,
) -> Result<G> {
    let pool = WorkerPool::new(worker_count)?;

    debug!(
        "Computing parallel MST (algorithm={}, nodes={}, workers={})",
        algorithm,
        graph.node_count(),
        worker_count
    );

    match algorithm {
        MstAlgorithm::Kruskal => {
            let sorted = sorted_edges_parallel(graph, &pool)?;
            Ok(kruskal_select(graph, sorted))
        }
        MstAlgorithm::Prim => prim_parallel(graph, &pool),
    }
}

/// Sum of all directed edge weights.
///
/// A tree stored as paired edges weighs twice its undirected total.
pub fn total_weight<G: GraphStore>(graph: &G) -> f64 {
    graph.edges().iter().map(|e| e.weight).sum()
}

/// Min-heap entry ordered by weight, then by discovery order.
#[derive(Debug, Clone, Copy)]
struct MinEntry<T> {
    weight: f64,
    order: usize,
    item: T,
}

impl<T> MinEntry<T> {
    fn new(weight: f64, order: usize, item: T) -> Self {
        Self {
            weight,
            order,
            item,
        }
    }
}

impl<T> PartialEq for MinEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for MinEntry<T> {}

impl<T> PartialOrd for MinEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for MinEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.order.cmp(&self.order))
    }
}

fn by_weight_then_order(a: &(usize, Edge), b: &(usize, Edge)) -> Ordering {
    a.1.weight.total_cmp(&b.1.weight).then(a.0.cmp(&b.0))
}

/// All edges, stably sorted by weight.
fn sorted_edges<G: GraphStore>(graph: &G) -> Vec<Edge> {
    let mut edges = graph.edges();
    edges.sort_by(|a, b| a.weight.total_cmp(&b.weight));
    edges
}

/// All edges sorted by (weight, enumeration position), chunks sorted on the pool.
fn sorted_edges_parallel<G: GraphStore>(graph: &G, pool: &WorkerPool) -> Result<Vec<Edge>> {
    let edges = graph.edges();
    let ranges = partition_ranges(edges.len(), pool.workers());

    let chunks = pool.map_partitions(ranges, |range| {
        let mut chunk: Vec<(usize, Edge)> = range.map(|i| (i, edges[i])).collect();
        chunk.sort_by(by_weight_then_order);
        Ok(chunk)
    })?;

    trace!("Merging {} sorted edge chunks", chunks.len());
    Ok(merge_sorted_chunks(chunks, edges.len()))
}

/// K-way merge of chunks already sorted by (weight, position).
fn merge_sorted_chunks(chunks: Vec<Vec<(usize, Edge)>>, total: usize) -> Vec<Edge> {
    let mut cursors: Vec<_> = chunks.into_iter().map(Vec::into_iter).collect();
    let mut heap = BinaryHeap::with_capacity(cursors.len());

    for (chunk, cursor) in cursors.iter_mut().enumerate() {
        if let Some((order, edge)) = cursor.next() {
            heap.push(MinEntry::new(edge.weight, order, (chunk, edge)));
        }
    }

    let mut merged = Vec::with_capacity(total);
    while let Some(entry) = heap.pop() {
        let (chunk, edge) = entry.item;
        merged.push(edge);
        if let Some((order, edge)) = cursors[chunk].next() {
            heap.push(MinEntry::new(edge.weight, order, (chunk, edge)));
        }
    }
    merged
}

/// Copy a selected edge, and its reverse if the input has one, into the tree.
fn add_tree_edge<G: GraphStore>(graph: &G, mst: &mut G, edge: Edge) {
    mst.insert_edge(edge.source, edge.target, edge.weight);
    if let Some(weight) = graph.edge_weight(edge.target, edge.source) {
        mst.insert_edge(edge.target, edge.source, weight);
    }
}

/// Greedy Kruskal selection over pre-sorted edges.
fn kruskal_select<G: GraphStore>(graph: &G, sorted: Vec<Edge>) -> G {
    let n = graph.node_count();
    let mut mst = graph.empty_like();
    let mut sets = UnionFind::new(n);
    let wanted = n.saturating_sub(1);
    let mut selected = 0;

    for edge in sorted {
        if selected == wanted {
            break;
        }
        if let Some(root) = sets.merge(edge.source, edge.target) {
            trace!("Joined {:?} and {:?} under {:?}", edge.source, edge.target, root);
            add_tree_edge(graph, &mut mst, edge);
            selected += 1;
        }
    }

    trace!(
        "Kruskal selected {} edges ({} components left)",
        selected,
        sets.num_sets()
    );
    mst
}

/// Lazy Prim: a heap of boundary edges ordered by (weight, push order).
fn prim<G: GraphStore>(graph: &G) -> G {
    let mut mst = graph.empty_like();
    let mut in_tree = vec![false; graph.node_count()];
    let mut heap = BinaryHeap::new();
    let mut pushed = 0usize;

    for root in graph.nodes() {
        if in_tree[root.index()] {
            continue;
        }
        in_tree[root.index()] = true;
        push_boundary(graph, root, &in_tree, &mut heap, &mut pushed);

        while let Some(entry) = heap.pop() {
            let edge: Edge = entry.item;
            if in_tree[edge.target.index()] {
                continue;
            }
            in_tree[edge.target.index()] = true;
            add_tree_edge(graph, &mut mst, edge);
            push_boundary(graph, edge.target, &in_tree, &mut heap, &mut pushed);
        }
    }

    mst
}

fn push_boundary<G: GraphStore>(
    graph: &G,
    node: NodeId,
    in_tree: &[bool],
    heap: &mut BinaryHeap<MinEntry<Edge>>,
    pushed: &mut usize,
) {
    for (next, weight) in graph.neighbors(node) {
        if !in_tree[next.index()] {
            heap.push(MinEntry::new(weight, *pushed, Edge::new(node, next, weight)));
            *pushed += 1;
        }
    }
}

/// Dense Prim: per-node cheapest crossing edge, minimum scanned on the pool.
fn prim_parallel<G: GraphStore>(graph: &G, pool: &WorkerPool) -> Result<G> {
    let n = graph.node_count();
    let mut mst = graph.empty_like();
    let mut in_tree = vec![false; n];
    // best[v] = cheapest known edge from the tree into v, with its discovery order
    let mut best: Vec<Option<(usize, Edge)>> = vec![None; n];
    let mut discovered = 0usize;

    for root in graph.nodes() {
        if in_tree[root.index()] {
            continue;
        }
        in_tree[root.index()] = true;
        relax_boundary(graph, root, &in_tree, &mut best, &mut discovered);

        while let Some(edge) = cheapest_boundary(pool, &in_tree, &best)? {
            in_tree[edge.target.index()] = true;
            add_tree_edge(graph, &mut mst, edge);
            relax_boundary(graph, edge.target, &in_tree, &mut best, &mut discovered);
        }
    }

    Ok(mst)
}

fn relax_boundary<G: GraphStore>(
    graph: &G,
    node: NodeId,
    in_tree: &[bool],
    best: &mut [Option<(usize, Edge)>],
    discovered: &mut usize,
) {
    for (next, weight) in graph.neighbors(node) {
        if in_tree[next.index()] {
            continue;
        }
        let improves = match best[next.index()] {
            Some((_, current)) => weight < current.weight,
            None => true,
        };
        if improves {
            best[next.index()] = Some((*discovered, Edge::new(node, next, weight)));
            *discovered += 1;
        }
    }
}

/// Cheapest edge crossing into a non-tree node, scanned in partitions.
fn cheapest_boundary(
    pool: &WorkerPool,
    in_tree: &[bool],
    best: &[Option<(usize, Edge)>],
) -> Result<Option<Edge>> {
    let ranges = partition_ranges(best.len(), pool.workers());

    let minima = pool.map_partitions(ranges, |range| {
        Ok(range
            .filter(|&v| !in_tree[v])
            .filter_map(|v| best[v])
            .min_by(by_weight_then_order))
    })?;

    Ok(minima
        .into_iter()
        .flatten()
        .min_by(by_weight_then_order)
        .map(|(_, edge)| edge))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdjacencyList, AdjacencyMatrix};

    fn weighted_square<G: GraphStore>() -> G {
        // a - b (1), b - c (2), c - d (3), d - a (4), a - c (5)
        let mut graph = G::with_nodes(["a", "b", "c", "d"]).unwrap();
        for (s, d, w) in [
            ("a", "b", 1.0),
            ("b", "c", 2.0),
            ("c", "d", 3.0),
            ("d", "a", 4.0),
            ("a", "c", 5.0),
        ] {
            graph.add_undirected_edge(s, d, w).unwrap();
        }
        graph
    }

    fn assert_square_tree<G: GraphStore>(mst: &G) {
        assert_eq!(mst.edge_count(), 6);
        assert_eq!(mst.edge_weight_by_name("a", "b"), Some(1.0));
        assert_eq!(mst.edge_weight_by_name("c", "b"), Some(2.0));
        assert_eq!(mst.edge_weight_by_name("d", "c"), Some(3.0));
        assert_eq!(total_weight(mst), 12.0);
    }

    #[test]
    fn test_kruskal_square() {
        let graph: AdjacencyList = weighted_square();
        let mst = minimum_spanning_tree(&graph, MstAlgorithm::Kruskal).unwrap();
        assert_square_tree(&mst);
    }

    #[test]
    fn test_prim_square() {
        let graph: AdjacencyMatrix = weighted_square();
        let mst = minimum_spanning_tree(&graph, MstAlgorithm::Prim).unwrap();
        assert_square_tree(&mst);
    }

    #[test]
    fn test_parallel_variants_square() {
        let graph: AdjacencyList = weighted_square();
        for algorithm in [MstAlgorithm::Kruskal, MstAlgorithm::Prim] {
            for workers in [1, 2, 8] {
                let mst = minimum_spanning_tree_parallel(&graph, algorithm, workers).unwrap();
                assert_square_tree(&mst);
            }
        }
    }

    #[test]
    fn test_forest_on_disconnected_graph() {
        // a - b (2)   c - d (1)
        let mut graph = AdjacencyList::with_nodes(["a", "b", "c", "d"]).unwrap();
        graph.add_undirected_edge("a", "b", 2.0).unwrap();
        graph.add_undirected_edge("c", "d", 1.0).unwrap();

        for algorithm in [MstAlgorithm::Kruskal, MstAlgorithm::Prim] {
            let mst = minimum_spanning_tree(&graph, algorithm).unwrap();
            assert_eq!(mst.edge_count(), 4);
            assert_eq!(total_weight(&mst), 6.0);
        }
    }

    #[test]
    fn test_one_way_edge_not_mirrored() {
        let mut graph = AdjacencyList::with_nodes(["a", "b"]).unwrap();
        graph.add_edge("a", "b", 3.0).unwrap();

        let mst = minimum_spanning_tree(&graph, MstAlgorithm::Kruskal).unwrap();
        assert_eq!(mst.edge_weight_by_name("a", "b"), Some(3.0));
        assert_eq!(mst.edge_weight_by_name("b", "a"), None);
    }

    #[test]
    fn test_self_loop_ignored() {
        let mut graph = AdjacencyMatrix::with_nodes(["a", "b"]).unwrap();
        graph.add_edge("a", "a", 0.5).unwrap();
        graph.add_undirected_edge("a", "b", 1.0).unwrap();

        for algorithm in [MstAlgorithm::Kruskal, MstAlgorithm::Prim] {
            let mst = minimum_spanning_tree(&graph, algorithm).unwrap();
            assert_eq!(mst.edge_weight_by_name("a", "a"), None);
            assert_eq!(mst.edge_count(), 2);
        }
    }

    #[test]
    fn test_empty_graph() {
        let graph = AdjacencyList::new();
        let mst = minimum_spanning_tree(&graph, MstAlgorithm::Prim).unwrap();
        assert_eq!(mst.node_count(), 0);
        let mst = minimum_spanning_tree_parallel(&graph, MstAlgorithm::Kruskal, 2).unwrap();
        assert_eq!(mst.edge_count(), 0);
    }

    #[test]
    fn test_parallel_rejects_zero_workers() {
        let graph: AdjacencyList = weighted_square();
        let result = minimum_spanning_tree_parallel(&graph, MstAlgorithm::Prim, 0);
        assert!(matches!(result, Err(GraphError::InvalidWorkerCount(0))));
    }

    #[test]
    fn test_parallel_sort_is_stable() {
        let mut graph = AdjacencyList::with_nodes(["a", "b", "c", "d"]).unwrap();
        graph.add_edge("a", "b", 2.0).unwrap();
        graph.add_edge("a", "c", 1.0).unwrap();
        graph.add_edge("b", "c", 2.0).unwrap();
        graph.add_edge("c", "d", 1.0).unwrap();
        graph.add_edge("d", "a", 2.0).unwrap();

        let pool = WorkerPool::new(3).unwrap();
        let parallel = sorted_edges_parallel(&graph, &pool).unwrap();
        assert_eq!(parallel, sorted_edges(&graph));
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!("Kruskal".parse::<MstAlgorithm>().unwrap(), MstAlgorithm::Kruskal);
        assert_eq!("prim".parse::<MstAlgorithm>().unwrap(), MstAlgorithm::Prim);
        assert!(matches!(
            "boruvka".parse::<MstAlgorithm>(),
            Err(GraphError::NotImplemented(_))
        ));
    }
}
