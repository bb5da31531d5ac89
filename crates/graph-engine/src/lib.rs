//! Graph algorithm engine over list or matrix backed directed graphs.
//!
//! This crate provides traversal and analysis routines that work identically
//! on every [`GraphStore`] implementation. It includes:
//!
//! - **Graph Store**: [`AdjacencyList`] and [`AdjacencyMatrix`] over a shared node arena
//! - **Traversal**: Visitor-driven BFS/DFS plus a level-synchronous parallel BFS
//! - **MST**: Kruskal and Prim, each with a worker-pool variant
//! - **SCC**: Kosaraju's two-pass algorithm
//! - **Shortest paths**: Bellman-Ford with negative cycle detection
//! - **Union-Find**: Disjoint sets with union by rank and path halving
//!
//! # Example
//!
//! ```
//! use graph_engine::{minimum_spanning_tree, AdjacencyList, GraphStore, MstAlgorithm};
//!
//! let mut graph = AdjacencyList::with_nodes(["a", "b", "c"]).unwrap();
//! graph.add_undirected_edge("a", "b", 1.0).unwrap();
//! graph.add_undirected_edge("b", "c", 2.0).unwrap();
//! graph.add_undirected_edge("a", "c", 5.0).unwrap();
//!
//! let mst = minimum_spanning_tree(&graph, MstAlgorithm::Kruskal).unwrap();
//! assert_eq!(mst.edge_count(), 4);
//! assert!(mst.edge_weight_by_name("a", "c").is_none());
//! ```

pub mod algorithms;
pub mod config;
pub mod models;
pub mod pool;

// Re-export main types
pub use algorithms::mst::{
    minimum_spanning_tree, minimum_spanning_tree_parallel, total_weight, MstAlgorithm,
};
pub use algorithms::scc::{strongly_connected_components, Components, SccAlgorithm};
pub use algorithms::shortest_path::{
    shortest_paths, PathReport, ShortestPathAlgorithm, ShortestPaths,
};
pub use algorithms::traversal::{
    breadth_first_search, depth_first_search, parent_map, reconstruct_path, traverse,
    traverse_parallel, Control, TraversalOrder, Visitor,
};
pub use algorithms::union_find::UnionFind;
pub use config::EngineConfig;
pub use models::{
    AdjacencyList, AdjacencyMatrix, Edge, GraphStore, NodeArena, NodeId, Representation,
    DEFAULT_WEIGHT,
};
pub use pool::WorkerPool;

/// Graph algorithm error types.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Referenced node is not part of the graph.
    #[error("Node not present in graph: {0}")]
    NodeAbsent(String),

    /// Node name already used in this graph.
    #[error("Duplicate node name: {0}")]
    DuplicateNode(String),

    /// No handle left for another node.
    #[error("Node arena is full ({0} nodes)")]
    ArenaFull(usize),

    /// Referenced edge is not part of the graph.
    #[error("Edge not present in graph: {from} -> {to}")]
    EdgeAbsent { from: String, to: String },

    /// Unknown algorithm or representation name.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// A negative-weight cycle is reachable from the source.
    #[error("Negative weight cycle detected")]
    NegativeCycle,

    /// Worker budget must be at least one.
    #[error("Invalid worker count: {0} (must be at least 1)")]
    InvalidWorkerCount(usize),

    /// Worker pool could not be created.
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
