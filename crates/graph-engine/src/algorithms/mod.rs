//! Graph algorithms.
//!
//! This module provides the algorithm engines:
//! - [`traversal`]: Visitor-driven BFS/DFS and parallel BFS
//! - [`mst`]: Minimum spanning trees (Kruskal, Prim)
//! - [`scc`]: Strongly connected components (Kosaraju)
//! - [`shortest_path`]: Single-source shortest paths (Bellman-Ford)
//! - [`union_find`]: Disjoint set data structure

pub mod mst;
pub mod scc;
pub mod shortest_path;
pub mod traversal;
pub mod union_find;

pub use mst::{minimum_spanning_tree, minimum_spanning_tree_parallel, MstAlgorithm};
pub use scc::{strongly_connected_components, Components, SccAlgorithm};
pub use shortest_path::{shortest_paths, PathReport, ShortestPathAlgorithm, ShortestPaths};
pub use traversal::{traverse, traverse_parallel, Control, TraversalOrder, Visitor};
pub use union_find::UnionFind;
