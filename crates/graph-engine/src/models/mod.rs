//! Graph data models.
//!
//! This module provides the graph store consumed by the algorithms:
//! - [`GraphStore`]: Representation-agnostic graph contract
//! - [`AdjacencyList`], [`AdjacencyMatrix`]: The two physical encodings
//! - [`NodeId`], [`NodeArena`], [`Edge`]: Handles, names and edges

pub mod edge;
pub mod list;
pub mod matrix;
pub mod node;
pub mod store;

pub use edge::{Edge, DEFAULT_WEIGHT};
pub use list::AdjacencyList;
pub use matrix::AdjacencyMatrix;
pub use node::{NodeArena, NodeId};
pub use store::{GraphStore, Representation};
