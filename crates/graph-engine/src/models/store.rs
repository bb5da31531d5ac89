//! The graph store contract consumed by every algorithm.
//!
//! Algorithms only see handles, neighbor lists and weights through
//! [`GraphStore`], so list and matrix graphs run the same code paths and
//! differ only in neighbor enumeration order.

use std::fmt;
use std::str::FromStr;

use super::edge::{Edge, DEFAULT_WEIGHT};
use super::node::{NodeArena, NodeId};
use crate::{GraphError, Result};

/// Physical encoding of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// Per-node neighbor maps, neighbors in insertion order.
    #[default]
    List,
    /// Dense weight matrix, neighbors in ascending index order.
    Matrix,
}

impl FromStr for Representation {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" | "adjacency_list" => Ok(Representation::List),
            "matrix" | "adjacency_matrix" => Ok(Representation::Matrix),
            other => Err(GraphError::NotImplemented(format!(
                "graph representation '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::List => write!(f, "list"),
            Representation::Matrix => write!(f, "matrix"),
        }
    }
}

/// Directed, weighted graph storage.
///
/// Implementors provide the handle-level primitives; name-based helpers and
/// edge enumeration are derived from them.
pub trait GraphStore: Default + Sized + Send + Sync {
    /// Which encoding this store uses.
    fn representation(&self) -> Representation;

    /// Node arena backing this graph.
    fn arena(&self) -> &NodeArena;

    /// Add a node and return its handle.
    fn add_node(&mut self, name: &str) -> Result<NodeId>;

    /// Insert or overwrite the edge `source -> target`.
    ///
    /// Both handles must belong to this graph.
    fn insert_edge(&mut self, source: NodeId, target: NodeId, weight: f64);

    /// Delete the edge `source -> target`, returning its weight.
    fn delete_edge(&mut self, source: NodeId, target: NodeId) -> Option<f64>;

    /// Outgoing neighbors of `node` with edge weights, in enumeration order.
    fn neighbors(&self, node: NodeId) -> Vec<(NodeId, f64)>;

    /// Weight of the edge `source -> target`, if present.
    fn edge_weight(&self, source: NodeId, target: NodeId) -> Option<f64>;

    /// A graph with the same nodes and no edges.
    fn empty_like(&self) -> Self;

    /// A graph with the same nodes and every edge reversed.
    fn transpose(&self) -> Self {
        let mut reversed = self.empty_like();
        for edge in self.edges() {
            reversed.insert_edge(edge.target, edge.source, edge.weight);
        }
        reversed
    }

    /// Build a graph from node names.
    fn with_nodes<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut graph = Self::default();
        for name in names {
            graph.add_node(name.as_ref())?;
        }
        Ok(graph)
    }

    /// Number of nodes.
    fn node_count(&self) -> usize {
        self.arena().len()
    }

    /// All node handles in enumeration order.
    fn nodes(&self) -> Vec<NodeId> {
        self.arena().ids().collect()
    }

    /// Handle for a node name.
    fn node_id(&self, name: &str) -> Option<NodeId> {
        self.arena().id(name)
    }

    /// Name for a node handle.
    fn node_name(&self, id: NodeId) -> Option<&str> {
        self.arena().name(id)
    }

    /// Check if a node name exists.
    fn has_node(&self, name: &str) -> bool {
        self.arena().id(name).is_some()
    }

    /// Handle for a node name, failing with [`GraphError::NodeAbsent`].
    fn require_node(&self, name: &str) -> Result<NodeId> {
        self.node_id(name)
            .ok_or_else(|| GraphError::NodeAbsent(name.to_string()))
    }

    /// Name for a handle, or an empty string for foreign handles.
    fn name_of(&self, id: NodeId) -> &str {
        self.node_name(id).unwrap_or_default()
    }

    /// Add a directed edge by node names.
    fn add_edge(&mut self, source: &str, target: &str, weight: f64) -> Result<()> {
        let src = self.require_node(source)?;
        let dst = self.require_node(target)?;
        self.insert_edge(src, dst, weight);
        Ok(())
    }

    /// Add a directed edge with the default weight.
    fn add_unweighted_edge(&mut self, source: &str, target: &str) -> Result<()> {
        self.add_edge(source, target, DEFAULT_WEIGHT)
    }

    /// Add the edge pair `source -> target` and `target -> source`.
    fn add_undirected_edge(&mut self, source: &str, target: &str, weight: f64) -> Result<()> {
        self.add_edge(source, target, weight)?;
        self.add_edge(target, source, weight)
    }

    /// Remove a directed edge by node names, returning its weight.
    fn remove_edge(&mut self, source: &str, target: &str) -> Result<f64> {
        let src = self.require_node(source)?;
        let dst = self.require_node(target)?;
        self.delete_edge(src, dst).ok_or_else(|| GraphError::EdgeAbsent {
            from: source.to_string(),
            to: target.to_string(),
        })
    }

    /// Weight of an edge looked up by node names.
    fn edge_weight_by_name(&self, source: &str, target: &str) -> Option<f64> {
        let src = self.node_id(source)?;
        let dst = self.node_id(target)?;
        self.edge_weight(src, dst)
    }

    /// Every edge, node-major in enumeration order.
    fn edges(&self) -> Vec<Edge> {
        self.nodes()
            .into_iter()
            .flat_map(|source| {
                self.neighbors(source)
                    .into_iter()
                    .map(move |(target, weight)| Edge::new(source, target, weight))
            })
            .collect()
    }

    /// Number of directed edges.
    fn edge_count(&self) -> usize {
        self.nodes()
            .into_iter()
            .map(|node| self.neighbors(node).len())
            .sum()
    }
}
