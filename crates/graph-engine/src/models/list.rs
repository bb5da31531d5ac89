//! Adjacency list representation.
//!
//! Each node owns an insertion-ordered map from neighbor handle to weight:
//! - O(1) edge lookup, insertion and removal
//! - O(degree) neighbor iteration in insertion order
//! - Removal keeps the relative order of the remaining neighbors

use indexmap::IndexMap;

use super::node::{NodeArena, NodeId};
use super::store::{GraphStore, Representation};
use crate::Result;

/// Directed weighted graph stored as per-node neighbor maps.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyList {
    arena: NodeArena,
    /// `adjacency[i]` = outgoing edges of node i keyed by target.
    adjacency: Vec<IndexMap<NodeId, f64>>,
}

impl AdjacencyList {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Out-degree of a node.
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency.get(node.index()).map_or(0, IndexMap::len)
    }
}

impl GraphStore for AdjacencyList {
    fn representation(&self) -> Representation {
        Representation::List
    }

    fn arena(&self) -> &NodeArena {
        &self.arena
    }

    fn add_node(&mut self, name: &str) -> Result<NodeId> {
        let id = self.arena.insert(name)?;
        self.adjacency.push(IndexMap::new());
        Ok(id)
    }

    fn insert_edge(&mut self, source: NodeId, target: NodeId, weight: f64) {
        // Foreign handles are ignored, as in the matrix
        if !self.arena.contains(target) {
            return;
        }
        if let Some(row) = self.adjacency.get_mut(source.index()) {
            row.insert(target, weight);
        }
    }

    fn delete_edge(&mut self, source: NodeId, target: NodeId) -> Option<f64> {
        self.adjacency
            .get_mut(source.index())
            .and_then(|row| row.shift_remove(&target))
    }

    fn neighbors(&self, node: NodeId) -> Vec<(NodeId, f64)> {
        match self.adjacency.get(node.index()) {
            Some(row) => row.iter().map(|(&target, &w)| (target, w)).collect(),
            None => Vec::new(),
        }
    }

    fn edge_weight(&self, source: NodeId, target: NodeId) -> Option<f64> {
        self.adjacency
            .get(source.index())
            .and_then(|row| row.get(&target).copied())
    }

    fn empty_like(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            adjacency: vec![IndexMap::new(); self.arena.len()],
        }
    }

    fn edge_count(&self) -> usize {
        self.adjacency.iter().map(IndexMap::len).sum()
    }
}
