//! Dense adjacency matrix representation.
//!
//! Memory layout:
//! - `weights[row * dim + col]` = weight of edge `row -> col`, or `None`
//! - Neighbors of a row are enumerated in ascending column (node index) order
//!
//! Adding a node re-lays the matrix out with the larger dimension.

use super::node::{NodeArena, NodeId};
use super::store::{GraphStore, Representation};
use crate::Result;

/// Directed weighted graph stored as a dense `n x n` matrix.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyMatrix {
    arena: NodeArena,
    /// Matrix dimension (equals node count).
    dim: usize,
    /// Row-major edge weights (length = dim * dim).
    weights: Vec<Option<f64>>,
}

impl AdjacencyMatrix {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    fn slot(&self, source: NodeId, target: NodeId) -> Option<usize> {
        let (row, col) = (source.index(), target.index());
        if row < self.dim && col < self.dim {
            Some(row * self.dim + col)
        } else {
            None
        }
    }

    fn grow(&mut self, new_dim: usize) {
        let mut weights = vec![None; new_dim * new_dim];
        for row in 0..self.dim {
            let old = &self.weights[row * self.dim..(row + 1) * self.dim];
            weights[row * new_dim..row * new_dim + self.dim].copy_from_slice(old);
        }
        self.weights = weights;
        self.dim = new_dim;
    }
}

impl GraphStore for AdjacencyMatrix {
    fn representation(&self) -> Representation {
        Representation::Matrix
    }

    fn arena(&self) -> &NodeArena {
        &self.arena
    }

    fn add_node(&mut self, name: &str) -> Result<NodeId> {
        let id = self.arena.insert(name)?;
        self.grow(self.arena.len());
        Ok(id)
    }

    fn insert_edge(&mut self, source: NodeId, target: NodeId, weight: f64) {
        if let Some(slot) = self.slot(source, target) {
            self.weights[slot] = Some(weight);
        }
    }

    fn delete_edge(&mut self, source: NodeId, target: NodeId) -> Option<f64> {
        let slot = self.slot(source, target)?;
        self.weights[slot].take()
    }

    fn neighbors(&self, node: NodeId) -> Vec<(NodeId, f64)> {
        let row = node.index();
        if row >= self.dim {
            return Vec::new();
        }
        self.weights[row * self.dim..(row + 1) * self.dim]
            .iter()
            .enumerate()
            .filter_map(|(col, w)| w.map(|w| (NodeId::from(col), w)))
            .collect()
    }

    fn edge_weight(&self, source: NodeId, target: NodeId) -> Option<f64> {
        self.slot(source, target).and_then(|slot| self.weights[slot])
    }

    fn empty_like(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            dim: self.dim,
            weights: vec![None; self.dim * self.dim],
        }
    }

    fn transpose(&self) -> Self {
        let mut transposed = self.empty_like();
        for row in 0..self.dim {
            for col in 0..self.dim {
                transposed.weights[col * self.dim + row] = self.weights[row * self.dim + col];
            }
        }
        transposed
    }

    fn edge_count(&self) -> usize {
        self.weights.iter().filter(|w| w.is_some()).count()
    }
}
