//! Directed weighted edges.

use super::node::NodeId;

/// Weight given to edges added without an explicit weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A directed edge `source -> target` with a weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Tail of the edge.
    pub source: NodeId,
    /// Head of the edge.
    pub target: NodeId,
    /// Edge weight.
    pub weight: f64,
}

impl Edge {
    /// Create a new edge.
    pub const fn new(source: NodeId, target: NodeId, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// Same endpoints swapped.
    pub const fn reversed(&self) -> Self {
        Self::new(self.target, self.source, self.weight)
    }

    /// Check for a self-loop.
    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }
}
