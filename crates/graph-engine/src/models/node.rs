//! Node handles and the node arena.
//!
//! Nodes never reference each other directly. Every node is a stable integer
//! handle into a [`NodeArena`], and edges are stored by handle pair in the
//! representation that owns the arena.
//!
//! - [`NodeId`]: Stable handle for a graph vertex
//! - [`NodeArena`]: Ordered node names with a name-to-handle index

use std::collections::HashMap;

use crate::{GraphError, Result};

/// Node identifier (vertex handle).
///
/// Using a newtype prevents mixing up node handles with other integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Invalid/sentinel node ID.
    pub const INVALID: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    pub const fn new(id: u32) -> Self {
        NodeId(id)
    }

    /// Check if this is a valid node ID.
    pub const fn is_valid(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Get the inner value.
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Position of this node in dense tables.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId(id)
    }
}

/// Positions must be below [`MAX_NODES`], which every arena handle is.
impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        NodeId(id as u32)
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0 as usize
    }
}

/// Largest number of nodes an arena holds; `u32::MAX` is reserved for [`NodeId::INVALID`].
pub const MAX_NODES: usize = u32::MAX as usize;

/// Handle for the node at `position`, if it fits below the sentinel.
fn handle_for(position: usize) -> Result<NodeId> {
    u32::try_from(position)
        .ok()
        .map(NodeId)
        .filter(NodeId::is_valid)
        .ok_or(GraphError::ArenaFull(MAX_NODES))
}

/// Arena of node names.
///
/// Handles are assigned densely in insertion order and never change, so the
/// arena can be cloned into a derived graph (transpose, spanning tree) and the
/// handles stay meaningful there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeArena {
    names: Vec<String>,
    index: HashMap<String, NodeId>,
}

impl NodeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Insert a new node name and return its handle.
    pub fn insert(&mut self, name: &str) -> Result<NodeId> {
        if self.index.contains_key(name) {
            return Err(GraphError::DuplicateNode(name.to_string()));
        }
        let id = handle_for(self.names.len())?;
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Look up a handle by name.
    pub fn id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Look up a name by handle.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    /// All handles in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.names.len()).map(NodeId::from)
    }

    /// Check if a handle belongs to this arena.
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_stop_below_sentinel() {
        assert_eq!(handle_for(0).unwrap(), NodeId(0));
        assert_eq!(handle_for(MAX_NODES - 1).unwrap(), NodeId(u32::MAX - 1));
        assert!(matches!(
            handle_for(MAX_NODES),
            Err(GraphError::ArenaFull(MAX_NODES))
        ));
        assert!(handle_for(usize::MAX).is_err());
    }

    #[test]
    fn test_node_id_basics() {
        let node = NodeId::new(42);
        assert_eq!(node.get(), 42);
        assert_eq!(node.index(), 42);
        assert!(node.is_valid());
        assert!(!NodeId::INVALID.is_valid());
    }

    #[test]
    fn test_node_id_conversions() {
        let node: NodeId = 100u32.into();
        assert_eq!(node.get(), 100);

        let idx: usize = node.into();
        assert_eq!(idx, 100);
    }

    #[test]
    fn test_arena_assigns_dense_handles() {
        let mut arena = NodeArena::new();
        let a = arena.insert("a").unwrap();
        let b = arena.insert("b").unwrap();

        assert_eq!(a, NodeId(0));
        assert_eq!(b, NodeId(1));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.id("b"), Some(b));
        assert_eq!(arena.name(a), Some("a"));
        assert_eq!(arena.ids().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_arena_rejects_duplicates() {
        let mut arena = NodeArena::new();
        arena.insert("x").unwrap();
        let result = arena.insert("x");
        assert!(matches!(result, Err(GraphError::DuplicateNode(name)) if name == "x"));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_arena_unknown_lookups() {
        let arena = NodeArena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.id("missing"), None);
        assert_eq!(arena.name(NodeId(3)), None);
        assert!(!arena.contains(NodeId(0)));
    }
}
