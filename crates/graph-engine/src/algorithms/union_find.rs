//! Disjoint sets of node handles, used by Kruskal to reject cycle-forming edges.
//!
//! Merges hang the lower-rank root under the higher-rank one, and lookups
//! compress by halving the path they walk, so repeated `find` calls flatten the
//! forest without a second pass.

use std::cmp::Ordering;

use crate::models::NodeId;

/// Forest of node sets over handles `0..n`.
#[derive(Debug, Clone)]
pub struct UnionFind {
    /// `parent[i]` is the next handle towards the root; roots point at themselves.
    parent: Vec<NodeId>,
    /// Upper bound on tree height, meaningful for roots only.
    rank: Vec<u8>,
    /// Member count, meaningful for roots only.
    size: Vec<usize>,
    sets: usize,
}

impl UnionFind {
    /// One singleton set per handle in `0..n`.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).map(NodeId::from).collect(),
            rank: vec![0; n],
            size: vec![1; n],
            sets: n,
        }
    }

    /// Number of handles tracked.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Check if no handles are tracked.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets.
    pub fn num_sets(&self) -> usize {
        self.sets
    }

    /// Root of the set holding `node`.
    pub fn find(&mut self, node: NodeId) -> NodeId {
        let mut current = node;
        loop {
            let parent = self.parent[current.index()];
            if parent == current {
                return current;
            }
            // Skip a level on the way up
            let grandparent = self.parent[parent.index()];
            self.parent[current.index()] = grandparent;
            current = grandparent;
        }
    }

    /// Join the sets of `a` and `b`.
    ///
    /// Returns the root of the merged set, or `None` if both were already in
    /// the same set.
    pub fn merge(&mut self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return None;
        }

        let (keep, absorb) = match self.rank[root_a.index()].cmp(&self.rank[root_b.index()]) {
            Ordering::Less => (root_b, root_a),
            Ordering::Greater => (root_a, root_b),
            Ordering::Equal => {
                self.rank[root_a.index()] += 1;
                (root_a, root_b)
            }
        };
        self.parent[absorb.index()] = keep;
        self.size[keep.index()] += self.size[absorb.index()];
        self.sets -= 1;
        Some(keep)
    }

    /// Size of the set holding `node`.
    pub fn set_size(&mut self, node: NodeId) -> usize {
        let root = self.find(node);
        self.size[root.index()]
    }

    /// Check if two handles share a set.
    pub fn connected(&mut self, a: NodeId, b: NodeId) -> bool {
        self.find(a) == self.find(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_sets() {
        let mut uf = UnionFind::new(5);
        assert_eq!(uf.num_sets(), 5);
        assert_eq!(uf.len(), 5);

        for i in 0..5 {
            assert_eq!(uf.find(NodeId(i)), NodeId(i));
            assert_eq!(uf.set_size(NodeId(i)), 1);
        }
    }

    #[test]
    fn test_merge_basic() {
        let mut uf = UnionFind::new(5);

        assert!(uf.merge(NodeId(0), NodeId(1)).is_some());
        assert_eq!(uf.num_sets(), 4);
        assert!(uf.connected(NodeId(0), NodeId(1)));

        assert!(uf.merge(NodeId(2), NodeId(3)).is_some());
        assert_eq!(uf.num_sets(), 3);

        assert!(uf.merge(NodeId(0), NodeId(2)).is_some());
        assert_eq!(uf.num_sets(), 2);
        assert!(uf.connected(NodeId(0), NodeId(3)));
        assert!(!uf.connected(NodeId(0), NodeId(4)));
        assert_eq!(uf.set_size(NodeId(3)), 4);
    }

    #[test]
    fn test_merge_same_set() {
        let mut uf = UnionFind::new(3);

        uf.merge(NodeId(0), NodeId(1));
        uf.merge(NodeId(1), NodeId(2));
        assert!(uf.connected(NodeId(0), NodeId(2)));

        assert_eq!(uf.merge(NodeId(0), NodeId(2)), None);
        assert_eq!(uf.num_sets(), 1);
    }

    #[test]
    fn test_higher_rank_keeps_root() {
        let mut uf = UnionFind::new(4);
        let root = uf.merge(NodeId(0), NodeId(1)).unwrap();
        assert_eq!(root, NodeId(0));

        // Rank-0 singletons hang under the pair's root in either argument order
        assert_eq!(uf.merge(NodeId(2), NodeId(1)), Some(root));
        assert_eq!(uf.merge(NodeId(3), NodeId(3)), None);
        assert_eq!(uf.merge(NodeId(3), NodeId(2)), Some(root));
        assert_eq!(uf.find(NodeId(3)), root);
        assert_eq!(uf.set_size(NodeId(0)), 4);
    }

    #[test]
    fn test_find_halves_long_chains() {
        // Hand-built chain 9 -> 8 -> ... -> 0
        let mut uf = UnionFind::new(10);
        for i in 1..10u32 {
            uf.parent[i as usize] = NodeId(i - 1);
        }

        assert_eq!(uf.find(NodeId(9)), NodeId(0));
        // Every visited node now skips its old parent
        assert_eq!(uf.parent[9], NodeId(7));
        assert_eq!(uf.parent[7], NodeId(5));

        for i in 0..10 {
            assert_eq!(uf.find(NodeId(i)), NodeId(0));
        }
    }

    #[test]
    fn test_empty_union_find() {
        let uf = UnionFind::new(0);
        assert!(uf.is_empty());
        assert_eq!(uf.num_sets(), 0);
    }
}
