//! Strongly Connected Components (SCC).
//!
//! A strongly connected component is a maximal set of nodes where every node
//! can reach every other node. Components are found with Kosaraju's two-pass
//! algorithm:
//! 1. DFS on the original graph, record finish order
//! 2. DFS on the transposed graph in reverse finish order; each tree is one SCC
//!
//! Both passes use an explicit stack, so deep graphs cannot overflow the call stack.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::models::{GraphStore, NodeId};
use crate::{GraphError, Result};

/// Components as sets of node names.
pub type Components = BTreeSet<BTreeSet<String>>;

/// SCC algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SccAlgorithm {
    /// Two-pass finish-order / transpose DFS.
    #[default]
    Kosaraju,
}

impl FromStr for SccAlgorithm {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kosaraju" => Ok(SccAlgorithm::Kosaraju),
            other => Err(GraphError::NotImplemented(format!(
                "strongly connected components algorithm '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for SccAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SccAlgorithm::Kosaraju => write!(f, "kosaraju"),
        }
    }
}

/// Partition the nodes of `graph` into strongly connected components.
///
/// Every node appears in exactly one component; isolated nodes form
/// singletons.
pub fn strongly_connected_components<G: GraphStore>(
    graph: &G,
    algorithm: SccAlgorithm,
) -> Result<Components> {
    debug!(
        "Computing SCCs (algorithm={}, nodes={}, edges={})",
        algorithm,
        graph.node_count(),
        graph.edge_count()
    );

    match algorithm {
        SccAlgorithm::Kosaraju => Ok(kosaraju(graph)),
    }
}

fn kosaraju<G: GraphStore>(graph: &G) -> Components {
    let n = graph.node_count();
    if n == 0 {
        return Components::new();
    }

    // Pass 1: DFS on original graph, record finish order
    let mut visited = vec![false; n];
    let mut finish_order = Vec::with_capacity(n);

    for start in graph.nodes() {
        if !visited[start.index()] {
            dfs_finish_order(graph, start, &mut visited, &mut finish_order);
        }
    }

    let transposed = graph.transpose();

    // Pass 2: DFS on transposed graph in reverse finish order
    let mut components = Components::new();
    visited.fill(false);

    for &node in finish_order.iter().rev() {
        if !visited[node.index()] {
            let members = dfs_collect(&transposed, node, &mut visited);
            components.insert(
                members
                    .into_iter()
                    .map(|id| graph.name_of(id).to_string())
                    .collect(),
            );
        }
    }

    debug!("Found {} strongly connected components", components.len());
    components
}

/// DFS to record finish order.
fn dfs_finish_order<G: GraphStore>(
    graph: &G,
    start: NodeId,
    visited: &mut [bool],
    finish_order: &mut Vec<NodeId>,
) {
    let mut stack = vec![(start, false)]; // (node, children done)

    while let Some((node, done)) = stack.pop() {
        if done {
            finish_order.push(node);
            continue;
        }

        if visited[node.index()] {
            continue;
        }
        visited[node.index()] = true;

        // Revisit this node after its children to record the finish
        stack.push((node, true));

        // Reversed so children are explored in enumeration order
        for (neighbor, _) in graph.neighbors(node).into_iter().rev() {
            if !visited[neighbor.index()] {
                stack.push((neighbor, false));
            }
        }
    }
}

/// DFS collecting every node reachable from `start` that is not yet visited.
fn dfs_collect<G: GraphStore>(graph: &G, start: NodeId, visited: &mut [bool]) -> Vec<NodeId> {
    let mut stack = vec![start];
    let mut members = Vec::new();

    while let Some(node) = stack.pop() {
        if visited[node.index()] {
            continue;
        }
        visited[node.index()] = true;
        members.push(node);

        for (neighbor, _) in graph.neighbors(node) {
            if !visited[neighbor.index()] {
                stack.push(neighbor);
            }
        }
    }

    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdjacencyList, AdjacencyMatrix};

    fn graph_from<G: GraphStore>(nodes: &[&str], edges: &[(&str, &str)]) -> G {
        let mut graph = G::with_nodes(nodes.iter().copied()).unwrap();
        for &(s, d) in edges {
            graph.add_unweighted_edge(s, d).unwrap();
        }
        graph
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_node() {
        let graph: AdjacencyList = graph_from(&["a"], &[]);
        let components = strongly_connected_components(&graph, SccAlgorithm::Kosaraju).unwrap();
        assert_eq!(components, Components::from([set(&["a"])]));
    }

    #[test]
    fn test_line_graph_sccs() {
        // Each node is its own SCC (no cycles)
        let graph: AdjacencyMatrix =
            graph_from(&["0", "1", "2", "3"], &[("0", "1"), ("1", "2"), ("2", "3")]);
        let components = strongly_connected_components(&graph, SccAlgorithm::Kosaraju).unwrap();
        assert_eq!(components.len(), 4);
    }

    #[test]
    fn test_cycle_scc() {
        let graph: AdjacencyList =
            graph_from(&["0", "1", "2"], &[("0", "1"), ("1", "2"), ("2", "0")]);
        let components = strongly_connected_components(&graph, SccAlgorithm::Kosaraju).unwrap();
        assert_eq!(components, Components::from([set(&["0", "1", "2"])]));
    }

    #[test]
    fn test_two_sccs_and_isolated_node() {
        // Two cycles: 0 <-> 1, 2 <-> 3, with 1 -> 2; node 4 isolated with a self-loop
        let graph: AdjacencyMatrix = graph_from(
            &["0", "1", "2", "3", "4"],
            &[("0", "1"), ("1", "0"), ("1", "2"), ("2", "3"), ("3", "2"), ("4", "4")],
        );
        let components = strongly_connected_components(&graph, SccAlgorithm::Kosaraju).unwrap();
        assert_eq!(
            components,
            Components::from([set(&["0", "1"]), set(&["2", "3"]), set(&["4"])])
        );
    }

    #[test]
    fn test_empty_graph() {
        let graph = AdjacencyList::new();
        let components = strongly_connected_components(&graph, SccAlgorithm::Kosaraju).unwrap();
        assert!(components.is_empty());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let n = 50_000;
        let mut graph = AdjacencyList::with_nodes((0..n).map(|i| i.to_string())).unwrap();
        for i in 0..n {
            graph
                .add_unweighted_edge(&i.to_string(), &((i + 1) % n).to_string())
                .unwrap();
        }
        let components = strongly_connected_components(&graph, SccAlgorithm::Kosaraju).unwrap();
        assert_eq!(components.len(), 1);
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!("kosaraju".parse::<SccAlgorithm>().unwrap(), SccAlgorithm::Kosaraju);
        assert!(matches!(
            "tarjan".parse::<SccAlgorithm>(),
            Err(GraphError::NotImplemented(_))
        ));
    }
}
