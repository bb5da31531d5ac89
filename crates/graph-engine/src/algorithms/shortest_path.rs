//! Single-source shortest paths.
//!
//! Bellman-Ford relaxes every edge up to `|V| - 1` times and then makes one
//! more pass: any edge that still relaxes proves a negative-weight cycle
//! reachable from the source, and the whole computation is rejected.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::models::{GraphStore, NodeId};
use crate::{GraphError, Result};

/// Predecessor of each node on its shortest path (`None` for the source and
/// unreachable nodes).
pub type Predecessors = IndexMap<String, Option<String>>;

/// Shortest path algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShortestPathAlgorithm {
    /// Edge relaxation with negative cycle detection.
    #[default]
    BellmanFord,
}

impl FromStr for ShortestPathAlgorithm {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bellman_ford" | "bellman-ford" | "bellmanford" => {
                Ok(ShortestPathAlgorithm::BellmanFord)
            }
            other => Err(GraphError::NotImplemented(format!(
                "shortest path algorithm '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ShortestPathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortestPathAlgorithm::BellmanFord => write!(f, "bellman_ford"),
        }
    }
}

/// Distances and predecessors for every node, in node enumeration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    /// Distance from the source; `f64::INFINITY` if unreachable.
    pub distances: IndexMap<String, f64>,
    /// Predecessor on the shortest path.
    pub predecessors: Predecessors,
}

impl ShortestPaths {
    /// Distance to `target`, if it is a node of the graph.
    pub fn distance(&self, target: &str) -> Option<f64> {
        self.distances.get(target).copied()
    }

    /// Node names from the source to `target`.
    ///
    /// Returns `None` if `target` is unknown or unreachable.
    pub fn path_to(&self, target: &str) -> Option<Vec<String>> {
        if !self.distance(target)?.is_finite() {
            return None;
        }
        walk_predecessors(&self.predecessors, target)
    }
}

/// Result of [`shortest_paths`].
#[derive(Debug, Clone, PartialEq)]
pub enum PathReport {
    /// No target requested: every distance.
    All(ShortestPaths),
    /// Target requested: its distance plus the full predecessor map.
    Target {
        /// Distance from source to target.
        distance: f64,
        /// Predecessors for path reconstruction.
        predecessors: Predecessors,
    },
}

impl PathReport {
    /// Predecessor map, present in both variants.
    pub fn predecessors(&self) -> &Predecessors {
        match self {
            PathReport::All(paths) => &paths.predecessors,
            PathReport::Target { predecessors, .. } => predecessors,
        }
    }
}

/// Compute shortest paths from `source`, optionally narrowed to `target`.
///
/// # Errors
///
/// - [`GraphError::NodeAbsent`] if `source` or `target` is not in the graph
/// - [`GraphError::NegativeCycle`] if a negative cycle is reachable from `source`
pub fn shortest_paths<G: GraphStore>(
    graph: &G,
    algorithm: ShortestPathAlgorithm,
    source: &str,
    target: Option<&str>,
) -> Result<PathReport> {
    let src = graph.require_node(source)?;
    let dst = target.map(|t| graph.require_node(t)).transpose()?;

    debug!(
        "Computing shortest paths (algorithm={}, nodes={}, source={})",
        algorithm,
        graph.node_count(),
        source
    );

    let (distances, parents) = match algorithm {
        ShortestPathAlgorithm::BellmanFord => bellman_ford(graph, src)?,
    };

    let predecessors: Predecessors = graph
        .nodes()
        .into_iter()
        .map(|id| {
            let parent = parents[id.index()].map(|p| graph.name_of(p).to_string());
            (graph.name_of(id).to_string(), parent)
        })
        .collect();

    let report = match dst {
        Some(dst) => PathReport::Target {
            distance: distances[dst.index()],
            predecessors,
        },
        None => PathReport::All(ShortestPaths {
            distances: graph
                .nodes()
                .into_iter()
                .map(|id| (graph.name_of(id).to_string(), distances[id.index()]))
                .collect(),
            predecessors,
        }),
    };
    Ok(report)
}

fn bellman_ford<G: GraphStore>(
    graph: &G,
    source: NodeId,
) -> Result<(Vec<f64>, Vec<Option<NodeId>>)> {
    let n = graph.node_count();
    let edges = graph.edges();

    let mut distances = vec![f64::INFINITY; n];
    let mut parents: Vec<Option<NodeId>> = vec![None; n];
    distances[source.index()] = 0.0;

    for pass in 1..n {
        let mut changed = false;
        for edge in &edges {
            let du = distances[edge.source.index()];
            if du == f64::INFINITY {
                continue;
            }
            let candidate = du + edge.weight;
            if candidate < distances[edge.target.index()] {
                distances[edge.target.index()] = candidate;
                parents[edge.target.index()] = Some(edge.source);
                changed = true;
            }
        }
        if !changed {
            trace!("Relaxation converged after {} passes", pass);
            break;
        }
    }

    for edge in &edges {
        let du = distances[edge.source.index()];
        if du != f64::INFINITY && du + edge.weight < distances[edge.target.index()] {
            warn!(
                "Negative weight cycle through {} -> {}",
                graph.name_of(edge.source),
                graph.name_of(edge.target)
            );
            return Err(GraphError::NegativeCycle);
        }
    }

    Ok((distances, parents))
}

/// Follow predecessors from `target` back to the root.
fn walk_predecessors(predecessors: &Predecessors, target: &str) -> Option<Vec<String>> {
    let mut path = vec![target.to_string()];
    let mut current = target;

    while let Some(Some(parent)) = predecessors.get(current) {
        if path.len() > predecessors.len() {
            return None;
        }
        path.push(parent.clone());
        current = parent.as_str();
    }

    path.reverse();
    Some(path)
}
