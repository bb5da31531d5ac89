//! Visitor-driven graph traversal.
//!
//! The traversal engine holds no result state. Callers extract parent maps,
//! paths or trees through a [`Visitor`] that is invoked once per discovered
//! edge `(current, Some(next))`, and once with `(current, None)` when a node
//! is fully expanded without discovering anything new.
//!
//! The parallel version is level-synchronous BFS: every node of the current
//! level is expanded by a pool task, and one lock serializes the visited set
//! and the visitor so each node gets exactly one parent.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::models::{GraphStore, NodeId};
use crate::pool::WorkerPool;
use crate::{GraphError, Result};

/// Visitor verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep traversing.
    Continue,
    /// Terminate the traversal now.
    Stop,
}

impl Control {
    /// Map a boolean "keep going" flag to a verdict.
    pub fn from_continue(keep_going: bool) -> Self {
        if keep_going {
            Control::Continue
        } else {
            Control::Stop
        }
    }
}

/// Per-edge traversal callback.
///
/// `next` is `None` when `current` had no unvisited neighbor to report.
pub trait Visitor {
    /// Handle one traversal step.
    fn visit(&mut self, current: NodeId, next: Option<NodeId>) -> Control;
}

impl<F> Visitor for F
where
    F: FnMut(NodeId, Option<NodeId>) -> Control,
{
    fn visit(&mut self, current: NodeId, next: Option<NodeId>) -> Control {
        self(current, next)
    }
}

/// Frontier discipline for [`traverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// FIFO frontier.
    #[default]
    BreadthFirst,
    /// LIFO frontier.
    DepthFirst,
}

impl FromStr for TraversalOrder {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth_first" | "breadth-first" => Ok(TraversalOrder::BreadthFirst),
            "dfs" | "depth_first" | "depth-first" => Ok(TraversalOrder::DepthFirst),
            other => Err(GraphError::NotImplemented(format!(
                "traversal order '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalOrder::BreadthFirst => write!(f, "bfs"),
            TraversalOrder::DepthFirst => write!(f, "dfs"),
        }
    }
}

/// Walk the graph from `source`, reporting every discovered edge to `visitor`.
///
/// Neighbors are reported in the order the store enumerates them. A node is
/// marked visited before the visitor sees the edge leading to it, so every
/// reachable node is reported exactly once.
///
/// # Errors
///
/// [`GraphError::NodeAbsent`] if `source` is not in the graph.
pub fn traverse<G, V>(
    graph: &G,
    source: &str,
    order: TraversalOrder,
    mut visitor: V,
) -> Result<()>
where
    G: GraphStore,
    V: Visitor,
{
    let source = graph.require_node(source)?;

    debug!(
        "Starting {} traversal (nodes={}, source={:?})",
        order,
        graph.node_count(),
        source
    );

    let mut visited = vec![false; graph.node_count()];
    visited[source.index()] = true;

    let mut frontier = VecDeque::from([source]);

    loop {
        let current = match order {
            TraversalOrder::BreadthFirst => frontier.pop_front(),
            TraversalOrder::DepthFirst => frontier.pop_back(),
        };
        let Some(current) = current else {
            break;
        };

        let mut expanded = false;
        for (next, _) in graph.neighbors(current) {
            if visited[next.index()] {
                continue;
            }
            visited[next.index()] = true;
            expanded = true;

            if visitor.visit(current, Some(next)) == Control::Stop {
                trace!("Traversal stopped by visitor at {:?}", current);
                return Ok(());
            }
            frontier.push_back(next);
        }

        if !expanded && visitor.visit(current, None) == Control::Stop {
            trace!("Traversal stopped by visitor at {:?}", current);
            return Ok(());
        }
    }

    Ok(())
}

/// Breadth-first [`traverse`].
pub fn breadth_first_search<G, V>(graph: &G, source: &str, visitor: V) -> Result<()>
where
    G: GraphStore,
    V: Visitor,
{
    traverse(graph, source, TraversalOrder::BreadthFirst, visitor)
}

/// Depth-first [`traverse`].
pub fn depth_first_search<G, V>(graph: &G, source: &str, visitor: V) -> Result<()>
where
    G: GraphStore,
    V: Visitor,
{
    traverse(graph, source, TraversalOrder::DepthFirst, visitor)
}

/// Shared state of one parallel traversal, guarded by a single lock.
struct LevelState<V> {
    visited: Vec<bool>,
    next_level: Vec<NodeId>,
    stopped: bool,
    visitor: V,
}

/// Level-synchronous parallel BFS with `worker_count` workers.
///
/// Relative visitor order between levels is preserved; within a level it is
/// unspecified, so among several shortest-hop parents the one reported for a
/// node is whichever task claims it first. When the visitor returns
/// [`Control::Stop`], the task that received it ends, the other tasks of the
/// current level still run to completion, and no further level is started.
///
/// # Errors
///
/// [`GraphError::NodeAbsent`] if `source` is not in the graph,
/// [`GraphError::InvalidWorkerCount`] if `worker_count` is zero.
pub fn traverse_parallel<G, V>(
    graph: &G,
    source: &str,
    worker_count: usize,
    visitor: V,
) -> Result<()>
where
    G: GraphStore,
    V: Visitor + Send,
{
    let source = graph.require_node(source)?;
    let pool = WorkerPool::new(worker_count)?;

    debug!(
        "Starting parallel bfs (nodes={}, source={:?}, workers={})",
        graph.node_count(),
        source,
        worker_count
    );

    let mut visited = vec![false; graph.node_count()];
    visited[source.index()] = true;

    let state = Mutex::new(LevelState {
        visited,
        next_level: Vec::new(),
        stopped: false,
        visitor,
    });

    let mut frontier = vec![source];
    let mut level = 0usize;

    while !frontier.is_empty() {
        trace!("Expanding level {} ({} nodes)", level, frontier.len());

        pool.scope(|s| {
            for &current in &frontier {
                let state = &state;
                s.spawn(move |_| expand_node(graph, current, state));
            }
        });

        let mut guard = state.lock();
        if guard.stopped {
            trace!("Parallel traversal stopped by visitor after level {}", level);
            break;
        }
        frontier = std::mem::take(&mut guard.next_level);
        level += 1;
    }

    Ok(())
}

/// Expand one frontier node on a worker.
fn expand_node<G, V>(graph: &G, current: NodeId, state: &Mutex<LevelState<V>>)
where
    G: GraphStore,
    V: Visitor,
{
    let mut expanded = false;

    for (next, _) in graph.neighbors(current) {
        let mut guard = state.lock();
        if guard.visited[next.index()] {
            continue;
        }
        guard.visited[next.index()] = true;
        guard.next_level.push(next);
        expanded = true;

        if guard.visitor.visit(current, Some(next)) == Control::Stop {
            // Ends this task only; siblings in the level run to completion
            guard.stopped = true;
            return;
        }
    }

    if !expanded {
        let mut guard = state.lock();
        if guard.visitor.visit(current, None) == Control::Stop {
            guard.stopped = true;
        }
    }
}

/// Traversal tree as `child -> parent`.
pub fn parent_map<G: GraphStore>(
    graph: &G,
    source: &str,
    order: TraversalOrder,
) -> Result<HashMap<NodeId, NodeId>> {
    let mut parents = HashMap::new();
    traverse(graph, source, order, |current: NodeId, next: Option<NodeId>| {
        if let Some(next) = next {
            parents.insert(next, current);
        }
        Control::Continue
    })?;
    Ok(parents)
}

/// Reconstruct the path from the traversal root to `target` using parent pointers.
///
/// Returns `None` if the parent chain is cyclic.
pub fn reconstruct_path(
    parents: &HashMap<NodeId, NodeId>,
    target: NodeId,
) -> Option<Vec<NodeId>> {
    let mut path = vec![target];
    let mut current = target;

    while let Some(&parent) = parents.get(&current) {
        if path.len() > parents.len() {
            return None;
        }
        path.push(parent);
        current = parent;
    }

    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdjacencyList, AdjacencyMatrix};

    fn make_line_graph<G: GraphStore>(n: usize) -> G {
        // 0 -> 1 -> 2 -> ... -> n-1
        let mut graph = G::with_nodes((0..n).map(|i| i.to_string())).unwrap();
        for i in 0..n - 1 {
            graph
                .add_unweighted_edge(&i.to_string(), &(i + 1).to_string())
                .unwrap();
        }
        graph
    }

    fn collect_steps<G: GraphStore>(
        graph: &G,
        order: TraversalOrder,
    ) -> Vec<(NodeId, Option<NodeId>)> {
        let mut steps = Vec::new();
        traverse(graph, "0", order, |c: NodeId, n: Option<NodeId>| {
            steps.push((c, n));
            Control::Continue
        })
        .unwrap();
        steps
    }

    #[test]
    fn test_line_graph_steps_and_sentinel() {
        let graph: AdjacencyList = make_line_graph(3);
        let steps = collect_steps(&graph, TraversalOrder::BreadthFirst);
        assert_eq!(
            steps,
            vec![
                (NodeId(0), Some(NodeId(1))),
                (NodeId(1), Some(NodeId(2))),
                (NodeId(2), None),
            ]
        );
    }

    #[test]
    fn test_bfs_visits_by_level() {
        // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3
        let mut graph = AdjacencyMatrix::with_nodes(["0", "1", "2", "3"]).unwrap();
        for (s, d) in [("0", "1"), ("0", "2"), ("1", "3"), ("2", "3")] {
            graph.add_unweighted_edge(s, d).unwrap();
        }

        let parents = parent_map(&graph, "0", TraversalOrder::BreadthFirst).unwrap();
        assert_eq!(parents[&NodeId(1)], NodeId(0));
        assert_eq!(parents[&NodeId(2)], NodeId(0));
        assert_eq!(parents[&NodeId(3)], NodeId(1));
        assert!(!parents.contains_key(&NodeId(0)));
    }

    #[test]
    fn test_dfs_pops_most_recent() {
        // 0 -> 1, 0 -> 2, 2 -> 3
        let mut graph = AdjacencyList::with_nodes(["0", "1", "2", "3"]).unwrap();
        for (s, d) in [("0", "1"), ("0", "2"), ("2", "3")] {
            graph.add_unweighted_edge(s, d).unwrap();
        }

        let steps = collect_steps(&graph, TraversalOrder::DepthFirst);
        // Node 2 is expanded before node 1
        assert_eq!(steps[2], (NodeId(2), Some(NodeId(3))));
        assert_eq!(steps.len(), 5);
    }

    #[test]
    fn test_stop_terminates_immediately() {
        let graph: AdjacencyList = make_line_graph(5);
        let mut calls = 0;
        let visitor = |_: NodeId, _: Option<NodeId>| {
            calls += 1;
            Control::from_continue(calls < 2)
        };
        traverse(&graph, "0", TraversalOrder::BreadthFirst, visitor).unwrap();
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_missing_source() {
        let graph: AdjacencyList = make_line_graph(3);
        let result =
            breadth_first_search(&graph, "nope", |_: NodeId, _: Option<NodeId>| Control::Continue);
        assert!(matches!(result, Err(GraphError::NodeAbsent(name)) if name == "nope"));
    }

    #[test]
    fn test_single_node_reports_sentinel() {
        let graph = AdjacencyList::with_nodes(["solo"]).unwrap();
        let mut steps = Vec::new();
        depth_first_search(&graph, "solo", |c: NodeId, n: Option<NodeId>| {
            steps.push((c, n));
            Control::Continue
        })
        .unwrap();
        assert_eq!(steps, vec![(NodeId(0), None)]);
    }

    #[test]
    fn test_parallel_matches_sequential_on_line() {
        let graph: AdjacencyMatrix = make_line_graph(10);
        let mut parents = HashMap::new();
        traverse_parallel(&graph, "0", 4, |c: NodeId, n: Option<NodeId>| {
            if let Some(n) = n {
                parents.insert(n, c);
            }
            Control::Continue
        })
        .unwrap();

        let sequential = parent_map(&graph, "0", TraversalOrder::BreadthFirst).unwrap();
        assert_eq!(parents, sequential);
    }

    #[test]
    fn test_parallel_rejects_zero_workers() {
        let graph: AdjacencyList = make_line_graph(3);
        let result =
            traverse_parallel(&graph, "0", 0, |_: NodeId, _: Option<NodeId>| Control::Continue);
        assert!(matches!(result, Err(GraphError::InvalidWorkerCount(0))));
    }

    #[test]
    fn test_parallel_stop_skips_later_levels() {
        let graph: AdjacencyList = make_line_graph(6);
        let mut seen = Vec::new();
        traverse_parallel(&graph, "0", 2, |_: NodeId, n: Option<NodeId>| {
            seen.push(n);
            Control::from_continue(n != Some(NodeId(2)))
        })
        .unwrap();
        assert_eq!(seen, vec![Some(NodeId(1)), Some(NodeId(2))]);
    }

    #[test]
    fn test_parallel_stop_lets_level_finish() {
        // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 4, 3 -> 5
        let mut graph = AdjacencyList::with_nodes(["0", "1", "2", "3", "4", "5"]).unwrap();
        for (s, d) in [("0", "1"), ("0", "2"), ("1", "3"), ("2", "4"), ("3", "5")] {
            graph.add_unweighted_edge(s, d).unwrap();
        }

        for _ in 0..20 {
            let mut level_one = Vec::new();
            let mut later = 0;
            traverse_parallel(&graph, "0", 4, |c: NodeId, n: Option<NodeId>| {
                match c {
                    NodeId(0) => Control::Continue,
                    NodeId(1) | NodeId(2) => {
                        if level_one.is_empty() {
                            // Give the sibling task time to reach the lock
                            std::thread::sleep(std::time::Duration::from_millis(20));
                        }
                        level_one.push((c, n));
                        Control::from_continue(level_one.len() > 1)
                    }
                    _ => {
                        later += 1;
                        Control::Continue
                    }
                }
            })
            .unwrap();

            level_one.sort();
            assert_eq!(
                level_one,
                vec![
                    (NodeId(1), Some(NodeId(3))),
                    (NodeId(2), Some(NodeId(4))),
                ]
            );
            assert_eq!(later, 0);
        }
    }

    #[test]
    fn test_reconstruct_path() {
        let graph: AdjacencyList = make_line_graph(5);
        let parents = parent_map(&graph, "0", TraversalOrder::BreadthFirst).unwrap();

        let path = reconstruct_path(&parents, NodeId(4)).unwrap();
        assert_eq!(
            path,
            vec![NodeId(0), NodeId(1), NodeId(2), NodeId(3), NodeId(4)]
        );
        assert_eq!(reconstruct_path(&parents, NodeId(0)), Some(vec![NodeId(0)]));
    }

    #[test]
    fn test_reconstruct_path_cycle() {
        let parents = HashMap::from([(NodeId(0), NodeId(1)), (NodeId(1), NodeId(0))]);
        assert_eq!(reconstruct_path(&parents, NodeId(0)), None);
    }

    #[test]
    fn test_order_parse() {
        assert_eq!(
            "BFS".parse::<TraversalOrder>().unwrap(),
            TraversalOrder::BreadthFirst
        );
        assert_eq!(
            "depth-first".parse::<TraversalOrder>().unwrap(),
            TraversalOrder::DepthFirst
        );
        assert!("astar".parse::<TraversalOrder>().is_err());
    }
}
