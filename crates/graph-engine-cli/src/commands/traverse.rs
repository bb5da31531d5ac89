//! `graph-engine traverse` command - BFS/DFS from a source node.

use colored::Colorize;
use graph_engine::{traverse, traverse_parallel, Control, GraphStore, NodeId, TraversalOrder};

use crate::error::{CliError, CliResult};

/// Execute the `traverse` command.
///
/// `workers` selects the parallel breadth-first traversal, which cannot be
/// combined with depth-first order.
pub fn execute<G: GraphStore>(
    graph: &G,
    source: &str,
    order: TraversalOrder,
    workers: Option<usize>,
) -> CliResult<()> {
    if workers.is_some() && order != TraversalOrder::BreadthFirst {
        return Err(CliError::ParallelOrder(order));
    }

    let mut steps: Vec<(NodeId, Option<NodeId>)> = Vec::new();
    let record = |current: NodeId, next: Option<NodeId>| {
        steps.push((current, next));
        Control::Continue
    };

    match workers {
        Some(workers) => {
            println!(
                "{} Parallel bfs from {} ({} workers)",
                "→".bright_cyan(),
                source.bright_white(),
                workers
            );
            traverse_parallel(graph, source, workers, record)?;
        }
        None => {
            println!(
                "{} {} from {}",
                "→".bright_cyan(),
                order,
                source.bright_white()
            );
            traverse(graph, source, order, record)?;
        }
    }

    let mut reached = 1;
    for (current, next) in &steps {
        match next {
            Some(next) => {
                reached += 1;
                println!(
                    "  {} {} {}",
                    graph.name_of(*current).bright_yellow(),
                    "->".dimmed(),
                    graph.name_of(*next).bright_yellow()
                );
            }
            None => println!(
                "  {} {}",
                graph.name_of(*current).bright_yellow(),
                "(leaf)".dimmed()
            ),
        }
    }

    println!();
    println!(
        "{} Reached {} of {} nodes",
        "✓".bright_green(),
        reached.to_string().bright_white(),
        graph.node_count()
    );
    Ok(())
}
