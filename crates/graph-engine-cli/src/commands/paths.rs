//! `graph-engine paths` command - single-source shortest paths.

use colored::Colorize;
use graph_engine::{shortest_paths, GraphStore, PathReport, ShortestPathAlgorithm};

use super::format_weight;
use crate::error::CliResult;

/// Execute the `paths` command.
pub fn execute<G: GraphStore>(
    graph: &G,
    algorithm: ShortestPathAlgorithm,
    source: &str,
    target: Option<&str>,
) -> CliResult<()> {
    let report = shortest_paths(graph, algorithm, source, target)?;

    println!(
        "{} Shortest paths from {} ({})",
        "→".bright_cyan(),
        source.bright_white(),
        algorithm
    );

    match &report {
        PathReport::All(paths) => {
            for (node, distance) in &paths.distances {
                let route = paths
                    .path_to(node)
                    .map(|p| p.join(" -> "))
                    .unwrap_or_else(|| "unreachable".to_string());
                println!(
                    "  {:<12} {:>8}  {}",
                    node.bright_yellow(),
                    format_weight(*distance),
                    route.dimmed()
                );
            }
        }
        PathReport::Target { distance, .. } => {
            let target = target.unwrap_or_default();
            println!(
                "  {} {} {}",
                target.bright_yellow(),
                "distance".dimmed(),
                format_weight(*distance).bright_white()
            );
        }
    }

    println!();
    println!("{} Predecessors:", "✓".bright_green());
    for (node, parent) in report.predecessors() {
        println!(
            "  {} <- {}",
            node.bright_yellow(),
            parent.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
