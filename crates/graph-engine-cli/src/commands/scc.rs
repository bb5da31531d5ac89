//! `graph-engine scc` command - strongly connected components.

use colored::Colorize;
use graph_engine::{strongly_connected_components, GraphStore, SccAlgorithm};

use crate::error::CliResult;

/// Execute the `scc` command.
pub fn execute<G: GraphStore>(graph: &G, algorithm: SccAlgorithm) -> CliResult<()> {
    let components = strongly_connected_components(graph, algorithm)?;

    println!(
        "{} Strongly connected components ({})",
        "→".bright_cyan(),
        algorithm
    );
    for (i, component) in components.iter().enumerate() {
        let members: Vec<&str> = component.iter().map(String::as_str).collect();
        println!(
            "  {} {{{}}}",
            format!("#{}", i + 1).dimmed(),
            members.join(", ").bright_yellow()
        );
    }

    println!();
    println!(
        "{} {} components over {} nodes",
        "✓".bright_green(),
        components.len().to_string().bright_white(),
        graph.node_count()
    );
    Ok(())
}
