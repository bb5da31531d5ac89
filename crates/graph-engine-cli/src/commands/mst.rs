//! `graph-engine mst` command - minimum spanning tree.

use colored::Colorize;
use graph_engine::{
    minimum_spanning_tree, minimum_spanning_tree_parallel, total_weight, GraphStore, MstAlgorithm,
};

use super::format_weight;
use crate::error::CliResult;

/// Execute the `mst` command.
pub fn execute<G: GraphStore>(
    graph: &G,
    algorithm: MstAlgorithm,
    workers: Option<usize>,
) -> CliResult<()> {
    let mst = match workers {
        Some(workers) => minimum_spanning_tree_parallel(graph, algorithm, workers)?,
        None => minimum_spanning_tree(graph, algorithm)?,
    };

    println!(
        "{} Minimum spanning tree ({}{})",
        "→".bright_cyan(),
        algorithm,
        workers
            .map(|w| format!(", {} workers", w))
            .unwrap_or_default()
    );

    // Paired edges are listed once
    let mut undirected_weight = 0.0;
    for edge in mst.edges() {
        let paired = mst.edge_weight(edge.target, edge.source).is_some();
        if paired && edge.target < edge.source {
            continue;
        }
        undirected_weight += edge.weight;
        println!(
            "  {} {} {} {}",
            mst.name_of(edge.source).bright_yellow(),
            if paired { "--" } else { "->" }.dimmed(),
            mst.name_of(edge.target).bright_yellow(),
            format!("({})", format_weight(edge.weight)).dimmed()
        );
    }

    println!();
    println!(
        "{} {} edges, weight {} (directed total {})",
        "✓".bright_green(),
        mst.edge_count(),
        format_weight(undirected_weight).bright_white(),
        format_weight(total_weight(&mst))
    );
    Ok(())
}
