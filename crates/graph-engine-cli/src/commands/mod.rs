//! CLI command implementations.

pub mod mst;
pub mod paths;
pub mod scc;
pub mod traverse;

use clap::Args;
use graph_engine::{GraphStore, DEFAULT_WEIGHT};

use crate::error::{CliError, CliResult};

/// Graph description shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Node name (repeatable); nodes named in edges are added automatically
    #[arg(short, long = "node", value_name = "NAME")]
    pub nodes: Vec<String>,

    /// Directed edge as SRC:DST or SRC:DST:WEIGHT (repeatable)
    #[arg(short, long = "edge", value_name = "SPEC")]
    pub edges: Vec<String>,

    /// Insert every edge in both directions
    #[arg(short, long)]
    pub undirected: bool,
}

/// One parsed `--edge` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Parse `SRC:DST[:WEIGHT]`.
pub fn parse_edge(spec: &str) -> CliResult<EdgeSpec> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();

    let (source, target, weight) = match parts.as_slice() {
        [s, d] => (*s, *d, DEFAULT_WEIGHT),
        [s, d, w] => {
            let weight = w.parse::<f64>().map_err(|_| CliError::InvalidWeight {
                edge: spec.to_string(),
                weight: w.to_string(),
            })?;
            (*s, *d, weight)
        }
        _ => return Err(CliError::InvalidEdge(spec.to_string())),
    };

    if source.is_empty() || target.is_empty() {
        return Err(CliError::InvalidEdge(spec.to_string()));
    }

    Ok(EdgeSpec {
        source: source.to_string(),
        target: target.to_string(),
        weight,
    })
}

/// Build a graph of representation `G` from command-line arguments.
pub fn build_graph<G: GraphStore>(args: &GraphArgs) -> CliResult<G> {
    let edges = args
        .edges
        .iter()
        .map(|spec| parse_edge(spec))
        .collect::<CliResult<Vec<_>>>()?;

    let mut graph = G::default();
    for name in &args.nodes {
        ensure_node(&mut graph, name)?;
    }

    for edge in &edges {
        ensure_node(&mut graph, &edge.source)?;
        ensure_node(&mut graph, &edge.target)?;
        if args.undirected {
            graph.add_undirected_edge(&edge.source, &edge.target, edge.weight)?;
        } else {
            graph.add_edge(&edge.source, &edge.target, edge.weight)?;
        }
    }

    if graph.node_count() == 0 {
        return Err(CliError::EmptyGraph);
    }

    tracing::debug!(
        "Built {} graph (nodes={}, edges={})",
        graph.representation(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn ensure_node<G: GraphStore>(graph: &mut G, name: &str) -> CliResult<()> {
    if !graph.has_node(name) {
        graph.add_node(name)?;
    }
    Ok(())
}

/// Format a weight without a trailing `.0` for integral values.
pub fn format_weight(weight: f64) -> String {
    if weight == f64::INFINITY {
        "inf".to_string()
    } else if weight == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if weight.fract() == 0.0 {
        format!("{}", weight as i64)
    } else {
        format!("{}", weight)
    }
}
