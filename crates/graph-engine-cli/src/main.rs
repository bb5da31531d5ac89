//! graph-engine CLI - run graph algorithms over graphs described on the command line.
//!
//! # Commands
//!
//! - `graph-engine traverse` - BFS/DFS (optionally parallel BFS) from a source node
//! - `graph-engine mst` - Kruskal or Prim minimum spanning tree
//! - `graph-engine scc` - Kosaraju strongly connected components
//! - `graph-engine paths` - Bellman-Ford shortest paths
//!
//! # Examples
//!
//! ```bash
//! # Parallel BFS with four workers
//! graph-engine traverse -s 0 -e 0:1 -e 0:2 -e 1:3 --parallel --workers 4
//!
//! # Prim over a dense matrix
//! graph-engine --repr matrix mst -a prim -u -e a:b:3 -e b:c:1 -e a:c:2
//!
//! # Distances from SLC
//! graph-engine paths -s SLC -e SLC:C:2 -e C:D:2 -e SLC:D:3
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use graph_engine::{
    AdjacencyList, AdjacencyMatrix, EngineConfig, GraphStore, Representation,
};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::{build_graph, mst, paths, scc, traverse, GraphArgs};
use error::CliResult;

/// graph-engine - traversal, spanning tree, SCC and shortest path tooling
#[derive(Parser)]
#[command(name = "graph-engine")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Graph representation (list, matrix)
    #[arg(short, long, global = true)]
    repr: Option<String>,

    /// Worker count for parallel variants
    #[arg(short, long, global = true)]
    workers: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Breadth- or depth-first traversal
    Traverse {
        #[command(flatten)]
        graph: GraphArgs,

        /// Source node
        #[arg(short, long)]
        source: String,

        /// Traversal order (bfs, dfs)
        #[arg(short, long, default_value = "bfs")]
        order: String,

        /// Use the level-synchronous parallel BFS
        #[arg(short, long)]
        parallel: bool,
    },

    /// Minimum spanning tree
    Mst {
        #[command(flatten)]
        graph: GraphArgs,

        /// Algorithm (kruskal, prim)
        #[arg(short, long, default_value = "kruskal")]
        algorithm: String,

        /// Parallelize the edge sort / boundary scan
        #[arg(short, long)]
        parallel: bool,
    },

    /// Strongly connected components
    Scc {
        #[command(flatten)]
        graph: GraphArgs,

        /// Algorithm (kosaraju)
        #[arg(short, long, default_value = "kosaraju")]
        algorithm: String,
    },

    /// Single-source shortest paths
    Paths {
        #[command(flatten)]
        graph: GraphArgs,

        /// Source node
        #[arg(short, long)]
        source: String,

        /// Report only the distance to this node
        #[arg(short, long)]
        target: Option<String>,

        /// Algorithm (bellman_ford)
        #[arg(short, long, default_value = "bellman_ford")]
        algorithm: String,
    },
}

fn setup_logging(verbose: bool, quiet: bool, default_filter: &str) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Merge the config file, environment and command-line overrides.
fn load_config(cli: &Cli) -> CliResult<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::from_env()?,
    };

    if let Some(repr) = &cli.repr {
        config = config.with_representation(repr.parse::<Representation>()?);
    }
    if let Some(workers) = cli.workers {
        config = config.with_worker_count(workers);
    }
    config.validate()?;
    Ok(config)
}

/// Run `command` on a graph stored as `G`.
fn dispatch<G: GraphStore>(command: Commands, config: &EngineConfig) -> CliResult<()> {
    let workers = |parallel: bool| parallel.then_some(config.worker_count);

    match command {
        Commands::Traverse {
            graph,
            source,
            order,
            parallel,
        } => {
            let graph: G = build_graph(&graph)?;
            traverse::execute(&graph, &source, order.parse()?, workers(parallel))
        }

        Commands::Mst {
            graph,
            algorithm,
            parallel,
        } => {
            let graph: G = build_graph(&graph)?;
            mst::execute(&graph, algorithm.parse()?, workers(parallel))
        }

        Commands::Scc { graph, algorithm } => {
            let graph: G = build_graph(&graph)?;
            scc::execute(&graph, algorithm.parse()?)
        }

        Commands::Paths {
            graph,
            source,
            target,
            algorithm,
        } => {
            let graph: G = build_graph(&graph)?;
            paths::execute(&graph, algorithm.parse()?, &source, target.as_deref())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = load_config(&cli).and_then(|config| {
        setup_logging(cli.verbose, cli.quiet, &config.log_filter);
        tracing::debug!(
            "Using {} representation with {} workers",
            config.representation,
            config.worker_count
        );

        match config.representation {
            Representation::List => dispatch::<AdjacencyList>(cli.command, &config),
            Representation::Matrix => dispatch::<AdjacencyMatrix>(cli.command, &config),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
