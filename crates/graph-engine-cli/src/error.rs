//! Error types for the graph-engine CLI.

use graph_engine::{GraphError, TraversalOrder};
use thiserror::Error;

/// CLI result type alias.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type.
#[derive(Error, Debug)]
pub enum CliError {
    /// Failure reported by the algorithm engine.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Malformed `--edge` argument.
    #[error("Invalid edge '{0}': expected SRC:DST or SRC:DST:WEIGHT")]
    InvalidEdge(String),

    /// Edge weight is not a number.
    #[error("Invalid weight '{weight}' in edge '{edge}'")]
    InvalidWeight { edge: String, weight: String },

    /// Parallel traversal is breadth-first only.
    #[error("Parallel traversal supports bfs only, got {0}")]
    ParallelOrder(TraversalOrder),

    /// Command needs at least one node.
    #[error("Graph is empty: pass --node or --edge")]
    EmptyGraph,
}
