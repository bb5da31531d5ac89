//! Engine configuration.
//!
//! Configuration is read with the `config` crate from an optional TOML file
//! and `GRAPH_ENGINE_*` environment variables, environment taking precedence.
//!
//! # Example
//!
//! ```
//! use graph_engine::{EngineConfig, Representation};
//!
//! let config = EngineConfig::load_from_str(
//!     r#"
//!     worker_count = 4
//!     representation = "matrix"
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.worker_count, 4);
//! assert_eq!(config.representation, Representation::Matrix);
//! ```

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::models::Representation;
use crate::{GraphError, Result};

const ENV_PREFIX: &str = "GRAPH_ENGINE";

/// Settings shared by the algorithm entry points and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Workers used by the parallel algorithm variants.
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Graph encoding to build.
    #[serde(default)]
    pub representation: Representation,

    /// `tracing` filter directive.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            representation: Representation::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl EngineConfig {
    /// Load from a TOML file, with environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(Environment::with_prefix(ENV_PREFIX));

        Self::finish(builder.build())
    }

    /// Load from TOML text, with environment overrides.
    pub fn load_from_str(content: &str) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .add_source(Environment::with_prefix(ENV_PREFIX));

        Self::finish(builder.build())
    }

    /// Load from environment variables only.
    pub fn from_env() -> Result<Self> {
        let builder = Config::builder().add_source(Environment::with_prefix(ENV_PREFIX));

        Self::finish(builder.build())
    }

    fn finish(built: std::result::Result<Config, config::ConfigError>) -> Result<Self> {
        let config: Self = built
            .and_then(Config::try_deserialize)
            .map_err(|e| GraphError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the worker budget.
    pub fn with_worker_count(mut self, workers: usize) -> Self {
        self.worker_count = workers;
        self
    }

    /// Set the graph encoding.
    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.representation = representation;
        self
    }

    /// Set the log filter.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Check invariants.
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(GraphError::InvalidWorkerCount(self.worker_count));
        }
        Ok(())
    }
}
