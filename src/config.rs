//! Engine configuration
//!
//! Loaded from a TOML file with every field optional; anything missing falls back to
//! the built-in default.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `SNA_GRAPH_CONFIG` environment variable
//! 3. Built-in defaults
//!
//! `SNA_GRAPH_DATA`, when set, overrides `data_path` from any of the above.
//!
//! # Example
//!
//! ```toml
//! data_path = "data/facebook_combined.txt"
//! source_format = "edge_list"
//!
//! [defaults]
//! top_k = 10
//! betweenness_samples = 2000
//! seed = 42
//!
//! [pagerank]
//! damping = 0.85
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "SNA_GRAPH_CONFIG";

/// Environment variable overriding the graph source path
pub const DATA_ENV: &str = "SNA_GRAPH_DATA";

/// On-disk layout of the graph source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Whitespace-separated `u v` text, one edge per line
    #[default]
    EdgeList,
    /// `{base}_edges.parquet` + `{base}_nodes.parquet` snapshot
    Parquet,
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Graph source (edge-list file, or Parquet snapshot base path)
    pub data_path: PathBuf,

    /// Format of `data_path`
    pub source_format: SourceFormat,

    /// Default query parameters
    pub defaults: QueryDefaults,

    /// `PageRank` iteration settings
    pub pagerank: PageRankConfig,
}

/// Defaults applied when a caller omits a query parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDefaults {
    /// Entries per centrality ranking
    pub top_k: usize,
    /// Pivot sources for approximate betweenness
    pub betweenness_samples: usize,
    /// Nodes sampled for the clustering estimate
    pub clustering_samples: usize,
    /// Sources sampled for the diameter estimate
    pub diameter_samples: usize,
    /// Seed for every sampled computation
    pub seed: u64,
    /// Neighbor listing truncation
    pub neighbor_limit: usize,
    /// Recommendations returned per node
    pub recommendation_k: usize,
    /// k for the k-core summary
    pub kcore_k: usize,
    /// Component sizes reported
    pub component_top: usize,
    /// Ego network radius
    pub ego_radius: usize,
    /// Entries returned by the cut-vertex and bridge queries
    pub cut_top_k: usize,
    /// Entries returned by the raw degree ranking
    pub degree_top_k: usize,
}

/// `PageRank` power-iteration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Probability of following a link
    pub damping: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Per-node convergence tolerance
    pub tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/facebook_combined.txt"),
            source_format: SourceFormat::default(),
            defaults: QueryDefaults::default(),
            pagerank: PageRankConfig::default(),
        }
    }
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            top_k: 10,
            betweenness_samples: 2000,
            clustering_samples: 5000,
            diameter_samples: 50,
            seed: 42,
            neighbor_limit: 20,
            recommendation_k: 5,
            kcore_k: 10,
            component_top: 10,
            ego_radius: 1,
            cut_top_k: 10,
            degree_top_k: 3,
        }
    }
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: crate::algorithms::DEFAULT_DAMPING,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document; absent keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns error if the document is not valid TOML or a value has the wrong type
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid engine configuration")
    }

    /// Load configuration from file, environment, and defaults
    ///
    /// An explicit path must exist; a path taken from `SNA_GRAPH_CONFIG` that does not
    /// exist is ignored.
    ///
    /// # Errors
    ///
    /// Returns error if the chosen file cannot be read or parsed
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        if let Some(data) = std::env::var_os(DATA_ENV) {
            config.data_path = PathBuf::from(data);
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Render as TOML (used by `sna-graph config`)
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize configuration")
    }
}
