//! Guarded lazy loader for the process's one graph

use crate::config::{EngineConfig, SourceFormat};
use crate::error::{GraphError, GraphResult};
use crate::storage::{read_edge_list, SocialGraph};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Where the graph is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSource {
    /// Text edge list
    EdgeList(PathBuf),
    /// Parquet snapshot base path
    #[cfg(feature = "storage")]
    Parquet(PathBuf),
}

impl GraphSource {
    /// Source described by a configuration
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Snapshot`] when a Parquet source is configured but the
    /// crate was built without the `storage` feature
    pub fn from_config(config: &EngineConfig) -> GraphResult<Self> {
        let path = config.data_path.clone();
        match config.source_format {
            SourceFormat::EdgeList => Ok(Self::EdgeList(path)),
            #[cfg(feature = "storage")]
            SourceFormat::Parquet => Ok(Self::Parquet(path)),
            #[cfg(not(feature = "storage"))]
            SourceFormat::Parquet => Err(GraphError::Snapshot(anyhow::anyhow!(
                "parquet sources require the `storage` feature"
            ))),
        }
    }

    /// Path being read
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::EdgeList(path) => path,
            #[cfg(feature = "storage")]
            Self::Parquet(path) => path,
        }
    }

    async fn read(&self) -> GraphResult<SocialGraph> {
        match self {
            Self::EdgeList(path) => read_edge_list(path).await,
            #[cfg(feature = "storage")]
            Self::Parquet(path) => {
                let edges = crate::storage::parquet::edges_path(path);
                if !tokio::fs::try_exists(&edges).await.unwrap_or(false) {
                    return Err(GraphError::MissingSource { path: edges });
                }
                let graph = SocialGraph::read_parquet(path).await?;
                tracing::info!(
                    path = %path.display(),
                    nodes = graph.num_nodes(),
                    edges = graph.num_edges(),
                    "loaded parquet snapshot"
                );
                Ok(graph)
            }
        }
    }
}

/// Holds at most one graph, created on first successful load
///
/// Concurrent first callers share one parse. A failed load leaves the store empty, so
/// the next call tries again; a successful one is kept for the store's lifetime and
/// handed out by reference.
///
/// # Example
///
/// ```no_run
/// use sna_graph::engine::{GraphSource, GraphStore};
///
/// # async fn example() -> Result<(), sna_graph::GraphError> {
/// let store = GraphStore::new(GraphSource::EdgeList("data/facebook_combined.txt".into()));
/// let graph = store.load().await?;
/// let again = store.load().await?;
/// assert!(std::sync::Arc::ptr_eq(&graph, &again));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GraphStore {
    source: GraphSource,
    graph: OnceCell<Arc<SocialGraph>>,
}

impl GraphStore {
    /// Create an empty store for `source`
    #[must_use]
    pub fn new(source: GraphSource) -> Self {
        Self {
            source,
            graph: OnceCell::new(),
        }
    }

    /// The configured source
    #[must_use]
    pub fn source(&self) -> &GraphSource {
        &self.source
    }

    /// Whether a graph has been loaded
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.graph.initialized()
    }

    /// Return the retained graph, loading it first if needed
    ///
    /// # Errors
    ///
    /// Propagates the [`GraphError`] of a failed load; nothing is retained in that case
    pub async fn load(&self) -> GraphResult<Arc<SocialGraph>> {
        if let Some(graph) = self.graph.get() {
            return Ok(Arc::clone(graph));
        }

        let graph = self
            .graph
            .get_or_try_init(|| async {
                debug!(path = %self.source.path().display(), "loading graph");
                self.source.read().await.map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(graph))
    }
}
