//! Error types
//!
//! Two tiers:
//! - [`GraphError`]: the graph source could not be loaded. Fatal for the query that
//!   triggered the load; the store stays uninitialized and retries next time.
//! - [`QueryError`]: a recoverable, per-query condition (unknown node, unparsable id).
//!   Carried inside the query's `Result` and serializable as an error record.

use crate::storage::NodeId;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a graph from its backing source
#[derive(Error, Debug)]
pub enum GraphError {
    /// Backing data is absent
    #[error("graph source not found at {}", path.display())]
    MissingSource {
        /// Path that was probed
        path: PathBuf,
    },

    /// I/O failure while reading an existing source
    #[error("failed to read graph source {}: {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed edge record
    #[error("malformed edge record at line {line}: {record:?} ({reason})")]
    Parse {
        /// 1-based line number
        line: usize,
        /// Offending record, trimmed
        record: String,
        /// What was wrong with it
        reason: String,
    },

    /// Parquet snapshot could not be read or written
    #[error("graph snapshot error: {0:#}")]
    Snapshot(#[from] anyhow::Error),
}

/// Recoverable query failure, reported as a record instead of aborting the caller
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum QueryError {
    /// Referenced node is absent from the graph
    #[error("node {node} not found in the graph")]
    NodeNotFound {
        /// Requested node
        node: NodeId,
    },

    /// One or both endpoints of a pair query are absent
    #[error("one or both nodes not in graph ({u}, {v})")]
    NodesNotFound {
        /// First endpoint
        u: NodeId,
        /// Second endpoint
        v: NodeId,
    },

    /// Node identifier could not be parsed as a non-negative integer
    #[error("invalid node id format: {raw:?}")]
    InvalidNodeId {
        /// Raw identifier as supplied
        raw: String,
    },
}

/// Result alias for graph loading
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// Result alias for analytical queries
pub type QueryResult<T> = std::result::Result<T, QueryError>;
