//! Text edge-list source
//!
//! One undirected edge per line, two whitespace-separated non-negative integers:
//!
//! ```text
//! 0 1
//! 0 2
//!
//! 1 2
//! ```
//!
//! Blank lines are skipped. Anything else that is not exactly two integers is rejected
//! with the offending line number; a half-parsed graph is never returned.

use super::{GraphBuilder, NodeId, SocialGraph};
use crate::error::{GraphError, GraphResult};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Parse edge-list text into a graph
///
/// # Errors
///
/// Returns [`GraphError::Parse`] on the first malformed record.
///
/// # Example
///
/// ```
/// use sna_graph::storage::parse_edge_list;
///
/// let graph = parse_edge_list("1 2\n\n2 3\n2 1\n").unwrap();
/// assert_eq!(graph.num_nodes(), 3);
/// assert_eq!(graph.num_edges(), 2); // "2 1" duplicates "1 2"
/// ```
pub fn parse_edge_list(text: &str) -> GraphResult<SocialGraph> {
    let mut builder = GraphBuilder::new();
    let mut records = 0_usize;

    for (line_no, line) in text.lines().enumerate() {
        let record = line.trim();
        if record.is_empty() {
            continue;
        }
        let (u, v) = parse_record(record).map_err(|reason| GraphError::Parse {
            line: line_no + 1,
            record: record.to_string(),
            reason,
        })?;
        builder.add_edge(u, v);
        records += 1;
    }

    debug!(
        records,
        distinct_edges = builder.num_edges(),
        "parsed edge list"
    );
    Ok(builder.build())
}

fn parse_record(record: &str) -> Result<(NodeId, NodeId), String> {
    let mut fields = record.split_whitespace();
    let (Some(a), Some(b), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err("expected exactly two node ids".to_string());
    };
    let u = a
        .parse::<NodeId>()
        .map_err(|e| format!("bad node id {a:?}: {e}"))?;
    let v = b
        .parse::<NodeId>()
        .map_err(|e| format!("bad node id {b:?}: {e}"))?;
    Ok((u, v))
}

/// Read and parse an edge-list file
///
/// # Errors
///
/// - [`GraphError::MissingSource`] if the file does not exist
/// - [`GraphError::Io`] on any other read failure
/// - [`GraphError::Parse`] on a malformed record
pub async fn read_edge_list<P: AsRef<Path>>(path: P) -> GraphResult<SocialGraph> {
    let path = path.as_ref();
    let started = Instant::now();

    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| match source.kind() {
            ErrorKind::NotFound => GraphError::MissingSource {
                path: path.to_path_buf(),
            },
            _ => GraphError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

    let graph = parse_edge_list(&text)?;
    info!(
        path = %path.display(),
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        elapsed_ms = started.elapsed().as_millis(),
        "loaded edge list"
    );
    Ok(graph)
}
