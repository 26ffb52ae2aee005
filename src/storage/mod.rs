//! Graph storage layer
//!
//! Provides the undirected CSR social graph, the text edge-list loader and
//! (with the `storage` feature) Parquet snapshots.

pub mod csr;
pub mod edge_list;
#[cfg(feature = "storage")]
pub mod parquet;

pub use csr::{GraphBuilder, NodeId, SocialGraph};
pub use edge_list::{parse_edge_list, read_edge_list};
