//! sna-graph: read-only analytics engine for large static social graphs
//!
//! # Overview
//!
//! sna-graph loads one undirected social graph (tens of thousands of nodes, hundreds
//! of thousands of edges) into a compact CSR layout and answers structural queries
//! over it: connectivity, centrality rankings, community structure, cut vertices and
//! bridges, neighborhoods, friend recommendations, shortest paths and diameter
//! estimates.
//!
//! # Quick Start
//!
//! ```no_run
//! use sna_graph::{Engine, EngineConfig, NodeId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load data/facebook_combined.txt (one "u v" edge per line)
//! let engine = Engine::open(EngineConfig::default()).await?;
//!
//! let overview = engine.graph_overview();
//! println!("{} nodes, {} edges", overview.nodes, overview.edges);
//!
//! // Recoverable conditions come back as errors, never panics
//! let recs = engine.recommend_friends(NodeId(0), 5)?;
//! println!("{}", serde_json::to_string_pretty(&recs)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Storage**: CSR adjacency over dense indices, loaded from a text edge list or a
//!   Parquet snapshot
//! - **Algorithms**: stateless functions over `&SocialGraph` (Tarjan cuts, Louvain,
//!   Brandes betweenness, `PageRank`, k-core, Adamic–Adar, BFS)
//! - **Engine**: guarded lazy loader, signature-checked cut cache, one method per query
//! - **Sampling**: betweenness, clustering and diameter are seeded estimates

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithms;
pub mod config;
pub mod engine;
pub mod error;
pub mod storage;

// Re-export core types
pub use config::{EngineConfig, PageRankConfig, QueryDefaults, SourceFormat};
pub use engine::{CacheStatus, CutAnalysis, CutCache, Engine, GraphSource, GraphStore};
pub use error::{GraphError, GraphResult, QueryError, QueryResult};
pub use storage::{GraphBuilder, NodeId, SocialGraph};
