//! sna-graph command-line front door
//!
//! Runs one query per invocation and prints its record as JSON on stdout. Logs go to
//! stderr so the output can be piped straight into other tools.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sna_graph::{Engine, EngineConfig, NodeId, QueryResult, SourceFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Structural queries over a static social graph
#[derive(Parser, Debug)]
#[command(name = "sna-graph", author, version, about, long_about = None)]
struct CliArgs {
    /// Path to configuration file
    #[arg(short, long, env = "SNA_GRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Graph source path (overrides the configured one)
    #[arg(short, long, env = "SNA_GRAPH_DATA")]
    data: Option<PathBuf>,

    /// Read the source as a Parquet snapshot base path
    #[arg(long)]
    parquet: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    /// Query to run
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Node/edge counts, density and component structure
    Overview,

    /// Top-k degree, closeness, betweenness and PageRank
    Centralities {
        /// Entries per ranking
        #[arg(short, long)]
        k: Option<usize>,
        /// Betweenness pivot sources
        #[arg(short, long)]
        samples: Option<usize>,
        /// Sampling seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Sampled average clustering and exact transitivity
    Clustering {
        /// Nodes to sample
        #[arg(short, long)]
        samples: Option<usize>,
        /// Sampling seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// k-core size and maximum core number
    Kcore {
        /// Core order
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Louvain community partition
    Communities {
        /// Visitation-order seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Degree assortativity coefficient
    Assortativity,

    /// Articulation points (ascending)
    ArticulationPoints {
        /// Entries to return
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Bridges (ascending)
    Bridges {
        /// Entries to return
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Articulation point and bridge totals
    BridgeSummary,

    /// Induced ego network of a node
    Ego {
        /// Center node
        node: u64,
        /// Hop radius
        #[arg(short, long)]
        radius: Option<usize>,
    },

    /// Neighbors of a node
    Neighbors {
        /// Node identifier
        node: String,
        /// Maximum neighbors listed
        #[arg(short, long)]
        limit: Option<usize>,
        /// List every neighbor
        #[arg(short, long)]
        all: bool,
    },

    /// Adamic–Adar friend recommendations
    Recommend {
        /// Target node
        node: u64,
        /// Suggestions to return
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Sampled diameter of the largest component
    Diameter {
        /// Source nodes to sample
        #[arg(short, long)]
        samples: Option<usize>,
        /// Sampling seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Unweighted shortest path
    Path {
        /// Start node
        u: u64,
        /// End node
        v: u64,
    },

    /// Component count and largest sizes
    Components {
        /// Sizes to list
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Highest-degree nodes
    TopDegree {
        /// Entries to return
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Write the loaded graph as a Parquet snapshot
    Convert {
        /// Snapshot base path (`{out}_edges.parquet`, `{out}_nodes.parquet`)
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Print the resolved configuration as TOML
    Config,
}

/// Initialise tracing-based logging on stderr
///
/// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn emit<T: Serialize>(record: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

/// Print the success record, or the error record for a recoverable failure
fn emit_result<T: Serialize>(result: QueryResult<T>) -> Result<()> {
    match result {
        Ok(record) => emit(&record),
        Err(err) => {
            tracing::warn!(%err, "query failed");
            emit(&err)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose, args.quiet);

    let mut config = EngineConfig::load(args.config.as_deref())?;
    if let Some(data) = args.data {
        config.data_path = data;
    }
    if args.parquet {
        config.source_format = SourceFormat::Parquet;
    }

    if matches!(args.command, Command::Config) {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let engine = Engine::open(config)
        .await
        .context("failed to load graph")?;
    let d = engine.config().defaults.clone();

    match args.command {
        Command::Overview => emit(&engine.graph_overview()),
        Command::Centralities { k, samples, seed } => emit(&engine.centralities_top_k(
            k.unwrap_or(d.top_k),
            samples.unwrap_or(d.betweenness_samples),
            seed.unwrap_or(d.seed),
        )),
        Command::Clustering { samples, seed } => emit(&engine.clustering_stats(
            samples.unwrap_or(d.clustering_samples),
            seed.unwrap_or(d.seed),
        )),
        Command::Kcore { k } => emit(&engine.k_core_summary(k.unwrap_or(d.kcore_k))),
        Command::Communities { seed } => {
            emit(&engine.louvain_communities(seed.unwrap_or(d.seed)))
        }
        Command::Assortativity => emit(&engine.degree_assortativity()),
        Command::ArticulationPoints { k } => {
            emit(&engine.articulation_points_top_k(k.unwrap_or(d.cut_top_k)))
        }
        Command::Bridges { k } => emit(&engine.bridges_top_k(k.unwrap_or(d.cut_top_k))),
        Command::BridgeSummary => emit(&engine.bridge_summary()),
        Command::Ego { node, radius } => emit_result(
            engine.ego_network(NodeId(node), radius.unwrap_or(d.ego_radius)),
        ),
        Command::Neighbors { node, limit, all } => emit_result(engine.get_node_neighbors(
            &node,
            limit.unwrap_or(d.neighbor_limit),
            all,
        )),
        Command::Recommend { node, k } => emit_result(
            engine.recommend_friends(NodeId(node), k.unwrap_or(d.recommendation_k)),
        ),
        Command::Diameter { samples, seed } => emit(&engine.diameter_estimate(
            samples.unwrap_or(d.diameter_samples),
            seed.unwrap_or(d.seed),
        )),
        Command::Path { u, v } => emit_result(engine.shortest_path(NodeId(u), NodeId(v))),
        Command::Components { top } => {
            emit(&engine.component_summary(top.unwrap_or(d.component_top)))
        }
        Command::TopDegree { k } => emit(&engine.top_k_by_degree(k.unwrap_or(d.degree_top_k))),
        Command::Convert { out } => convert(&engine, &out).await,
        Command::Config => Ok(()),
    }
}

#[cfg(feature = "storage")]
async fn convert(engine: &Engine, out: &std::path::Path) -> Result<()> {
    engine
        .graph()
        .write_parquet(out)
        .await
        .with_context(|| format!("failed to write snapshot {}", out.display()))?;
    tracing::info!(out = %out.display(), "wrote parquet snapshot");
    Ok(())
}

#[cfg(not(feature = "storage"))]
#[allow(clippy::unused_async)]
async fn convert(_engine: &Engine, _out: &std::path::Path) -> Result<()> {
    anyhow::bail!("snapshot conversion requires the `storage` feature")
}
