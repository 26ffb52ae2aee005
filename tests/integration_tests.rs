//! Integration tests for sna-graph
//!
//! Tests real-world usage scenarios (edge-list files, snapshots, configured engines)

use sna_graph::storage::read_edge_list;
use sna_graph::{Engine, EngineConfig, GraphError, NodeId, SocialGraph, SourceFormat};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

/// Two friend circles joined through a single acquaintance:
///
/// ```text
/// 1 - 2      10 - 11
/// | X |  5   |  X |
/// 3 - 4 / \ 12 - 13
///      4-5-10
/// ```
const CIRCLES: &str = "\
1 2
1 3
1 4
2 3
2 4
3 4

4 5
5 10
10 11
10 12
10 13
11 12
11 13
12 13
";

fn write_edges(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

fn config_for(path: &std::path::Path) -> EngineConfig {
    EngineConfig {
        data_path: path.to_path_buf(),
        ..EngineConfig::default()
    }
}

#[tokio::test]
async fn test_friend_circles_end_to_end() {
    let file = write_edges(CIRCLES);
    let engine = Engine::open(config_for(file.path())).await.unwrap();

    let overview = engine.graph_overview();
    assert_eq!(overview.nodes, 9);
    assert_eq!(overview.edges, 14);
    assert!(overview.is_connected);

    // The path 4 - 5 - 10 is the only link between the circles
    let summary = engine.bridge_summary();
    assert_eq!(summary.articulation_points, 3);
    assert_eq!(summary.bridges, 2);

    let points = engine.articulation_points_top_k(10);
    let nodes: Vec<NodeId> = points.top.iter().map(|p| p.node).collect();
    assert_eq!(nodes, vec![NodeId(4), NodeId(5), NodeId(10)]);

    let core = engine.k_core_summary(3);
    assert_eq!(core.k_core_size, 8);
    assert_eq!(core.max_core_number, 3);

    let communities = engine.louvain_communities(42);
    assert!(communities.communities >= 2);
    assert!(communities.modularity > 0.3);

    // Node 5 bridges the circles, so it carries the most shortest paths
    let centrality = engine.centralities_top_k(1, 2000, 42);
    assert_eq!(centrality.betweenness[0].node, NodeId(5));
}

#[tokio::test]
async fn test_recommendations_cross_the_bridge() {
    let file = write_edges(CIRCLES);
    let engine = Engine::open(config_for(file.path())).await.unwrap();

    // 5's friends are 4 and 10; candidates are their other friends
    let report = engine.recommend_friends(NodeId(5), 10).unwrap();
    let mut suggested: Vec<u64> = report.recommendations.iter().map(|r| r.node.0).collect();
    suggested.sort_unstable();
    assert_eq!(suggested, vec![1, 2, 3, 11, 12, 13]);
    assert_eq!(report.total_candidates_found, 6);
}

#[tokio::test]
async fn test_missing_source_is_fatal() {
    let dir = tempdir().unwrap();
    let err = Engine::open(config_for(&dir.path().join("facebook_combined.txt")))
        .await
        .unwrap_err();
    assert!(matches!(err, GraphError::MissingSource { .. }));
}

#[tokio::test]
async fn test_malformed_record_reports_line() {
    let file = write_edges("1 2\n2 3\n3 x\n");
    let err = read_edge_list(file.path()).await.unwrap_err();
    match err {
        GraphError::Parse { line, record, .. } => {
            assert_eq!(line, 3);
            assert_eq!(record, "3 x");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(feature = "storage")]
#[tokio::test]
async fn test_parquet_snapshot_as_source() {
    let file = write_edges(CIRCLES);
    let graph = read_edge_list(file.path()).await.unwrap();

    let dir = tempdir().unwrap();
    let base = dir.path().join("circles");
    graph.write_parquet(&base).await.unwrap();

    assert!(std::path::Path::new(&format!("{}_edges.parquet", base.display())).exists());
    assert!(std::path::Path::new(&format!("{}_nodes.parquet", base.display())).exists());

    let config = EngineConfig {
        data_path: base,
        source_format: SourceFormat::Parquet,
        ..EngineConfig::default()
    };
    let engine = Engine::open(config).await.unwrap();
    assert_eq!(engine.graph().num_nodes(), graph.num_nodes());
    assert_eq!(engine.graph().num_edges(), graph.num_edges());
    assert_eq!(engine.bridge_summary().bridges, 2);
}

#[test]
fn test_large_ring_with_chords() {
    // 1000-node ring plus chords every 10 nodes
    let mut edges: Vec<(NodeId, NodeId)> = (0..1000)
        .map(|i| (NodeId(i), NodeId((i + 1) % 1000)))
        .collect();
    edges.extend((0..100).map(|i| (NodeId(i * 10), NodeId((i * 10 + 500) % 1000))));
    let graph = SocialGraph::from_edges(edges);

    assert_eq!(graph.num_nodes(), 1000);
    // Chord i and i + 50 coincide
    assert_eq!(graph.num_edges(), 1050);

    let engine = Engine::new(std::sync::Arc::new(graph), EngineConfig::default());
    assert_eq!(engine.bridge_summary().bridges, 0);
    assert_eq!(engine.component_summary(10).top_sizes, vec![1000]);

    let diameter = engine.diameter_estimate(50, 42);
    assert_eq!(diameter.samples, 50);
    assert!(diameter.diameter_est >= 1 && diameter.diameter_est <= 500);
}
