//! Result records returned by [`Engine`](super::Engine) queries
//!
//! Every record serializes to a flat JSON object. Node identifiers serialize as plain
//! integers; undefined or absent values serialize as `null`. Field names are the JSON
//! keys, so only fields whose meaning is not obvious from the name carry docs.

#![allow(missing_docs)]

use crate::storage::NodeId;
use serde::Serialize;

/// Whole-graph structural overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphOverview {
    pub nodes: usize,
    pub edges: usize,
    /// `2m / (n(n - 1))`, 0 for fewer than two nodes
    pub density: f64,
    pub connected_components: usize,
    pub largest_component_size: usize,
    /// `largest_component_size / nodes`, 0 for an empty graph
    pub largest_component_fraction: f64,
    /// `2m / n`, 0 for an empty graph
    pub avg_degree: f64,
    /// False for an empty graph
    pub is_connected: bool,
}

/// One ranked `(node, score)` entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredNode {
    pub node: NodeId,
    pub score: f64,
}

/// Top-k rankings for the four centrality measures
///
/// Closeness and betweenness cover the largest component only; betweenness is a
/// pivot-sampled estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityReport {
    pub degree: Vec<ScoredNode>,
    pub closeness: Vec<ScoredNode>,
    pub betweenness: Vec<ScoredNode>,
    pub pagerank: Vec<ScoredNode>,
    /// Size of the component closeness and betweenness were computed on
    pub lcc_nodes: usize,
    /// Pivot sources actually used
    pub betweenness_samples: usize,
}

/// Sampled local clustering plus exact transitivity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClusteringReport {
    pub avg_clustering_est: f64,
    pub avg_clustering_std: f64,
    pub transitivity: f64,
    /// Nodes actually sampled
    pub samples: usize,
}

/// k-core size and the graph's degeneracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KCoreReport {
    pub k: usize,
    pub k_core_size: usize,
    pub k_core_edges: usize,
    pub max_core_number: usize,
}

/// Size of one community in the Louvain ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommunitySize {
    /// Rank of the community (0 = largest)
    pub community: usize,
    pub size: usize,
}

/// Louvain partition summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityReport {
    /// Number of communities
    pub communities: usize,
    pub modularity: f64,
    /// Up to 15 largest communities
    pub top_sizes: Vec<CommunitySize>,
    pub seed: u64,
}

/// Degree assortativity coefficient
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssortativityReport {
    /// `null` when undefined (no edges, or every edge endpoint has the same degree)
    pub assortativity: Option<f64>,
}

/// Graph signature echoed by cut reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphSize {
    pub nodes: usize,
    pub edges: usize,
}

/// Articulation point entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CutVertex {
    pub node: NodeId,
}

/// Bridge entry, `u < v`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BridgeEdge {
    pub u: NodeId,
    pub v: NodeId,
}

/// First `k` entries of a cached cut list plus the true total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutListReport<T> {
    /// Total entries in the full list
    pub count: usize,
    /// Requested count after clamping to at least 1
    pub k: usize,
    pub returned: usize,
    pub top: Vec<T>,
    pub graph: GraphSize,
    /// Duration of the computation that produced the cached lists
    pub cached_compute_secs: f64,
}

/// Cut analysis totals without the lists
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BridgeSummary {
    pub graph: GraphSize,
    pub articulation_points: usize,
    pub bridges: usize,
    pub cached_compute_secs: f64,
}

/// Induced ego network around one node
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EgoNetworkReport {
    pub node: NodeId,
    pub radius: usize,
    pub ego_nodes: usize,
    pub ego_edges: usize,
    /// Average clustering inside the ego network, 0 below two nodes
    pub avg_clustering_in_ego: f64,
}

/// Neighbor listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborsReport {
    pub node: NodeId,
    pub total_neighbors: usize,
    pub returned_count: usize,
    /// Ascending by id
    pub neighbors: Vec<NodeId>,
    pub has_more: bool,
}

/// One friend suggestion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub node: NodeId,
    pub score: f64,
    pub common_neighbors_count: usize,
    /// Up to five shared neighbors, ascending
    pub common_neighbors_sample: Vec<NodeId>,
}

/// Adamic–Adar suggestions for one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationReport {
    pub target_node: NodeId,
    pub recommendations: Vec<Recommendation>,
    /// Candidates with a positive score before truncation
    pub total_candidates_found: usize,
}

/// Sampled diameter lower bound over the largest component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiameterReport {
    pub diameter_est: usize,
    pub lcc_nodes: usize,
    /// Sources actually traversed
    pub samples: usize,
}

/// Unweighted shortest path; `length` and `path` are `null` across components
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathReport {
    pub u: NodeId,
    pub v: NodeId,
    pub length: Option<usize>,
    pub path: Option<Vec<NodeId>>,
}

/// Component count and the largest sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSummary {
    pub components: usize,
    /// Descending
    pub top_sizes: Vec<usize>,
}

/// Raw degree ranking entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DegreeEntry {
    pub node: NodeId,
    pub degree: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_serializes_as_null() {
        let report = PathReport {
            u: NodeId(1),
            v: NodeId(3),
            length: None,
            path: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["u"], 1);
        assert!(json["length"].is_null());
        assert!(json["path"].is_null());
    }

    #[test]
    fn test_bridge_list_shape() {
        let report = CutListReport {
            count: 3,
            k: 1,
            returned: 1,
            top: vec![BridgeEdge {
                u: NodeId(1),
                v: NodeId(2),
            }],
            graph: GraphSize { nodes: 4, edges: 3 },
            cached_compute_secs: 0.0,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["top"][0]["u"], 1);
        assert_eq!(json["top"][0]["v"], 2);
        assert_eq!(json["graph"]["edges"], 3);
    }

    #[test]
    fn test_undefined_assortativity_is_null() {
        let json = serde_json::to_value(AssortativityReport {
            assortativity: None,
        })
        .unwrap();
        assert!(json["assortativity"].is_null());
    }
}
