//! Query engine: one immutable graph, a fixed set of read-only analytical queries
//!
//! [`Engine`] owns a shared handle to the loaded graph and the cut-analysis cache.
//! Each query method runs its algorithm to completion and returns a serializable
//! record from [`report`]. Conditions a caller can recover from (unknown node,
//! unparsable id) come back as [`QueryError`]; "no path" is a `null` field, not an
//! error.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sna_graph::{Engine, EngineConfig, NodeId, SocialGraph};
//!
//! let graph = SocialGraph::from_edges([
//!     (NodeId(1), NodeId(2)), (NodeId(2), NodeId(3)), (NodeId(3), NodeId(4)),
//! ]);
//! let engine = Engine::new(Arc::new(graph), EngineConfig::default());
//!
//! let path = engine.shortest_path(NodeId(1), NodeId(4)).unwrap();
//! assert_eq!(path.length, Some(3));
//!
//! let cuts = engine.bridge_summary();
//! assert_eq!(cuts.articulation_points, 2);
//! assert_eq!(cuts.bridges, 3);
//! ```

pub mod cache;
pub mod report;
pub mod store;

pub use cache::{CacheStatus, CutAnalysis, CutCache, GraphSignature};
pub use store::{GraphSource, GraphStore};

use crate::algorithms::{
    adamic_adar, betweenness_centrality, closeness_centrality, component_sizes,
    degree_centrality, estimate_diameter, induced_average_clustering, k_core, largest_component,
    louvain, pagerank, sampled_clustering, shortest_path, top_k, transitivity, within_radius,
};
use crate::config::EngineConfig;
use crate::error::{GraphResult, QueryError, QueryResult};
use crate::storage::{NodeId, SocialGraph};
use report::{
    AssortativityReport, BridgeEdge, BridgeSummary, CentralityReport, ClusteringReport,
    CommunityReport, CommunitySize, ComponentSummary, CutListReport, CutVertex, DegreeEntry,
    DiameterReport, EgoNetworkReport, GraphOverview, GraphSize, KCoreReport, NeighborsReport,
    PathReport, Recommendation, RecommendationReport, ScoredNode,
};
use std::sync::Arc;
use tracing::debug;

/// Communities listed in the Louvain summary
pub const COMMUNITY_TOP_SIZES: usize = 15;

/// Shared neighbors shown per recommendation
pub const COMMON_NEIGHBOR_SAMPLE: usize = 5;

/// Analytical query surface over one loaded graph
#[derive(Debug)]
pub struct Engine {
    graph: Arc<SocialGraph>,
    config: EngineConfig,
    cuts: CutCache,
}

impl Engine {
    /// Create an engine over an already-loaded graph
    #[must_use]
    pub fn new(graph: Arc<SocialGraph>, config: EngineConfig) -> Self {
        Self {
            graph,
            config,
            cuts: CutCache::new(),
        }
    }

    /// Load the configured source and create an engine over it
    ///
    /// # Errors
    ///
    /// Returns the [`GraphError`](crate::GraphError) of a failed load
    pub async fn open(config: EngineConfig) -> GraphResult<Self> {
        let store = GraphStore::new(GraphSource::from_config(&config)?);
        let graph = store.load().await?;
        Ok(Self::new(graph, config))
    }

    /// Shared handle to the graph
    #[must_use]
    pub fn graph(&self) -> &Arc<SocialGraph> {
        &self.graph
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Cut-analysis cache (for diagnostics)
    #[must_use]
    pub fn cut_cache(&self) -> &CutCache {
        &self.cuts
    }

    fn index(&self, node: NodeId) -> QueryResult<usize> {
        self.graph
            .index_of(node)
            .ok_or(QueryError::NodeNotFound { node })
    }

    fn scored(&self, ranked: Vec<(usize, f64)>) -> Vec<ScoredNode> {
        ranked
            .into_iter()
            .map(|(v, score)| ScoredNode {
                node: self.graph.node_id(v),
                score,
            })
            .collect()
    }

    fn graph_size(&self) -> GraphSize {
        GraphSize {
            nodes: self.graph.num_nodes(),
            edges: self.graph.num_edges(),
        }
    }

    /// Node/edge counts, density, component structure and mean degree
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn graph_overview(&self) -> GraphOverview {
        let n = self.graph.num_nodes();
        let m = self.graph.num_edges();
        let sizes = component_sizes(&self.graph);
        let largest = sizes.first().copied().unwrap_or(0);

        let density = if n < 2 {
            0.0
        } else {
            (2 * m) as f64 / (n * (n - 1)) as f64
        };
        let (fraction, avg_degree) = if n == 0 {
            (0.0, 0.0)
        } else {
            (largest as f64 / n as f64, (2 * m) as f64 / n as f64)
        };

        GraphOverview {
            nodes: n,
            edges: m,
            density,
            connected_components: sizes.len(),
            largest_component_size: largest,
            largest_component_fraction: fraction,
            avg_degree,
            is_connected: n > 0 && sizes.len() == 1,
        }
    }

    /// Top-k degree, closeness, betweenness and `PageRank` rankings
    ///
    /// Closeness and betweenness run on the largest component; betweenness uses
    /// `min(betweenness_samples, |LCC|)` seeded pivots.
    #[must_use]
    pub fn centralities_top_k(
        &self,
        k: usize,
        betweenness_samples: usize,
        seed: u64,
    ) -> CentralityReport {
        let graph = &*self.graph;
        let lcc = largest_component(graph);
        let pivots = betweenness_samples.min(lcc.len());
        debug!(k, lcc_nodes = lcc.len(), pivots, seed, "centralities");

        let degree = top_k(degree_centrality(graph).into_iter().enumerate(), k);
        let closeness = top_k(closeness_centrality(graph, &lcc), k);
        let betweenness = top_k(betweenness_centrality(graph, &lcc, pivots, seed), k);
        let pr = &self.config.pagerank;
        let ranks = top_k(
            pagerank(graph, pr.damping, pr.max_iterations, pr.tolerance)
                .into_iter()
                .enumerate(),
            k,
        );

        CentralityReport {
            degree: self.scored(degree),
            closeness: self.scored(closeness),
            betweenness: self.scored(betweenness),
            pagerank: self.scored(ranks),
            lcc_nodes: lcc.len(),
            betweenness_samples: pivots,
        }
    }

    /// Sampled average clustering with exact global transitivity
    #[must_use]
    pub fn clustering_stats(&self, samples: usize, seed: u64) -> ClusteringReport {
        let sample = sampled_clustering(&self.graph, samples, seed);
        ClusteringReport {
            avg_clustering_est: sample.mean,
            avg_clustering_std: sample.std_dev,
            transitivity: transitivity(&self.graph),
            samples: sample.samples,
        }
    }

    /// Size of the k-core and the maximum core number
    #[must_use]
    pub fn k_core_summary(&self, k: usize) -> KCoreReport {
        let core = k_core(&self.graph, k);
        KCoreReport {
            k,
            k_core_size: core.nodes,
            k_core_edges: core.edges,
            max_core_number: core.max_core,
        }
    }

    /// Louvain partition: count, modularity and the largest community sizes
    #[must_use]
    pub fn louvain_communities(&self, seed: u64) -> CommunityReport {
        let result = louvain(&self.graph, seed);
        let top_sizes = result
            .communities
            .iter()
            .take(COMMUNITY_TOP_SIZES)
            .enumerate()
            .map(|(community, members)| CommunitySize {
                community,
                size: members.len(),
            })
            .collect();

        CommunityReport {
            communities: result.num_communities,
            modularity: result.modularity,
            top_sizes,
            seed,
        }
    }

    /// Degree assortativity coefficient
    #[must_use]
    pub fn degree_assortativity(&self) -> AssortativityReport {
        AssortativityReport {
            assortativity: crate::algorithms::degree_assortativity(&self.graph),
        }
    }

    /// Current cut analysis, from cache when the graph signature still matches
    #[must_use]
    pub fn cut_analysis(&self) -> (Arc<CutAnalysis>, CacheStatus) {
        self.cuts.get_or_compute(&self.graph)
    }

    /// First `k` articulation points (ascending) plus the total count; `k` is
    /// clamped to at least 1
    #[must_use]
    pub fn articulation_points_top_k(&self, k: usize) -> CutListReport<CutVertex> {
        let k = k.max(1);
        let (analysis, _) = self.cut_analysis();
        let top: Vec<CutVertex> = analysis
            .articulation_points
            .iter()
            .take(k)
            .map(|&node| CutVertex { node })
            .collect();

        CutListReport {
            count: analysis.articulation_points.len(),
            k,
            returned: top.len(),
            top,
            graph: self.graph_size(),
            cached_compute_secs: analysis.compute_duration.as_secs_f64(),
        }
    }

    /// First `k` bridges (ascending by `(u, v)`) plus the total count; `k` is
    /// clamped to at least 1
    #[must_use]
    pub fn bridges_top_k(&self, k: usize) -> CutListReport<BridgeEdge> {
        let k = k.max(1);
        let (analysis, _) = self.cut_analysis();
        let top: Vec<BridgeEdge> = analysis
            .bridges
            .iter()
            .take(k)
            .map(|&(u, v)| BridgeEdge { u, v })
            .collect();

        CutListReport {
            count: analysis.bridges.len(),
            k,
            returned: top.len(),
            top,
            graph: self.graph_size(),
            cached_compute_secs: analysis.compute_duration.as_secs_f64(),
        }
    }

    /// Cut-vertex and bridge totals
    #[must_use]
    pub fn bridge_summary(&self) -> BridgeSummary {
        let (analysis, _) = self.cut_analysis();
        BridgeSummary {
            graph: self.graph_size(),
            articulation_points: analysis.articulation_points.len(),
            bridges: analysis.bridges.len(),
            cached_compute_secs: analysis.compute_duration.as_secs_f64(),
        }
    }

    /// Induced subgraph within `radius` hops of `node`
    ///
    /// # Errors
    ///
    /// [`QueryError::NodeNotFound`] if `node` is absent
    pub fn ego_network(&self, node: NodeId, radius: usize) -> QueryResult<EgoNetworkReport> {
        let center = self.index(node)?;
        let graph = &*self.graph;
        let members = within_radius(graph, center, radius);

        let mut in_ego = vec![false; graph.num_nodes()];
        for &v in &members {
            in_ego[v] = true;
        }
        let endpoints: usize = members
            .iter()
            .map(|&v| {
                graph
                    .neighbors(v)
                    .iter()
                    .filter(|&&u| in_ego[u as usize])
                    .count()
            })
            .sum();

        Ok(EgoNetworkReport {
            node,
            radius,
            ego_nodes: members.len(),
            ego_edges: endpoints / 2,
            avg_clustering_in_ego: induced_average_clustering(graph, &members),
        })
    }

    /// Neighbors of a node given by its raw identifier
    ///
    /// Truncated to `limit` unless `show_all`; `has_more` flags truncation.
    ///
    /// # Errors
    ///
    /// - [`QueryError::InvalidNodeId`] if `raw` is not a non-negative integer
    /// - [`QueryError::NodeNotFound`] if the node is absent
    pub fn get_node_neighbors(
        &self,
        raw: &str,
        limit: usize,
        show_all: bool,
    ) -> QueryResult<NeighborsReport> {
        let node: NodeId = raw.parse().map_err(|_| QueryError::InvalidNodeId {
            raw: raw.to_string(),
        })?;
        let idx = self.index(node)?;

        let row = self.graph.neighbors(idx);
        let take = if show_all { row.len() } else { limit.min(row.len()) };
        let neighbors: Vec<NodeId> = row[..take]
            .iter()
            .map(|&u| self.graph.node_id(u as usize))
            .collect();

        Ok(NeighborsReport {
            node,
            total_neighbors: row.len(),
            returned_count: neighbors.len(),
            neighbors,
            has_more: row.len() > take,
        })
    }

    /// Top-k Adamic–Adar friend suggestions for `node`
    ///
    /// # Errors
    ///
    /// [`QueryError::NodeNotFound`] if `node` is absent
    pub fn recommend_friends(&self, node: NodeId, k: usize) -> QueryResult<RecommendationReport> {
        let source = self.index(node)?;
        let scored = adamic_adar(&self.graph, source, k);

        let recommendations = scored
            .ranked
            .into_iter()
            .map(|rec| Recommendation {
                node: self.graph.node_id(rec.candidate),
                score: rec.score,
                common_neighbors_count: rec.common_neighbors.len(),
                common_neighbors_sample: rec
                    .common_neighbors
                    .iter()
                    .take(COMMON_NEIGHBOR_SAMPLE)
                    .map(|&w| self.graph.node_id(w))
                    .collect(),
            })
            .collect();

        Ok(RecommendationReport {
            target_node: node,
            recommendations,
            total_candidates_found: scored.total_candidates,
        })
    }

    /// Sampled lower bound on the diameter of the largest component
    #[must_use]
    pub fn diameter_estimate(&self, samples: usize, seed: u64) -> DiameterReport {
        let estimate = estimate_diameter(&self.graph, samples, seed);
        DiameterReport {
            diameter_est: estimate.diameter,
            lcc_nodes: estimate.lcc_nodes,
            samples: estimate.samples,
        }
    }

    /// Unweighted shortest path from `u` to `v`
    ///
    /// # Errors
    ///
    /// [`QueryError::NodesNotFound`] if either endpoint is absent
    pub fn shortest_path(&self, u: NodeId, v: NodeId) -> QueryResult<PathReport> {
        let (Some(source), Some(target)) = (self.graph.index_of(u), self.graph.index_of(v)) else {
            return Err(QueryError::NodesNotFound { u, v });
        };

        let path: Option<Vec<NodeId>> = shortest_path(&self.graph, source, target)
            .map(|hops| hops.into_iter().map(|i| self.graph.node_id(i)).collect());

        Ok(PathReport {
            u,
            v,
            length: path.as_ref().map(|p| p.len() - 1),
            path,
        })
    }

    /// Component count and the `top` largest sizes
    #[must_use]
    pub fn component_summary(&self, top: usize) -> ComponentSummary {
        let sizes = component_sizes(&self.graph);
        ComponentSummary {
            components: sizes.len(),
            top_sizes: sizes.into_iter().take(top).collect(),
        }
    }

    /// Highest-degree nodes; `k` is clamped to at least 1
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn top_k_by_degree(&self, k: usize) -> Vec<DegreeEntry> {
        let graph = &*self.graph;
        let degrees = (0..graph.num_nodes()).map(|v| (v, graph.degree(v) as f64));

        top_k(degrees, k.max(1))
            .into_iter()
            .map(|(v, _)| DegreeEntry {
                node: graph.node_id(v),
                degree: graph.degree(v),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(edges: &[(u64, u64)]) -> Engine {
        let graph = SocialGraph::from_edges(edges.iter().map(|&(u, v)| (NodeId(u), NodeId(v))));
        Engine::new(Arc::new(graph), EngineConfig::default())
    }

    #[test]
    fn test_overview_two_components() {
        let overview = engine(&[(1, 2), (2, 3), (7, 8)]).graph_overview();
        assert_eq!(overview.nodes, 5);
        assert_eq!(overview.edges, 3);
        assert_eq!(overview.connected_components, 2);
        assert_eq!(overview.largest_component_size, 3);
        assert!((overview.largest_component_fraction - 0.6).abs() < 1e-12);
        assert!((overview.density - 0.3).abs() < 1e-12);
        assert!((overview.avg_degree - 1.2).abs() < 1e-12);
        assert!(!overview.is_connected);
    }

    #[test]
    fn test_overview_empty_graph() {
        let overview = engine(&[]).graph_overview();
        assert_eq!(overview.nodes, 0);
        assert_eq!(overview.largest_component_fraction, 0.0);
        assert_eq!(overview.avg_degree, 0.0);
        assert!(!overview.is_connected);
    }

    #[test]
    fn test_centralities_star() {
        let report = engine(&[(0, 1), (0, 2), (0, 3), (0, 4)]).centralities_top_k(2, 2000, 42);
        assert_eq!(report.degree[0], ScoredNode { node: NodeId(0), score: 1.0 });
        assert_eq!(report.degree[1].node, NodeId(1));
        assert_eq!(report.closeness[0].node, NodeId(0));
        assert_eq!(report.betweenness[0].node, NodeId(0));
        assert_eq!(report.pagerank[0].node, NodeId(0));
        assert_eq!(report.lcc_nodes, 5);
        assert_eq!(report.betweenness_samples, 5);
        assert_eq!(report.pagerank.len(), 2);
    }

    #[test]
    fn test_centralities_empty_graph() {
        let report = engine(&[]).centralities_top_k(10, 2000, 42);
        assert!(report.degree.is_empty());
        assert!(report.closeness.is_empty());
        assert!(report.betweenness.is_empty());
        assert!(report.pagerank.is_empty());
    }

    #[test]
    fn test_neighbors_truncation_and_errors() {
        let engine = engine(&[(1, 5), (1, 3), (1, 9), (1, 2)]);

        let report = engine.get_node_neighbors("1", 2, false).unwrap();
        assert_eq!(report.neighbors, vec![NodeId(2), NodeId(3)]);
        assert_eq!(report.total_neighbors, 4);
        assert_eq!(report.returned_count, 2);
        assert!(report.has_more);

        let all = engine.get_node_neighbors(" 1 ", 2, true).unwrap();
        assert_eq!(all.returned_count, 4);
        assert!(!all.has_more);

        assert_eq!(
            engine.get_node_neighbors("x1", 2, false),
            Err(QueryError::InvalidNodeId { raw: "x1".into() })
        );
        assert_eq!(
            engine.get_node_neighbors("42", 2, false),
            Err(QueryError::NodeNotFound { node: NodeId(42) })
        );
    }

    #[test]
    fn test_ego_network() {
        // Triangle 1-2-3 with tail 3-4
        let engine = engine(&[(1, 2), (2, 3), (3, 1), (3, 4)]);

        let ego = engine.ego_network(NodeId(1), 1).unwrap();
        assert_eq!(ego.ego_nodes, 3);
        assert_eq!(ego.ego_edges, 3);
        assert!((ego.avg_clustering_in_ego - 1.0).abs() < 1e-12);

        let lone = engine.ego_network(NodeId(4), 0).unwrap();
        assert_eq!(lone.ego_nodes, 1);
        assert_eq!(lone.avg_clustering_in_ego, 0.0);

        assert!(matches!(
            engine.ego_network(NodeId(99), 1),
            Err(QueryError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn test_cut_lists_clamp_k() {
        let engine = engine(&[(1, 2), (2, 3), (3, 4)]);

        let points = engine.articulation_points_top_k(0);
        assert_eq!(points.k, 1);
        assert_eq!(points.returned, 1);
        assert_eq!(points.count, 2);
        assert_eq!(points.top, vec![CutVertex { node: NodeId(2) }]);

        let bridges = engine.bridges_top_k(10);
        assert_eq!(bridges.count, 3);
        assert_eq!(bridges.returned, 3);
        assert_eq!(bridges.graph, GraphSize { nodes: 4, edges: 3 });
    }

    #[test]
    fn test_cut_queries_share_cache() {
        let engine = engine(&[(1, 2), (2, 3)]);
        assert_eq!(engine.cut_analysis().1, CacheStatus::Computed);
        let _ = engine.bridges_top_k(5);
        assert_eq!(engine.cut_analysis().1, CacheStatus::Hit);
    }

    #[test]
    fn test_recommend_friends_sample_capped() {
        // 0 and 100 share seven neighbors
        let mut edges: Vec<(u64, u64)> = (1..=7).map(|w| (0, w)).collect();
        edges.extend((1..=7).map(|w| (w, 100)));
        let report = engine(&edges).recommend_friends(NodeId(0), 5).unwrap();

        assert_eq!(report.recommendations.len(), 1);
        let rec = &report.recommendations[0];
        assert_eq!(rec.node, NodeId(100));
        assert_eq!(rec.common_neighbors_count, 7);
        assert_eq!(
            rec.common_neighbors_sample,
            (1..=5).map(NodeId).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_shortest_path_missing_endpoint() {
        let engine = engine(&[(1, 2)]);
        assert_eq!(
            engine.shortest_path(NodeId(1), NodeId(9)),
            Err(QueryError::NodesNotFound {
                u: NodeId(1),
                v: NodeId(9)
            })
        );
    }

    #[test]
    fn test_top_k_by_degree() {
        let engine = engine(&[(5, 1), (5, 2), (5, 3), (1, 2), (9, 9)]);
        let top = engine.top_k_by_degree(2);
        assert_eq!(
            top,
            vec![
                DegreeEntry { node: NodeId(5), degree: 3 },
                DegreeEntry { node: NodeId(1), degree: 2 },
            ]
        );
        assert_eq!(engine.top_k_by_degree(0).len(), 1);
    }

    #[test]
    fn test_louvain_summary_caps_sizes() {
        // 20 disjoint edges
        let edges: Vec<(u64, u64)> = (0..20).map(|i| (2 * i, 2 * i + 1)).collect();
        let report = engine(&edges).louvain_communities(42);
        assert_eq!(report.communities, 20);
        assert_eq!(report.top_sizes.len(), COMMUNITY_TOP_SIZES);
        assert!(report.top_sizes.iter().all(|c| c.size == 2));
    }

    #[test]
    fn test_k_core_summary() {
        let report = engine(&[(1, 2), (2, 3), (3, 1), (3, 4)]).k_core_summary(2);
        assert_eq!(report.k_core_size, 3);
        assert_eq!(report.k_core_edges, 3);
        assert_eq!(report.max_core_number, 2);
    }
}
