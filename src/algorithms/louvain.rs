//! Louvain community detection algorithm
//!
//! Greedy modularity optimization in two alternating phases:
//! 1. Local moving: visit nodes (seeded-random order) and move each into the
//!    neighboring community with the largest positive modularity gain, until a full
//!    pass moves nothing
//! 2. Aggregation: contract every community into a super-node (intra-community
//!    weight becomes a self-loop) and repeat on the smaller graph
//!
//! Stops when a level produces no move. Results depend on visitation order, so the
//! same seed reproduces the same partition.
//!
//! # References
//! - Blondel et al. (2008): "Fast unfolding of communities in large networks"
//! - Newman & Girvan (2004): "Finding and evaluating community structure in networks"

use crate::storage::{NodeId, SocialGraph};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use tracing::debug;

/// Minimum gain for a move to count as an improvement
const MIN_GAIN: f64 = 1e-12;

/// Upper bound on local-moving passes per level
const MAX_PASSES: usize = 100;

/// Community detection result
#[derive(Debug, Clone)]
pub struct CommunityDetectionResult {
    /// Communities, largest first (ties: smallest member id first); members ascending
    pub communities: Vec<Vec<NodeId>>,

    /// Total number of communities found
    pub num_communities: usize,

    /// Modularity score of the partition on the original graph
    pub modularity: f64,
}

impl CommunityDetectionResult {
    /// Get the community ID for a given node
    ///
    /// Returns None if node not found in any community
    #[must_use]
    pub fn get_community(&self, node: NodeId) -> Option<usize> {
        self.communities
            .iter()
            .position(|community| community.binary_search(&node).is_ok())
    }

    /// Get all nodes in a specific community
    #[must_use]
    pub fn get_community_nodes(&self, comm_id: usize) -> Option<&[NodeId]> {
        self.communities.get(comm_id).map(Vec::as_slice)
    }

    /// Get size of a specific community
    #[must_use]
    pub fn community_size(&self, comm_id: usize) -> Option<usize> {
        self.communities.get(comm_id).map(Vec::len)
    }
}

/// Weighted graph for one Louvain level
struct LevelGraph {
    /// Neighbor rows without self-loops, ascending by neighbor
    adjacency: Vec<Vec<(usize, f64)>>,
    /// Self-loop weight per node
    self_loops: Vec<f64>,
    /// Weighted degree: Σ row weights + 2 × self-loop
    degree: Vec<f64>,
}

impl LevelGraph {
    #[allow(clippy::cast_precision_loss)]
    fn from_graph(graph: &SocialGraph) -> Self {
        let n = graph.num_nodes();
        let adjacency: Vec<Vec<(usize, f64)>> = (0..n)
            .map(|v| {
                graph
                    .neighbors(v)
                    .iter()
                    .map(|&u| (u as usize, 1.0))
                    .collect()
            })
            .collect();
        let degree = (0..n).map(|v| graph.degree(v) as f64).collect();

        Self {
            adjacency,
            self_loops: vec![0.0; n],
            degree,
        }
    }

    fn len(&self) -> usize {
        self.degree.len()
    }

    /// Local moving phase; returns the community of every node and whether any moved
    fn local_moving(&self, two_m: f64, rng: &mut StdRng) -> (Vec<usize>, bool) {
        let n = self.len();
        let mut community: Vec<usize> = (0..n).collect();
        let mut total: Vec<f64> = self.degree.clone();

        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);

        let mut weight_to = vec![0.0_f64; n];
        let mut seen = vec![false; n];
        let mut touched: Vec<usize> = Vec::new();
        let mut moved_any = false;

        for _ in 0..MAX_PASSES {
            let mut moves = 0_usize;

            for &node in &order {
                let current = community[node];
                let k_i = self.degree[node];

                for &(neighbor, weight) in &self.adjacency[node] {
                    let c = community[neighbor];
                    if !seen[c] {
                        seen[c] = true;
                        touched.push(c);
                    }
                    weight_to[c] += weight;
                }

                total[current] -= k_i;
                let mut best = current;
                let mut best_gain = weight_to[current] - total[current] * k_i / two_m;
                for &c in &touched {
                    let gain = weight_to[c] - total[c] * k_i / two_m;
                    if gain > best_gain + MIN_GAIN {
                        best = c;
                        best_gain = gain;
                    }
                }
                total[best] += k_i;
                community[node] = best;

                if best != current {
                    moves += 1;
                }

                for &c in &touched {
                    seen[c] = false;
                    weight_to[c] = 0.0;
                }
                touched.clear();
            }

            if moves == 0 {
                break;
            }
            moved_any = true;
        }

        (community, moved_any)
    }

    /// Contract communities (already renumbered to `0..count`) into super-nodes
    fn aggregate(&self, community: &[usize], count: usize) -> Self {
        let mut rows: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); count];
        let mut self_loops = vec![0.0_f64; count];
        let mut degree = vec![0.0_f64; count];

        for node in 0..self.len() {
            let c = community[node];
            self_loops[c] += self.self_loops[node];
            degree[c] += self.degree[node];
            for &(neighbor, weight) in &self.adjacency[node] {
                let d = community[neighbor];
                if c == d {
                    // Each internal edge is seen from both endpoints
                    self_loops[c] += weight / 2.0;
                } else {
                    *rows[c].entry(d).or_insert(0.0) += weight;
                }
            }
        }

        Self {
            adjacency: rows.into_iter().map(|row| row.into_iter().collect()).collect(),
            self_loops,
            degree,
        }
    }
}

/// Renumber community labels to `0..count` in order of first appearance
fn renumber(labels: &[usize]) -> (Vec<usize>, usize) {
    let mut mapping = vec![usize::MAX; labels.len()];
    let mut next = 0;
    let renumbered = labels
        .iter()
        .map(|&label| {
            if mapping[label] == usize::MAX {
                mapping[label] = next;
                next += 1;
            }
            mapping[label]
        })
        .collect();
    (renumbered, next)
}

/// Newman modularity of a partition (`membership[v]` = community of node `v`)
///
/// `Q = Σ_c [ L_c / m − (D_c / 2m)² ]` with `L_c` intra-community edges and `D_c`
/// the degree sum of community `c`. Zero for graphs without edges.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn modularity(graph: &SocialGraph, membership: &[usize]) -> f64 {
    let m = graph.num_edges() as f64;
    if m == 0.0 {
        return 0.0;
    }

    let count = membership.iter().copied().max().map_or(0, |c| c + 1);
    let mut internal = vec![0.0_f64; count];
    let mut degree_sum = vec![0.0_f64; count];

    for (u, v) in graph.edges() {
        if membership[u] == membership[v] {
            internal[membership[u]] += 1.0;
        }
    }
    for (v, &c) in membership.iter().enumerate() {
        degree_sum[c] += graph.degree(v) as f64;
    }

    internal
        .iter()
        .zip(&degree_sum)
        .map(|(l, d)| l / m - (d / (2.0 * m)).powi(2))
        .sum()
}

/// Detect communities using the Louvain algorithm
///
/// # Arguments
///
/// * `graph` - The graph to analyze
/// * `seed` - Seed for node visitation order
///
/// # Returns
///
/// `CommunityDetectionResult` containing communities and modularity score. Isolated
/// nodes form singleton communities.
///
/// # Example
///
/// ```
/// use sna_graph::{NodeId, SocialGraph};
/// use sna_graph::algorithms::louvain;
///
/// let graph = SocialGraph::from_edges([
///     (NodeId(0), NodeId(1)), (NodeId(1), NodeId(2)), (NodeId(2), NodeId(0)),
///     (NodeId(3), NodeId(4)), (NodeId(4), NodeId(5)), (NodeId(5), NodeId(3)),
/// ]);
///
/// let result = louvain(&graph, 42);
/// assert_eq!(result.num_communities, 2);
/// assert!(result.modularity > 0.0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn louvain(graph: &SocialGraph, seed: u64) -> CommunityDetectionResult {
    let n = graph.num_nodes();
    let two_m = 2.0 * graph.num_edges() as f64;
    let mut membership: Vec<usize> = (0..n).collect();

    if two_m > 0.0 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut level = LevelGraph::from_graph(graph);
        let mut depth = 0_usize;

        loop {
            let (partition, moved) = level.local_moving(two_m, &mut rng);
            if !moved {
                break;
            }
            let (renumbered, count) = renumber(&partition);
            for slot in &mut membership {
                *slot = renumbered[*slot];
            }
            depth += 1;
            debug!(level = depth, communities = count, "louvain level contracted");
            level = level.aggregate(&renumbered, count);
        }
    }

    let (membership, count) = renumber(&membership);
    let score = modularity(graph, &membership);

    let mut communities: Vec<Vec<NodeId>> = vec![Vec::new(); count];
    for (v, &c) in membership.iter().enumerate() {
        communities[c].push(graph.node_id(v));
    }
    communities.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.first().cmp(&b.first())));

    CommunityDetectionResult {
        num_communities: communities.len(),
        communities,
        modularity: score,
    }
}
