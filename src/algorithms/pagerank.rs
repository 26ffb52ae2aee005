//! `PageRank` by power iteration over the undirected CSR
//!
//! Based on Page et al. (1999) "The `PageRank` Citation Ranking: Bringing Order to the Web".
//! Each undirected edge acts as a link in both directions, so a node's out-degree is
//! simply its degree.

use crate::storage::SocialGraph;

/// Damping factor for `PageRank` (Google standard)
pub const DEFAULT_DAMPING: f64 = 0.85;

/// Compute `PageRank` scores for all nodes in the graph
///
/// # Arguments
///
/// * `graph` - CSR graph representation
/// * `damping` - Probability of following a link (0.85 by convention)
/// * `max_iterations` - Maximum number of power iterations
/// * `tolerance` - Per-node convergence threshold; iteration stops once the L1 change
///   drops below `n * tolerance`
///
/// # Returns
///
/// Vector of `PageRank` scores indexed by dense node index (sum = 1.0)
///
/// # Algorithm
///
/// ```text
/// PR(u) = (1-d)/N + d * Σ(PR(v) / degree(v)) + d * Σ(PR(isolated)) / N
/// ```
///
/// Isolated nodes have no links to follow, so their rank is spread uniformly.
///
/// # Example
///
/// ```
/// use sna_graph::{NodeId, SocialGraph};
/// use sna_graph::algorithms::pagerank;
///
/// let graph = SocialGraph::from_edges([
///     (NodeId(0), NodeId(1)),
///     (NodeId(1), NodeId(2)),
///     (NodeId(2), NodeId(0)),
/// ]);
///
/// let scores = pagerank(&graph, 0.85, 100, 1e-6);
/// assert_eq!(scores.len(), 3);
/// assert!((scores.iter().sum::<f64>() - 1.0).abs() < 1e-9);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)] // Graphs >2^52 nodes unlikely
pub fn pagerank(graph: &SocialGraph, damping: f64, max_iterations: usize, tolerance: f64) -> Vec<f64> {
    let n = graph.num_nodes();

    if n == 0 {
        return Vec::new();
    }

    let uniform = 1.0 / n as f64;
    let teleport = (1.0 - damping) * uniform;
    let threshold = tolerance * n as f64;

    // Initialize: uniform distribution
    let mut ranks = vec![uniform; n];
    let mut new_ranks = vec![0.0; n];

    for _ in 0..max_iterations {
        let dangling: f64 = (0..n)
            .filter(|&node| graph.degree(node) == 0)
            .map(|node| ranks[node])
            .sum();
        new_ranks.fill(teleport + damping * dangling * uniform);

        // Distribute rank from each node to its neighbors
        for node in 0..n {
            let neighbors = graph.neighbors(node);
            if neighbors.is_empty() {
                continue;
            }
            let contribution = damping * ranks[node] / neighbors.len() as f64;
            for &target in neighbors {
                new_ranks[target as usize] += contribution;
            }
        }

        // Check convergence (L1 norm)
        let diff: f64 = new_ranks
            .iter()
            .zip(&ranks)
            .map(|(new, old)| (new - old).abs())
            .sum();

        // Swap buffers
        std::mem::swap(&mut ranks, &mut new_ranks);

        if diff < threshold {
            break;
        }
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::NodeId;

    fn graph(edges: &[(u64, u64)]) -> SocialGraph {
        SocialGraph::from_edges(edges.iter().map(|&(u, v)| (NodeId(u), NodeId(v))))
    }

    #[test]
    fn test_pagerank_cycle_uniform() {
        let edges: Vec<(u64, u64)> = (0..10).map(|i| (i, (i + 1) % 10)).collect();
        let scores = pagerank(&graph(&edges), DEFAULT_DAMPING, 100, 1e-6);

        for score in &scores {
            assert!((*score - 0.1).abs() < 1e-6, "Score = {score}");
        }
    }

    #[test]
    fn test_pagerank_star_center_highest() {
        let scores = pagerank(&graph(&[(0, 1), (0, 2), (0, 3)]), DEFAULT_DAMPING, 100, 1e-8);

        assert!(scores[0] > scores[1]);
        assert!((scores[1] - scores[2]).abs() < 1e-9);
        assert!((scores[2] - scores[3]).abs() < 1e-9);
    }

    #[test]
    fn test_pagerank_sums_to_one_with_isolated_node() {
        let scores = pagerank(&graph(&[(0, 1), (1, 2), (9, 9)]), DEFAULT_DAMPING, 100, 1e-8);
        assert_eq!(scores.len(), 4);

        let sum: f64 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "Sum = {sum}");
    }

    #[test]
    fn test_pagerank_empty_graph() {
        assert!(pagerank(&SocialGraph::new(), DEFAULT_DAMPING, 20, 1e-6).is_empty());
    }

    #[test]
    fn test_pagerank_single_node() {
        let scores = pagerank(&graph(&[(3, 3)]), DEFAULT_DAMPING, 20, 1e-6);
        assert_eq!(scores.len(), 1);
        assert!((scores[0] - 1.0).abs() < 1e-12);
    }
}
