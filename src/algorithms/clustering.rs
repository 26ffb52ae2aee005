//! Clustering coefficients and transitivity
//!
//! Triangle counting uses sorted-row intersection: for node `v`,
//! `T(v) = ½ Σ_{u ∈ N(v)} |N(v) ∩ N(u)|`.
//!
//! # References
//! - Watts & Strogatz (1998): "Collective dynamics of 'small-world' networks"
//! - Newman (2003): "The structure and function of complex networks" (transitivity)

use crate::storage::SocialGraph;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Size of the intersection of two ascending slices
fn intersection_len(a: &[u32], b: &[u32]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

/// Number of triangles through node `v`
#[must_use]
pub fn triangles(graph: &SocialGraph, v: usize) -> usize {
    let row = graph.neighbors(v);
    let twice: usize = row
        .iter()
        .map(|&u| intersection_len(row, graph.neighbors(u as usize)))
        .sum();
    twice / 2
}

/// Local clustering coefficient `2T(v) / (d(d - 1))`; 0 for degree < 2
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn local_clustering(graph: &SocialGraph, v: usize) -> f64 {
    let d = graph.degree(v);
    if d < 2 {
        return 0.0;
    }
    (2 * triangles(graph, v)) as f64 / (d * (d - 1)) as f64
}

/// Global transitivity: closed triads / all connected triads
///
/// Exact, over the whole graph. Equals `3 × triangles / triads`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn transitivity(graph: &SocialGraph) -> f64 {
    let (closed, triads) = (0..graph.num_nodes()).fold((0_usize, 0_usize), |(closed, triads), v| {
        let d = graph.degree(v);
        if d < 2 {
            (closed, triads)
        } else {
            (closed + triangles(graph, v), triads + d * (d - 1) / 2)
        }
    });

    if triads == 0 {
        0.0
    } else {
        closed as f64 / triads as f64
    }
}

/// Sampled estimate of the average local clustering coefficient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusteringSample {
    /// Sample mean of the local coefficients
    pub mean: f64,
    /// Population standard deviation of the sampled coefficients
    pub std_dev: f64,
    /// Number of distinct nodes sampled
    pub samples: usize,
}

/// Estimate average clustering from `min(samples, n)` distinct seeded-random nodes
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sampled_clustering(graph: &SocialGraph, samples: usize, seed: u64) -> ClusteringSample {
    let n = graph.num_nodes();
    let amount = samples.min(n);
    let mut rng = StdRng::seed_from_u64(seed);

    debug!(nodes = n, samples = amount, seed, "sampling local clustering");

    let values: Vec<f64> = rand::seq::index::sample(&mut rng, n, amount)
        .into_iter()
        .map(|v| local_clustering(graph, v))
        .collect();

    if values.is_empty() {
        return ClusteringSample {
            mean: 0.0,
            std_dev: 0.0,
            samples: 0,
        };
    }

    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count;

    ClusteringSample {
        mean,
        std_dev: variance.sqrt(),
        samples: values.len(),
    }
}

/// Average clustering of the subgraph induced by `members`
///
/// Coefficients are computed with adjacency restricted to `members`; nodes with
/// fewer than two in-set neighbors contribute 0. Returns 0 for fewer than 2 members.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn induced_average_clustering(graph: &SocialGraph, members: &[usize]) -> f64 {
    if members.len() < 2 {
        return 0.0;
    }

    let mut in_set = vec![false; graph.num_nodes()];
    for &v in members {
        in_set[v] = true;
    }

    let restricted = |v: usize| -> Vec<u32> {
        graph
            .neighbors(v)
            .iter()
            .copied()
            .filter(|&u| in_set[u as usize])
            .collect()
    };

    let total: f64 = members
        .iter()
        .map(|&v| {
            let row = restricted(v);
            let d = row.len();
            if d < 2 {
                return 0.0;
            }
            let twice: usize = row
                .iter()
                .map(|&u| intersection_len(&row, &restricted(u as usize)))
                .sum();
            twice as f64 / (d * (d - 1)) as f64
        })
        .sum();

    total / members.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::NodeId;

    fn graph(edges: &[(u64, u64)]) -> SocialGraph {
        SocialGraph::from_edges(edges.iter().map(|&(u, v)| (NodeId(u), NodeId(v))))
    }

    #[test]
    fn test_triangle_local_clustering() {
        let graph = graph(&[(0, 1), (1, 2), (2, 0)]);
        for v in 0..3 {
            assert_eq!(triangles(&graph, v), 1);
            assert!((local_clustering(&graph, v) - 1.0).abs() < 1e-12);
        }
        assert!((transitivity(&graph) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_star_has_no_triangles() {
        let graph = graph(&[(0, 1), (0, 2), (0, 3)]);
        assert_eq!(local_clustering(&graph, 0), 0.0);
        assert_eq!(transitivity(&graph), 0.0);
    }

    #[test]
    fn test_triangle_with_tail() {
        // Triangle 0-1-2 plus pendant 2-3
        let graph = graph(&[(0, 1), (1, 2), (2, 0), (2, 3)]);
        // Node 2: degree 3, one triangle -> 1/3
        assert!((local_clustering(&graph, 2) - 1.0 / 3.0).abs() < 1e-12);
        // 3 closed triads out of 1 + 1 + 3 = 5
        assert!((transitivity(&graph) - 3.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_sampled_clustering_full_sample_is_exact_mean() {
        let graph = graph(&[(0, 1), (1, 2), (2, 0), (2, 3)]);
        let sample = sampled_clustering(&graph, 5000, 42);
        assert_eq!(sample.samples, 4);
        let expected = (1.0 + 1.0 + 1.0 / 3.0 + 0.0) / 4.0;
        assert!((sample.mean - expected).abs() < 1e-12);
        assert!(sample.std_dev > 0.0);
    }

    #[test]
    fn test_sampled_clustering_empty_graph() {
        let sample = sampled_clustering(&SocialGraph::new(), 10, 1);
        assert_eq!(sample.samples, 0);
        assert_eq!(sample.mean, 0.0);
    }

    #[test]
    fn test_induced_clustering_ignores_outside_nodes() {
        // Triangle 0-1-2 and 2-3; inducing on {0, 2, 3} leaves a path 0-2-3
        let graph = graph(&[(0, 1), (1, 2), (2, 0), (2, 3)]);
        assert_eq!(induced_average_clustering(&graph, &[0, 2, 3]), 0.0);
        assert!((induced_average_clustering(&graph, &[0, 1, 2]) - 1.0).abs() < 1e-12);
        assert_eq!(induced_average_clustering(&graph, &[0]), 0.0);
    }
}
