//! Centrality measures: degree, closeness, sampled betweenness
//!
//! # References
//! - Freeman (1978): "Centrality in social networks: conceptual clarification"
//! - Brandes (2001): "A faster algorithm for betweenness centrality"
//! - Brandes & Pich (2007): "Centrality estimation in large networks" (pivot sampling)

use super::traversal::UNREACHED;
use crate::storage::SocialGraph;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use tracing::debug;

/// Normalized degree centrality: `degree / (n - 1)` for every node
///
/// A single-node graph scores 1.0, mirroring the convention that a lone node is
/// maximally central to itself.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(graph: &SocialGraph) -> Vec<f64> {
    let n = graph.num_nodes();
    if n <= 1 {
        return vec![1.0; n];
    }
    let scale = 1.0 / (n - 1) as f64;
    (0..n).map(|v| graph.degree(v) as f64 * scale).collect()
}

/// Closeness centrality of every node in `component`
///
/// Runs one BFS per member. Scores follow the Wasserman–Faust improved formula,
/// normalized by reachable-set size:
///
/// ```text
/// C(v) = (r - 1) / Σ d(v, u) · (r - 1) / (N - 1)
/// ```
///
/// where `r` is the number of nodes reachable from `v` (itself included) and `N`
/// the component size. For a connected component `r == N`.
///
/// # Returns
///
/// `(index, score)` pairs in the order of `component`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_centrality(graph: &SocialGraph, component: &[usize]) -> Vec<(usize, f64)> {
    let total = component.len();
    let mut dist = vec![UNREACHED; graph.num_nodes()];
    let mut touched = Vec::with_capacity(total);
    let mut queue = VecDeque::with_capacity(total);

    component
        .iter()
        .map(|&source| {
            for &t in &touched {
                dist[t] = UNREACHED;
            }
            touched.clear();

            dist[source] = 0;
            touched.push(source);
            queue.push_back(source);
            let mut sum = 0_u64;

            while let Some(current) = queue.pop_front() {
                let next = dist[current] + 1;
                for &neighbor in graph.neighbors(current) {
                    let neighbor = neighbor as usize;
                    if dist[neighbor] == UNREACHED {
                        dist[neighbor] = next;
                        sum += u64::from(next);
                        touched.push(neighbor);
                        queue.push_back(neighbor);
                    }
                }
            }

            let reached = touched.len();
            let score = if sum > 0 && total > 1 {
                let r = (reached - 1) as f64;
                (r / sum as f64) * (r / (total - 1) as f64)
            } else {
                0.0
            };
            (source, score)
        })
        .collect()
}

/// Approximate betweenness centrality of every node in `component`
///
/// Brandes accumulation from `min(pivots, |component|)` distinct pivot sources drawn
/// with a seeded RNG. Scores are normalized by `1 / ((N - 1)(N - 2))` and extrapolated
/// by `N / pivots`, so with every member as a pivot the result is exact.
///
/// Results are estimates: compare them by rank or bounds, never bit-for-bit against
/// the exact measure.
///
/// # Returns
///
/// `(index, score)` pairs in the order of `component`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(
    graph: &SocialGraph,
    component: &[usize],
    pivots: usize,
    seed: u64,
) -> Vec<(usize, f64)> {
    let n = graph.num_nodes();
    let total = component.len();
    let pivots = pivots.min(total);
    let mut rng = StdRng::seed_from_u64(seed);

    debug!(component = total, pivots, seed, "sampled betweenness");

    let mut betweenness = vec![0.0_f64; n];
    let mut sigma = vec![0.0_f64; n];
    let mut delta = vec![0.0_f64; n];
    let mut dist = vec![UNREACHED; n];
    let mut stack: Vec<usize> = Vec::with_capacity(total);
    let mut queue = VecDeque::with_capacity(total);

    for pick in rand::seq::index::sample(&mut rng, total, pivots).into_iter() {
        let source = component[pick];

        for &v in &stack {
            sigma[v] = 0.0;
            delta[v] = 0.0;
            dist[v] = UNREACHED;
        }
        stack.clear();

        sigma[source] = 1.0;
        dist[source] = 0;
        queue.push_back(source);

        // BFS phase: shortest-path counts
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let next = dist[v] + 1;
            for &w in graph.neighbors(v) {
                let w = w as usize;
                if dist[w] == UNREACHED {
                    dist[w] = next;
                    queue.push_back(w);
                }
                if dist[w] == next {
                    sigma[w] += sigma[v];
                }
            }
        }

        // Accumulation phase: predecessors are neighbors one level closer
        for &w in stack.iter().rev() {
            let coefficient = (1.0 + delta[w]) / sigma[w];
            for &v in graph.neighbors(w) {
                let v = v as usize;
                if dist[v] != UNREACHED && dist[v] + 1 == dist[w] {
                    delta[v] += sigma[v] * coefficient;
                }
            }
            if w != source {
                betweenness[w] += delta[w];
            }
        }
    }

    let mut scale = if total > 2 {
        1.0 / ((total - 1) as f64 * (total - 2) as f64)
    } else {
        1.0
    };
    if pivots > 0 {
        scale *= total as f64 / pivots as f64;
    }

    component
        .iter()
        .map(|&v| (v, betweenness[v] * scale))
        .collect()
}
