//! Graph traversal algorithms (BFS, ego sets, shortest paths, eccentricity)
//!
//! Based on Ligra (Shun & Blelloch, `PPoPP` 2013) frontier-based traversal patterns.
//! All traversals are unweighted breadth-first sweeps over the CSR rows.

use super::structure::largest_component;
use crate::storage::SocialGraph;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use tracing::debug;

/// Distance marker for nodes a traversal never reached
pub const UNREACHED: u32 = u32::MAX;

/// Breadth-First Search from source node
///
/// # Returns
///
/// Dense indices of every node reachable from `source` (including it), in BFS order.
///
/// # Example
///
/// ```
/// use sna_graph::{NodeId, SocialGraph};
/// use sna_graph::algorithms::bfs;
///
/// let graph = SocialGraph::from_edges([(NodeId(0), NodeId(1)), (NodeId(1), NodeId(2))]);
///
/// let reachable = bfs(&graph, 0);
/// assert_eq!(reachable.len(), 3); // All 3 nodes reachable
/// ```
#[must_use]
pub fn bfs(graph: &SocialGraph, source: usize) -> Vec<usize> {
    within_radius(graph, source, usize::MAX)
}

/// Nodes within `radius` hops of `center`, in BFS order (center first)
///
/// Frontier-by-frontier expansion; radius 0 yields just the center.
#[must_use]
pub fn within_radius(graph: &SocialGraph, center: usize, radius: usize) -> Vec<usize> {
    let mut visited = vec![false; graph.num_nodes()];
    let mut frontier = vec![center];
    let mut reached = vec![center];
    visited[center] = true;

    let mut depth = 0;
    while !frontier.is_empty() && depth < radius {
        let mut next = Vec::new();
        for &current in &frontier {
            for &neighbor in graph.neighbors(current) {
                let neighbor = neighbor as usize;
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    next.push(neighbor);
                }
            }
        }
        reached.extend_from_slice(&next);
        frontier = next;
        depth += 1;
    }

    reached
}

/// Hop distances from `source` to every node ([`UNREACHED`] where unreachable)
#[must_use]
pub fn bfs_distances(graph: &SocialGraph, source: usize) -> Vec<u32> {
    let mut dist = vec![UNREACHED; graph.num_nodes()];
    let mut queue = VecDeque::new();
    dist[source] = 0;
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let next = dist[current] + 1;
        for &neighbor in graph.neighbors(current) {
            let neighbor = neighbor as usize;
            if dist[neighbor] == UNREACHED {
                dist[neighbor] = next;
                queue.push_back(neighbor);
            }
        }
    }

    dist
}

/// Eccentricity of `source`: the largest hop distance to any reachable node
#[must_use]
pub fn eccentricity(graph: &SocialGraph, source: usize) -> usize {
    bfs_distances(graph, source)
        .into_iter()
        .filter(|&d| d != UNREACHED)
        .max()
        .unwrap_or(0) as usize
}

/// Unweighted shortest path between two dense indices
///
/// # Returns
///
/// * `Some(path)` including both endpoints (`[source]` when `source == target`)
/// * `None` if they lie in different components
#[must_use]
pub fn shortest_path(graph: &SocialGraph, source: usize, target: usize) -> Option<Vec<usize>> {
    if source == target {
        return Some(vec![source]);
    }

    let mut parent = vec![usize::MAX; graph.num_nodes()];
    let mut queue = VecDeque::new();
    parent[source] = source;
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        for &neighbor in graph.neighbors(current) {
            let neighbor = neighbor as usize;
            if parent[neighbor] != usize::MAX {
                continue;
            }
            parent[neighbor] = current;
            if neighbor == target {
                return Some(reconstruct_path(&parent, source, target));
            }
            queue.push_back(neighbor);
        }
    }

    None
}

fn reconstruct_path(parent: &[usize], source: usize, target: usize) -> Vec<usize> {
    let mut path = vec![target];
    let mut current = target;
    while current != source {
        current = parent[current];
        path.push(current);
    }
    path.reverse();
    path
}

/// Sampled diameter estimate over the largest connected component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiameterEstimate {
    /// Largest eccentricity observed (a lower bound on the true diameter)
    pub diameter: usize,
    /// Size of the largest connected component
    pub lcc_nodes: usize,
    /// Number of distinct sources actually traversed
    pub samples: usize,
}

/// Estimate the diameter of the largest component from sampled eccentricities
///
/// Draws `min(samples, |LCC|)` distinct sources with a seeded RNG and runs one full
/// BFS per source. The maximum eccentricity seen never exceeds the true diameter.
#[must_use]
pub fn estimate_diameter(graph: &SocialGraph, samples: usize, seed: u64) -> DiameterEstimate {
    let lcc = largest_component(graph);
    let amount = samples.min(lcc.len());
    let mut rng = StdRng::seed_from_u64(seed);

    debug!(lcc_nodes = lcc.len(), samples = amount, seed, "estimating diameter");

    let diameter = rand::seq::index::sample(&mut rng, lcc.len(), amount)
        .into_iter()
        .map(|i| eccentricity(graph, lcc[i]))
        .max()
        .unwrap_or(0);

    DiameterEstimate {
        diameter,
        lcc_nodes: lcc.len(),
        samples: amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::NodeId;

    fn graph(edges: &[(u64, u64)]) -> SocialGraph {
        SocialGraph::from_edges(edges.iter().map(|&(u, v)| (NodeId(u), NodeId(v))))
    }

    #[test]
    fn test_bfs_disconnected() {
        let graph = graph(&[(0, 1), (2, 3)]);
        let reachable = bfs(&graph, 0);
        assert_eq!(reachable, vec![0, 1]);
    }

    #[test]
    fn test_within_radius_depth_limit() {
        // 0 - 1 - 2 - 3
        let graph = graph(&[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(within_radius(&graph, 0, 0), vec![0]);
        assert_eq!(within_radius(&graph, 0, 1), vec![0, 1]);
        assert_eq!(within_radius(&graph, 0, 2), vec![0, 1, 2]);
        assert_eq!(within_radius(&graph, 1, 10).len(), 4);
    }

    #[test]
    fn test_shortest_path_chain() {
        let graph = graph(&[(1, 2), (2, 3), (3, 4)]);
        assert_eq!(shortest_path(&graph, 0, 3), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_shortest_path_self() {
        let graph = graph(&[(1, 2)]);
        assert_eq!(shortest_path(&graph, 1, 1), Some(vec![1]));
    }

    #[test]
    fn test_shortest_path_prefers_shortcut() {
        // 1 - 2 - 3 - 4 plus shortcut 1 - 4
        let graph = graph(&[(1, 2), (2, 3), (3, 4), (1, 4)]);
        assert_eq!(shortest_path(&graph, 0, 3), Some(vec![0, 3]));
    }

    #[test]
    fn test_shortest_path_unreachable() {
        let graph = graph(&[(1, 2), (3, 4)]);
        assert_eq!(shortest_path(&graph, 0, 2), None);
    }

    #[test]
    fn test_distances_and_eccentricity() {
        let graph = graph(&[(1, 2), (2, 3), (3, 4), (8, 9)]);
        let dist = bfs_distances(&graph, 0);
        assert_eq!(&dist[..4], &[0, 1, 2, 3]);
        assert_eq!(dist[4], UNREACHED);
        assert_eq!(eccentricity(&graph, 0), 3);
        assert_eq!(eccentricity(&graph, 1), 2);
    }

    #[test]
    fn test_diameter_exact_when_all_sampled() {
        let graph = graph(&[(1, 2), (2, 3), (3, 4), (4, 5), (20, 21)]);
        let est = estimate_diameter(&graph, 100, 42);
        assert_eq!(est.lcc_nodes, 5);
        assert_eq!(est.samples, 5);
        assert_eq!(est.diameter, 4);
    }

    #[test]
    fn test_diameter_sampled_is_lower_bound() {
        let edges: Vec<(u64, u64)> = (0..50).map(|i| (i, i + 1)).collect();
        let graph = graph(&edges);
        let est = estimate_diameter(&graph, 3, 7);
        assert_eq!(est.samples, 3);
        assert!(est.diameter <= 50);
        assert!(est.diameter >= 25); // every node on a path has eccentricity >= half
    }

    #[test]
    fn test_diameter_empty_graph() {
        let est = estimate_diameter(&SocialGraph::new(), 10, 1);
        assert_eq!(
            est,
            DiameterEstimate {
                diameter: 0,
                lcc_nodes: 0,
                samples: 0
            }
        );
    }
}
