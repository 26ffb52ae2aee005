//! Graph structure algorithms: connected components and the largest component
//!
//! Provides structural analysis over the undirected graph:
//! - `connected_components`: members of every component
//! - `component_sizes`: sizes, largest first
//! - `largest_component`: members of the LCC
//!
//! # Example
//!
//! ```
//! use sna_graph::{NodeId, SocialGraph};
//! use sna_graph::algorithms::{component_sizes, connected_components};
//!
//! // Two disjoint edges: 1 - 2, 3 - 4
//! let graph = SocialGraph::from_edges([(NodeId(1), NodeId(2)), (NodeId(3), NodeId(4))]);
//!
//! assert_eq!(connected_components(&graph).len(), 2);
//! assert_eq!(component_sizes(&graph), vec![2, 2]);
//! ```

use crate::storage::SocialGraph;
use std::collections::VecDeque;

/// Enumerate connected components
///
/// Components are returned in discovery order (by their smallest node index);
/// members of each component are sorted ascending.
///
/// Iterative BFS, O(n + m); deep social graphs never touch the call stack.
#[must_use]
pub fn connected_components(graph: &SocialGraph) -> Vec<Vec<usize>> {
    let n = graph.num_nodes();
    let mut visited = vec![false; n];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }

        let mut members = Vec::new();
        visited[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            members.push(current);
            for &neighbor in graph.neighbors(current) {
                let neighbor = neighbor as usize;
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }

        members.sort_unstable();
        components.push(members);
    }

    components
}

/// Component sizes, largest first
#[must_use]
pub fn component_sizes(graph: &SocialGraph) -> Vec<usize> {
    let mut sizes: Vec<usize> = connected_components(graph).iter().map(Vec::len).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes
}

/// Members of the largest connected component (ascending)
///
/// Among equally large components the one discovered first wins. Empty for an
/// empty graph.
#[must_use]
pub fn largest_component(graph: &SocialGraph) -> Vec<usize> {
    connected_components(graph)
        .into_iter()
        .fold(Vec::new(), |best, component| {
            if component.len() > best.len() {
                component
            } else {
                best
            }
        })
}

/// Count connected components
#[must_use]
pub fn count_components(graph: &SocialGraph) -> usize {
    connected_components(graph).len()
}
