//! Core decomposition by degeneracy ordering
//!
//! Repeatedly removes a minimum-degree remaining node and records its degree at
//! removal as its core number. The bucket queue makes the whole peel O(n + m).
//!
//! # References
//! - Seidman (1983): "Network structure and minimum degree"
//! - Batagelj & Zaversnik (2003): "An O(m) algorithm for cores decomposition of networks"

use crate::storage::SocialGraph;

/// Core number of every node, indexed by dense node index
#[must_use]
pub fn core_numbers(graph: &SocialGraph) -> Vec<usize> {
    let n = graph.num_nodes();
    if n == 0 {
        return Vec::new();
    }

    let mut degree: Vec<usize> = (0..n).map(|v| graph.degree(v)).collect();
    let max_degree = degree.iter().copied().max().unwrap_or(0);

    // bin[d] = first position in `order` holding a node of current degree d
    let mut bin = vec![0_usize; max_degree + 1];
    for &d in &degree {
        bin[d] += 1;
    }
    let mut start = 0;
    for slot in &mut bin {
        let count = *slot;
        *slot = start;
        start += count;
    }

    let mut position = vec![0_usize; n];
    let mut order = vec![0_usize; n];
    for v in 0..n {
        position[v] = bin[degree[v]];
        order[position[v]] = v;
        bin[degree[v]] += 1;
    }
    for d in (1..=max_degree).rev() {
        bin[d] = bin[d - 1];
    }
    bin[0] = 0;

    // Peel in ascending current-degree order
    for i in 0..n {
        let v = order[i];
        for &u in graph.neighbors(v) {
            let u = u as usize;
            if degree[u] > degree[v] {
                let du = degree[u];
                let pu = position[u];
                let pw = bin[du];
                let w = order[pw];
                if u != w {
                    order.swap(pu, pw);
                    position[u] = pw;
                    position[w] = pu;
                }
                bin[du] += 1;
                degree[u] -= 1;
            }
        }
    }

    degree
}

/// Size of a k-core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KCore {
    /// Requested k
    pub k: usize,
    /// Nodes with core number ≥ k
    pub nodes: usize,
    /// Edges with both endpoints in the k-core
    pub edges: usize,
    /// Largest core number in the graph
    pub max_core: usize,
}

/// Induced k-core of the graph
///
/// Empty when `k` exceeds the maximum core number.
#[must_use]
pub fn k_core(graph: &SocialGraph, k: usize) -> KCore {
    let cores = core_numbers(graph);
    let max_core = cores.iter().copied().max().unwrap_or(0);
    let nodes = cores.iter().filter(|&&c| c >= k).count();
    let edges = graph
        .edges()
        .filter(|&(u, v)| cores[u] >= k && cores[v] >= k)
        .count();

    KCore {
        k,
        nodes,
        edges,
        max_core,
    }
}
