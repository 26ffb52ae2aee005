//! Articulation points and bridges (Tarjan's low-link DFS)
//!
//! A single depth-first sweep per component records discovery times and the lowest
//! discovery time reachable through back edges. For a tree edge `p → v`:
//! - `low[v] > disc[p]` makes `{p, v}` a bridge
//! - `low[v] >= disc[p]` makes `p` a cut vertex, unless `p` is the DFS root
//! - a root is a cut vertex iff it has more than one DFS child
//!
//! The DFS keeps an explicit stack so long paths cannot overflow the call stack.
//!
//! # References
//! - Tarjan (1972): "Depth-first search and linear graph algorithms"

use crate::storage::SocialGraph;

const UNVISITED: usize = usize::MAX;
const NO_PARENT: usize = usize::MAX;

/// Every cut vertex and bridge of a graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CutSets {
    /// Dense indices of articulation points, ascending
    pub articulation_points: Vec<usize>,
    /// Bridges as `(min, max)` dense index pairs, ascending
    pub bridges: Vec<(usize, usize)>,
}

/// One DFS stack frame: node, its tree parent, next row position to scan
struct Frame {
    node: usize,
    parent: usize,
    cursor: usize,
}

/// Find all articulation points and bridges across every component
///
/// # Example
///
/// ```
/// use sna_graph::{NodeId, SocialGraph};
/// use sna_graph::algorithms::find_cuts;
///
/// // 1 - 2 - 3 - 4
/// let graph = SocialGraph::from_edges([
///     (NodeId(1), NodeId(2)), (NodeId(2), NodeId(3)), (NodeId(3), NodeId(4)),
/// ]);
///
/// let cuts = find_cuts(&graph);
/// assert_eq!(cuts.articulation_points, vec![1, 2]);
/// assert_eq!(cuts.bridges, vec![(0, 1), (1, 2), (2, 3)]);
/// ```
#[must_use]
pub fn find_cuts(graph: &SocialGraph) -> CutSets {
    let n = graph.num_nodes();
    let mut disc = vec![UNVISITED; n];
    let mut low = vec![0_usize; n];
    let mut is_cut = vec![false; n];
    let mut bridges = Vec::new();
    let mut timer = 0_usize;
    let mut stack: Vec<Frame> = Vec::new();

    for root in 0..n {
        if disc[root] != UNVISITED {
            continue;
        }

        disc[root] = timer;
        low[root] = timer;
        timer += 1;
        let mut root_children = 0_usize;
        stack.push(Frame {
            node: root,
            parent: NO_PARENT,
            cursor: 0,
        });

        while let Some(top) = stack.last_mut() {
            let (v, parent) = (top.node, top.parent);

            if let Some(&next) = graph.neighbors(v).get(top.cursor) {
                top.cursor += 1;
                let u = next as usize;
                if u == parent {
                    continue;
                }
                if disc[u] == UNVISITED {
                    disc[u] = timer;
                    low[u] = timer;
                    timer += 1;
                    if v == root {
                        root_children += 1;
                    }
                    stack.push(Frame {
                        node: u,
                        parent: v,
                        cursor: 0,
                    });
                } else {
                    // Back edge
                    low[v] = low[v].min(disc[u]);
                }
                continue;
            }

            stack.pop();
            if parent == NO_PARENT {
                continue;
            }
            low[parent] = low[parent].min(low[v]);
            if low[v] > disc[parent] {
                bridges.push((parent.min(v), parent.max(v)));
            }
            if parent != root && low[v] >= disc[parent] {
                is_cut[parent] = true;
            }
        }

        if root_children > 1 {
            is_cut[root] = true;
        }
    }

    bridges.sort_unstable();

    CutSets {
        articulation_points: (0..n).filter(|&v| is_cut[v]).collect(),
        bridges,
    }
}
