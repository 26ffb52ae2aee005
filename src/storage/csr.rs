//! Undirected CSR (Compressed Sparse Row) social graph
//!
//! Based on `GraphBLAST` (Yang et al., ACM `ToMS` 2022) sparse layouts, specialised for
//! simple undirected graphs: every edge `{u, v}` is stored twice (once per endpoint row)
//! so neighbor access is a single slice lookup.
//!
//! # CSR Format
//!
//! ```text
//! Edge list: 10 20, 10 30, 20 30, 30 40
//!
//! node_ids:    [10, 20, 30, 40]        // dense index -> external id (ascending)
//! row_offsets: [0, 2, 4, 7, 8]
//! col_indices: [1, 2, 0, 2, 0, 1, 3, 2] // rows sorted ascending
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// External node identifier, as written in the edge-list source
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(NodeId)
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Immutable undirected social graph in CSR form
///
/// Nodes are addressed internally by a dense index `0..num_nodes()`, assigned in
/// ascending [`NodeId`] order, so "ascending index" and "ascending id" are the same
/// ordering everywhere in the crate.
///
/// Invariants (established by [`GraphBuilder::build`]):
/// - no self-loops, no multi-edges
/// - each row of `col_indices` is sorted ascending
/// - `col_indices.len() == 2 * num_edges`
///
/// # Example
///
/// ```
/// use sna_graph::{NodeId, SocialGraph};
///
/// let graph = SocialGraph::from_edges([(NodeId(1), NodeId(2)), (NodeId(2), NodeId(3))]);
/// assert_eq!(graph.num_nodes(), 3);
/// assert_eq!(graph.num_edges(), 2);
///
/// let middle = graph.index_of(NodeId(2)).unwrap();
/// assert_eq!(graph.degree(middle), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SocialGraph {
    /// Row offsets: node i's neighbors live in `col_indices[row_offsets[i]..row_offsets[i + 1]]`
    row_offsets: Vec<u32>,

    /// Neighbor indices (both directions of every edge)
    col_indices: Vec<u32>,

    /// Dense index -> external id (ascending)
    node_ids: Vec<NodeId>,

    /// External id -> dense index
    index: HashMap<NodeId, u32>,

    /// Number of undirected edges
    num_edges: usize,
}

impl SocialGraph {
    /// Create new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            row_offsets: vec![0],
            col_indices: Vec::new(),
            node_ids: Vec::new(),
            index: HashMap::new(),
            num_edges: 0,
        }
    }

    /// Build a graph from undirected `(u, v)` pairs
    ///
    /// Duplicate pairs (in either orientation) collapse to one edge; self-loops
    /// register their node but add no edge.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut builder = GraphBuilder::new();
        for (u, v) in edges {
            builder.add_edge(u, v);
        }
        builder.build()
    }

    /// Get number of nodes
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.node_ids.len()
    }

    /// Get number of undirected edges
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Whether the graph has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// Dense index of an external node id
    #[must_use]
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.index.get(&node).map(|&idx| idx as usize)
    }

    /// Check whether a node is present
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.index.contains_key(&node)
    }

    /// External id of a dense index
    ///
    /// # Panics
    ///
    /// Panics if `idx >= num_nodes()` (indices only come from this graph).
    #[must_use]
    pub fn node_id(&self, idx: usize) -> NodeId {
        self.node_ids[idx]
    }

    /// All external ids in ascending order
    #[must_use]
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    /// Neighbors of a dense index, ascending
    #[must_use]
    pub fn neighbors(&self, idx: usize) -> &[u32] {
        let start = self.row_offsets[idx] as usize;
        let end = self.row_offsets[idx + 1] as usize;
        &self.col_indices[start..end]
    }

    /// Degree of a dense index
    #[must_use]
    pub fn degree(&self, idx: usize) -> usize {
        (self.row_offsets[idx + 1] - self.row_offsets[idx]) as usize
    }

    /// Whether `{u, v}` is an edge (binary search over the sorted row)
    #[must_use]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        let (row, target) = if self.degree(u) <= self.degree(v) {
            (u, v)
        } else {
            (v, u)
        };
        #[allow(clippy::cast_possible_truncation)] // indices are built from u32
        let target = target as u32;
        self.neighbors(row).binary_search(&target).is_ok()
    }

    /// Iterate every undirected edge exactly once as `(u, v)` with `u < v`
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.num_nodes()).flat_map(move |u| {
            self.neighbors(u)
                .iter()
                .map(|&v| v as usize)
                .filter(move |&v| u < v)
                .map(move |v| (u, v))
        })
    }

    /// Get CSR components (row offsets, column indices)
    #[must_use]
    pub fn csr_components(&self) -> (&[u32], &[u32]) {
        (&self.row_offsets, &self.col_indices)
    }
}

impl Default for SocialGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates nodes and edges before freezing them into a [`SocialGraph`]
///
/// Ordered sets keep construction deterministic regardless of record order.
#[derive(Debug, Default, Clone)]
pub struct GraphBuilder {
    nodes: BTreeSet<NodeId>,
    edges: BTreeSet<(NodeId, NodeId)>,
}

impl GraphBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node without edges
    pub fn add_node(&mut self, node: NodeId) {
        self.nodes.insert(node);
    }

    /// Register an undirected edge
    ///
    /// Returns `true` if the edge was new. Self-loops only register the node.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        self.nodes.insert(u);
        self.nodes.insert(v);
        if u == v {
            return false;
        }
        let pair = if u < v { (u, v) } else { (v, u) };
        self.edges.insert(pair)
    }

    /// Number of distinct edges registered so far
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Freeze into CSR form
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Graphs >4B nodes not supported
    pub fn build(self) -> SocialGraph {
        let node_ids: Vec<NodeId> = self.nodes.into_iter().collect();
        let index: HashMap<NodeId, u32> = node_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i as u32))
            .collect();

        let n = node_ids.len();
        let pairs: Vec<(u32, u32)> = self
            .edges
            .iter()
            .filter_map(|(u, v)| Some((*index.get(u)?, *index.get(v)?)))
            .collect();

        let mut degrees = vec![0_u32; n];
        for &(u, v) in &pairs {
            degrees[u as usize] += 1;
            degrees[v as usize] += 1;
        }

        let mut row_offsets = Vec::with_capacity(n + 1);
        let mut offset = 0_u32;
        row_offsets.push(offset);
        for &d in &degrees {
            offset += d;
            row_offsets.push(offset);
        }

        let mut cursor: Vec<u32> = row_offsets[..n].to_vec();
        let mut col_indices = vec![0_u32; offset as usize];
        for &(u, v) in &pairs {
            col_indices[cursor[u as usize] as usize] = v;
            cursor[u as usize] += 1;
            col_indices[cursor[v as usize] as usize] = u;
            cursor[v as usize] += 1;
        }

        for node in 0..n {
            let start = row_offsets[node] as usize;
            let end = row_offsets[node + 1] as usize;
            col_indices[start..end].sort_unstable();
        }

        SocialGraph {
            row_offsets,
            col_indices,
            node_ids,
            index,
            num_edges: pairs.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(graph: &SocialGraph, idxs: &[u32]) -> Vec<u64> {
        idxs.iter().map(|&i| graph.node_id(i as usize).0).collect()
    }

    #[test]
    fn test_empty_graph() {
        let graph = SocialGraph::new();
        assert_eq!(graph.num_nodes(), 0);
        assert_eq!(graph.num_edges(), 0);
        assert!(graph.is_empty());
        assert_eq!(graph.csr_components().0, &[0]);
    }

    #[test]
    fn test_csr_structure() {
        let graph = SocialGraph::from_edges([
            (NodeId(10), NodeId(20)),
            (NodeId(10), NodeId(30)),
            (NodeId(20), NodeId(30)),
            (NodeId(30), NodeId(40)),
        ]);

        let (row_offsets, col_indices) = graph.csr_components();
        assert_eq!(row_offsets, &[0, 2, 4, 7, 8]);
        assert_eq!(col_indices, &[1, 2, 0, 2, 0, 1, 3, 2]);
        assert_eq!(graph.num_edges(), 4);
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let graph = SocialGraph::from_edges([
            (NodeId(1), NodeId(2)),
            (NodeId(2), NodeId(1)),
            (NodeId(1), NodeId(2)),
        ]);
        assert_eq!(graph.num_nodes(), 2);
        assert_eq!(graph.num_edges(), 1);
    }

    #[test]
    fn test_self_loop_registers_node_only() {
        let graph = SocialGraph::from_edges([(NodeId(5), NodeId(5)), (NodeId(1), NodeId(2))]);
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 1);

        let five = graph.index_of(NodeId(5)).unwrap();
        assert_eq!(graph.degree(five), 0);
    }

    #[test]
    fn test_neighbors_sorted_by_id() {
        let graph = SocialGraph::from_edges([
            (NodeId(7), NodeId(3)),
            (NodeId(7), NodeId(100)),
            (NodeId(7), NodeId(1)),
        ]);
        let seven = graph.index_of(NodeId(7)).unwrap();
        assert_eq!(ids(&graph, graph.neighbors(seven)), vec![1, 3, 100]);
    }

    #[test]
    fn test_has_edge_symmetric() {
        let graph = SocialGraph::from_edges([(NodeId(1), NodeId(2)), (NodeId(2), NodeId(3))]);
        let (a, b, c) = (
            graph.index_of(NodeId(1)).unwrap(),
            graph.index_of(NodeId(2)).unwrap(),
            graph.index_of(NodeId(3)).unwrap(),
        );
        assert!(graph.has_edge(a, b));
        assert!(graph.has_edge(b, a));
        assert!(!graph.has_edge(a, c));
    }

    #[test]
    fn test_edges_iterated_once() {
        let graph = SocialGraph::from_edges([
            (NodeId(1), NodeId(2)),
            (NodeId(2), NodeId(3)),
            (NodeId(3), NodeId(1)),
        ]);
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_node_id_parse() {
        assert_eq!(" 42 ".parse::<NodeId>(), Ok(NodeId(42)));
        assert!("abc".parse::<NodeId>().is_err());
        assert!("-3".parse::<NodeId>().is_err());
    }
}
