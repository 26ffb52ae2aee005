//! Memoized cut analysis (articulation points and bridges)
//!
//! Results are keyed to a [`GraphSignature`]. Every lookup compares the stored
//! signature with the live graph before reuse; a mismatch recomputes and overwrites.
//! The lock is held across the check and the computation, so concurrent callers
//! racing on an empty cache converge on a single computation.

use crate::algorithms::find_cuts;
use crate::storage::{NodeId, SocialGraph};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Identity of a graph as seen by the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphSignature {
    /// Node count
    pub nodes: usize,
    /// Edge count
    pub edges: usize,
}

impl GraphSignature {
    /// Signature of a live graph
    #[must_use]
    pub fn of(graph: &SocialGraph) -> Self {
        Self {
            nodes: graph.num_nodes(),
            edges: graph.num_edges(),
        }
    }
}

/// Cached cut sets in external node ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutAnalysis {
    /// Articulation points, ascending
    pub articulation_points: Vec<NodeId>,
    /// Bridges as `(lower, higher)`, ascending
    pub bridges: Vec<(NodeId, NodeId)>,
    /// Graph the sets were computed for
    pub signature: GraphSignature,
    /// Wall-clock time of the computation
    pub compute_duration: Duration,
}

impl CutAnalysis {
    /// Run Tarjan's sweep over `graph` and record how long it took
    #[must_use]
    pub fn compute(graph: &SocialGraph) -> Self {
        let started = Instant::now();
        let cuts = find_cuts(graph);

        // Dense order is id order, so both lists stay sorted
        let articulation_points = cuts
            .articulation_points
            .into_iter()
            .map(|v| graph.node_id(v))
            .collect();
        let bridges = cuts
            .bridges
            .into_iter()
            .map(|(u, v)| (graph.node_id(u), graph.node_id(v)))
            .collect();

        Self {
            articulation_points,
            bridges,
            signature: GraphSignature::of(graph),
            compute_duration: started.elapsed(),
        }
    }
}

/// Whether a lookup reused the stored analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Stored analysis matched the graph signature
    Hit,
    /// Analysis was (re)computed by this call
    Computed,
}

/// Signature-checked, single-flight cache for [`CutAnalysis`]
#[derive(Debug, Default)]
pub struct CutCache {
    slot: Mutex<Option<Arc<CutAnalysis>>>,
}

impl CutCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the analysis for `graph`, computing it if absent or stale
    pub fn get_or_compute(&self, graph: &SocialGraph) -> (Arc<CutAnalysis>, CacheStatus) {
        let signature = GraphSignature::of(graph);
        let mut slot = self.slot.lock();

        if let Some(cached) = slot.as_ref() {
            if cached.signature == signature {
                debug!(?signature, "cut cache hit");
                return (Arc::clone(cached), CacheStatus::Hit);
            }
            debug!(
                cached = ?cached.signature,
                live = ?signature,
                "cut cache stale"
            );
        }

        let analysis = Arc::new(CutAnalysis::compute(graph));
        info!(
            nodes = signature.nodes,
            edges = signature.edges,
            articulation_points = analysis.articulation_points.len(),
            bridges = analysis.bridges.len(),
            elapsed_ms = analysis.compute_duration.as_millis(),
            "computed cut analysis"
        );
        *slot = Some(Arc::clone(&analysis));
        (analysis, CacheStatus::Computed)
    }

    /// Stored analysis, if any, without checking freshness
    #[must_use]
    pub fn peek(&self) -> Option<Arc<CutAnalysis>> {
        self.slot.lock().clone()
    }

    /// Drop the stored analysis
    pub fn invalidate(&self) {
        *self.slot.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(u64, u64)]) -> SocialGraph {
        SocialGraph::from_edges(edges.iter().map(|&(u, v)| (NodeId(u), NodeId(v))))
    }

    #[test]
    fn test_first_call_computes_second_hits() {
        let g = graph(&[(1, 2), (2, 3), (3, 4)]);
        let cache = CutCache::new();

        let (first, status) = cache.get_or_compute(&g);
        assert_eq!(status, CacheStatus::Computed);
        assert_eq!(first.articulation_points, vec![NodeId(2), NodeId(3)]);

        let (second, status) = cache.get_or_compute(&g);
        assert_eq!(status, CacheStatus::Hit);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_signature_mismatch_recomputes() {
        let cache = CutCache::new();
        let small = graph(&[(1, 2)]);
        let large = graph(&[(1, 2), (2, 3)]);

        cache.get_or_compute(&small);
        let (analysis, status) = cache.get_or_compute(&large);
        assert_eq!(status, CacheStatus::Computed);
        assert_eq!(analysis.signature, GraphSignature { nodes: 3, edges: 2 });
        assert_eq!(analysis.articulation_points, vec![NodeId(2)]);
    }

    #[test]
    fn test_invalidate_clears() {
        let g = graph(&[(1, 2)]);
        let cache = CutCache::new();
        cache.get_or_compute(&g);
        assert!(cache.peek().is_some());

        cache.invalidate();
        assert!(cache.peek().is_none());
        assert_eq!(cache.get_or_compute(&g).1, CacheStatus::Computed);
    }

    #[test]
    fn test_concurrent_callers_compute_once() {
        let g = Arc::new(graph(&[(1, 2), (2, 3), (3, 1), (3, 4)]));
        let cache = Arc::new(CutCache::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let g = Arc::clone(&g);
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get_or_compute(&g).1)
            })
            .collect();

        let computed = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&s| s == CacheStatus::Computed)
            .count();
        assert_eq!(computed, 1);
    }
}
