//! Friend recommendations by Adamic–Adar link prediction
//!
//! Candidates are nodes exactly two hops from the source. Each shared neighbor `w`
//! contributes `1 / ln(deg(w))`, so rare mutual friends weigh more than hubs.
//!
//! # References
//! - Adamic & Adar (2003): "Friends and neighbors on the Web"

use super::ranking::by_score_desc;
use crate::storage::SocialGraph;
use std::collections::HashMap;

/// One scored candidate
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Dense index of the suggested node
    pub candidate: usize,
    /// Adamic–Adar score (> 0)
    pub score: f64,
    /// Shared neighbors with the source, ascending
    pub common_neighbors: Vec<usize>,
}

/// Ranked recommendations for one source node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations {
    /// Top candidates: score descending, ties by ascending index
    pub ranked: Vec<Recommendation>,
    /// Number of distinct candidates that scored above zero
    pub total_candidates: usize,
}

/// Score every non-neighbor two hops away from `source` and keep the best `k`
///
/// Never suggests the source itself or an existing neighbor.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn adamic_adar(graph: &SocialGraph, source: usize, k: usize) -> Recommendations {
    let direct = graph.neighbors(source);
    let mut scores: HashMap<usize, (f64, Vec<usize>)> = HashMap::new();

    for &mutual in direct {
        let mutual = mutual as usize;
        let degree = graph.degree(mutual);
        // Degree-1 neighbors only link back to the source
        if degree < 2 {
            continue;
        }
        let weight = 1.0 / (degree as f64).ln();

        for &candidate in graph.neighbors(mutual) {
            let candidate = candidate as usize;
            if candidate == source || graph.has_edge(source, candidate) {
                continue;
            }
            let entry = scores.entry(candidate).or_insert((0.0, Vec::new()));
            entry.0 += weight;
            entry.1.push(mutual);
        }
    }

    scores.retain(|_, (score, _)| *score > 0.0);
    let total_candidates = scores.len();

    let mut ranked: Vec<Recommendation> = scores
        .into_iter()
        .map(|(candidate, (score, common_neighbors))| Recommendation {
            candidate,
            score,
            common_neighbors,
        })
        .collect();
    ranked.sort_unstable_by(|a, b| by_score_desc(&(a.candidate, a.score), &(b.candidate, b.score)));
    ranked.truncate(k);

    Recommendations {
        ranked,
        total_candidates,
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
    fn test_path_recommends_two_hop_node() {
        // 1 - 2 - 3 - 4, recommend for 1
        let graph = graph(&[(1, 2), (2, 3), (3, 4)]);
        let recs = adamic_adar(&graph, 0, 5);

        assert_eq!(recs.total_candidates, 1);
        assert_eq!(recs.ranked.len(), 1);
        let top = &recs.ranked[0];
        assert_eq!(top.candidate, 2);
        assert!((top.score - 1.0 / 2.0_f64.ln()).abs() < 1e-12);
        assert_eq!(top.common_neighbors, vec![1]);
    }

    #[test]
    fn test_rare_mutual_friend_weighs_more() {
        // 0 shares hub 1 (degree 4) with 2, and low-degree 5 (degree 2) with 6
        let graph = graph(&[(0, 1), (1, 2), (1, 3), (1, 4), (0, 5), (5, 6)]);
        let recs = adamic_adar(&graph, 0, 10);

        assert_eq!(recs.ranked[0].candidate, 6);
        assert_eq!(recs.total_candidates, 4);
        // Candidates 2, 3, 4 tie and come out in ascending order
        let tail: Vec<usize> = recs.ranked[1..].iter().map(|r| r.candidate).collect();
        assert_eq!(tail, vec![2, 3, 4]);
    }

    #[test]
    fn test_excludes_self_and_existing_friends() {
        // Triangle 0-1-2 plus 2-3
        let graph = graph(&[(0, 1), (1, 2), (2, 0), (2, 3)]);
        let recs = adamic_adar(&graph, 0, 10);

        let candidates: Vec<usize> = recs.ranked.iter().map(|r| r.candidate).collect();
        assert_eq!(candidates, vec![3]);
    }

    #[test]
    fn test_common_neighbors_accumulate() {
        // 0 and 3 share 1 and 2
        let graph = graph(&[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let recs = adamic_adar(&graph, 0, 1);

        assert_eq!(recs.ranked[0].candidate, 3);
        assert_eq!(recs.ranked[0].common_neighbors, vec![1, 2]);
        assert!((recs.ranked[0].score - 2.0 / 2.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_truncates_but_counts_all() {
        let graph = graph(&[(0, 1), (1, 2), (1, 3), (1, 4), (1, 5)]);
        let recs = adamic_adar(&graph, 0, 2);
        assert_eq!(recs.ranked.len(), 2);
        assert_eq!(recs.total_candidates, 4);
    }

    #[test]
    fn test_isolated_source() {
        let graph = graph(&[(0, 0), (1, 2)]);
        assert_eq!(adamic_adar(&graph, 0, 5), Recommendations::default());
    }
}
