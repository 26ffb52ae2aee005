//! Degree assortativity (Newman 2002, "Assortative mixing in networks")

use crate::storage::SocialGraph;

/// Pearson correlation of endpoint degrees over every edge, taken in both directions
///
/// Positive values mean high-degree nodes attach to each other; negative values
/// mean hubs attach to low-degree nodes.
///
/// # Returns
///
/// `None` when undefined: no edges, or zero degree variance across edge
/// endpoints (e.g. regular graphs).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_assortativity(graph: &SocialGraph) -> Option<f64> {
    let m = graph.num_edges();
    if m == 0 {
        return None;
    }

    // Both orientations: x and y share one marginal distribution
    let (mut sum_x, mut sum_xx, mut sum_xy) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (u, v) in graph.edges() {
        let du = graph.degree(u) as f64;
        let dv = graph.degree(v) as f64;
        sum_x += du + dv;
        sum_xx += du * du + dv * dv;
        sum_xy += 2.0 * du * dv;
    }

    let samples = (2 * m) as f64;
    let mean = sum_x / samples;
    let variance = sum_xx / samples - mean * mean;
    if variance.abs() < f64::EPSILON * sum_xx.max(1.0) {
        return None;
    }

    Some((sum_xy / samples - mean * mean) / variance)
}
