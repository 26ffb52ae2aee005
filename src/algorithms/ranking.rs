//! Deterministic top-k selection
//!
//! Every ranking in the crate sorts by descending score and breaks ties by
//! ascending dense index (equivalently, ascending node id).

use std::cmp::Ordering;

/// Order two `(index, score)` entries: higher score first, then lower index
#[must_use]
pub fn by_score_desc(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Top `k` entries by descending score
///
/// # Example
///
/// ```
/// use sna_graph::algorithms::top_k;
///
/// let ranked = top_k(vec![(0, 0.5), (1, 0.9), (2, 0.5)], 2);
/// assert_eq!(ranked, vec![(1, 0.9), (0, 0.5)]);
/// ```
#[must_use]
pub fn top_k<I>(scores: I, k: usize) -> Vec<(usize, f64)>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    let mut entries: Vec<(usize, f64)> = scores.into_iter().collect();
    if k < entries.len() {
        entries.select_nth_unstable_by(k, by_score_desc);
        entries.truncate(k);
    }
    entries.sort_unstable_by(by_score_desc);
    entries
}
