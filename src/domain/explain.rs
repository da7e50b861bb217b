//! Explanation ranking: order features by model importance for display.

use std::cmp::Ordering;

/// Default number of factors shown in an explanation.
pub const DEFAULT_TOP_K: usize = 8;

/// Rank feature importances descending by weight.
///
/// The sort is stable: features with equal weights keep their first-seen
/// order from the input mapping, which for model importances is the
/// canonical feature order. Yields at most `top_k` entries, lazily.
pub fn rank_factors(
    importances: &[(String, f64)],
    top_k: usize,
) -> impl Iterator<Item = (String, f64)> {
    let mut ranked = importances.to_vec();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.into_iter().take(top_k)
}
