//! CART decision tree with Gini impurity splitting.
//!
//! Trees are grown greedily: at every node a random subset of features is
//! examined, candidate thresholds are the midpoints between consecutive
//! distinct values, and the split with the largest impurity decrease wins.
//! Leaves store the positive-class fraction of their training samples, so
//! the ensemble can average vote fractions into a probability.

use rand::seq::index::sample;
use rand_chacha::ChaCha20Rng;

/// Node growth limits and the per-split feature subset size.
#[derive(Debug, Clone)]
pub(crate) struct GrowParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub feature_subset: usize,
}

#[derive(Debug)]
enum Node {
    Leaf {
        positive_fraction: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A single fitted decision tree.
#[derive(Debug)]
pub(crate) struct DecisionTree {
    root: Node,
}

impl DecisionTree {
    /// Fit a tree on the rows selected by `indices` (bootstrap sample or the
    /// full dataset). Accumulates each split's weighted impurity decrease
    /// into `importances`, indexed by feature.
    pub fn fit(
        x: &[Vec<f64>],
        y: &[u8],
        indices: Vec<usize>,
        params: &GrowParams,
        rng: &mut ChaCha20Rng,
        importances: &mut [f64],
    ) -> Self {
        let n_root = indices.len();
        let root = grow(x, y, indices, 0, n_root, params, rng, importances);
        Self { root }
    }

    /// Positive-class fraction of the leaf this feature vector lands in.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { positive_fraction } => return *positive_fraction,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

fn gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    let q = 1.0 - p;
    1.0 - p * p - q * q
}

fn positive_count(y: &[u8], indices: &[usize]) -> usize {
    indices.iter().filter(|&&i| y[i] != 0).count()
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    decrease: f64,
}

/// Scan the feature subset for the split with the largest Gini decrease.
/// Returns `None` when no split improves on the parent impurity.
fn best_split(
    x: &[Vec<f64>],
    y: &[u8],
    indices: &[usize],
    features: &[usize],
    parent_impurity: f64,
) -> Option<BestSplit> {
    let n = indices.len();
    let total_pos = positive_count(y, indices);
    let mut best: Option<BestSplit> = None;

    for &feature in features {
        // Sort sample (value, label) pairs by value; the sort is stable so
        // the scan order, and with it tie resolution, is deterministic.
        let mut column: Vec<(f64, u8)> = indices.iter().map(|&i| (x[i][feature], y[i])).collect();
        column.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut left_pos = 0usize;
        for split_at in 1..n {
            if column[split_at - 1].1 != 0 {
                left_pos += 1;
            }
            // Only between distinct values is a threshold meaningful.
            if column[split_at].0 <= column[split_at - 1].0 {
                continue;
            }

            let left_n = split_at;
            let right_n = n - split_at;
            let right_pos = total_pos - left_pos;

            let weighted_children = (left_n as f64 / n as f64) * gini(left_pos, left_n)
                + (right_n as f64 / n as f64) * gini(right_pos, right_n);
            let decrease = parent_impurity - weighted_children;

            if decrease > best.as_ref().map_or(0.0, |b| b.decrease) {
                best = Some(BestSplit {
                    feature,
                    threshold: (column[split_at - 1].0 + column[split_at].0) / 2.0,
                    decrease,
                });
            }
        }
    }

    best
}

#[allow(clippy::too_many_arguments)]
fn grow(
    x: &[Vec<f64>],
    y: &[u8],
    indices: Vec<usize>,
    depth: usize,
    n_root: usize,
    params: &GrowParams,
    rng: &mut ChaCha20Rng,
    importances: &mut [f64],
) -> Node {
    let n = indices.len();
    let positives = positive_count(y, &indices);
    let impurity = gini(positives, n);
    let positive_fraction = positives as f64 / n.max(1) as f64;

    let depth_exhausted = params.max_depth.is_some_and(|limit| depth >= limit);
    if impurity == 0.0 || n < params.min_samples_split || depth_exhausted {
        return Node::Leaf { positive_fraction };
    }

    let n_features = x[indices[0]].len();
    let subset = params.feature_subset.min(n_features);
    let mut features = sample(rng, n_features, subset).into_vec();
    features.sort_unstable();

    let Some(split) = best_split(x, y, &indices, &features, impurity) else {
        return Node::Leaf { positive_fraction };
    };

    importances[split.feature] += (n as f64 / n_root as f64) * split.decrease;

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| x[i][split.feature] <= split.threshold);

    let left = grow(x, y, left_idx, depth + 1, n_root, params, rng, importances);
    let right = grow(x, y, right_idx, depth + 1, n_root, params, rng, importances);

    Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left: Box::new(left),
        right: Box::new(right),
    }
}
