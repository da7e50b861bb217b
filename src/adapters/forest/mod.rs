//! Random forest adapter: Implementation of the `RiskModel` port.
//!
//! Bagging of randomized CART trees, matching the behavior of the reference
//! classifier the risk thresholds were calibrated against:
//!
//! - each tree trains on a bootstrap resample of the dataset (configurable),
//! - each split considers a random subset of ⌈√n_features⌉ features,
//! - the ensemble probability is the mean positive-class leaf fraction,
//! - importances are mean decrease in impurity, per-tree normalized, then
//!   averaged and renormalized to sum to 1.
//!
//! Training is fully deterministic for a fixed dataset and seed: all
//! randomness flows from one `ChaCha20Rng`, and split scanning uses stable
//! sorts with first-best tie resolution.

mod tree;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::domain::{ClinicalRecord, LabeledDataset, ModelError, FEATURE_NAMES};
use crate::ports::{ModelConfig, RiskModel};

use tree::{DecisionTree, GrowParams};

/// A trained random forest classifier.
///
/// Immutable after `train`; inference walks the fitted trees without locks
/// and may run concurrently from any number of callers.
#[derive(Debug)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    feature_names: Vec<String>,
    importances: Vec<f64>,
}

impl RandomForest {
    /// Probability of disease for a full clinical record.
    ///
    /// # Errors
    /// Propagates `ModelError::FeatureCountMismatch`, though a
    /// `ClinicalRecord` always emits the canonical 13 features.
    pub fn predict_record(&self, record: &ClinicalRecord) -> Result<f64, ModelError> {
        self.predict_proba(&record.to_features())
    }

    /// Number of fitted trees.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl RiskModel for RandomForest {
    fn train(dataset: &LabeledDataset, config: &ModelConfig) -> Result<Self, ModelError> {
        let classes = dataset.distinct_classes();
        if classes < 2 {
            return Err(ModelError::InsufficientData { classes });
        }

        let x = dataset.feature_matrix();
        let y = dataset.labels();
        let n = x.len();
        let n_features = FEATURE_NAMES.len();

        let params = GrowParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            feature_subset: (n_features as f64).sqrt().ceil() as usize,
        };

        let n_trees = config.n_trees.max(1);
        tracing::info!(
            n_records = n,
            n_trees,
            seed = config.seed,
            "Training random forest"
        );

        let mut master = ChaCha20Rng::seed_from_u64(config.seed);
        let mut importance_acc = vec![0.0; n_features];
        let mut trees = Vec::with_capacity(n_trees);

        for _ in 0..n_trees {
            let mut tree_rng = ChaCha20Rng::seed_from_u64(master.gen());
            let indices: Vec<usize> = if config.bootstrap {
                (0..n).map(|_| tree_rng.gen_range(0..n)).collect()
            } else {
                (0..n).collect()
            };

            let mut tree_importance = vec![0.0; n_features];
            let tree = DecisionTree::fit(&x, y, indices, &params, &mut tree_rng, &mut tree_importance);

            // Per-tree normalization before averaging, so every tree carries
            // equal weight in the aggregate regardless of its depth.
            let total: f64 = tree_importance.iter().sum();
            if total > 0.0 {
                for (acc, contrib) in importance_acc.iter_mut().zip(&tree_importance) {
                    *acc += contrib / total;
                }
            }

            trees.push(tree);
        }

        let total: f64 = importance_acc.iter().sum();
        if total > 0.0 {
            for value in &mut importance_acc {
                *value /= total;
            }
        }

        tracing::info!("Random forest trained: {} trees", trees.len());

        Ok(Self {
            trees,
            feature_names: FEATURE_NAMES.iter().map(ToString::to_string).collect(),
            importances: importance_acc,
        })
    }

    fn predict_proba(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.feature_names.len() {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.feature_names.len(),
                got: features.len(),
            });
        }

        let vote_sum: f64 = self.trees.iter().map(|tree| tree.predict(features)).sum();
        Ok(vote_sum / self.trees.len() as f64)
    }

    fn feature_importances(&self) -> Vec<(String, f64)> {
        self.feature_names
            .iter()
            .cloned()
            .zip(self.importances.iter().copied())
            .collect()
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 40 synthetic patients whose disease label tracks age and the
    /// exercise-related attributes, with deterministic variation elsewhere.
    fn toy_dataset() -> LabeledDataset {
        let mut pairs = Vec::new();
        for i in 0..40u32 {
            let age = 30.0 + f64::from(i);
            let label = u8::from(age > 49.5);
            let record = ClinicalRecord {
                age,
                sex: f64::from(i % 2),
                chest_pain: f64::from(i % 4),
                resting_bp: 120.0 + f64::from(i % 5) * 4.0,
                cholesterol: 200.0 + f64::from(i % 7) * 10.0,
                fasting_blood_sugar: f64::from(i % 3 == 0),
                rest_ecg: f64::from(i % 3),
                max_heart_rate: 190.0 - age,
                exercise_angina: f64::from(label),
                st_depression: if label == 1 { 2.5 } else { 0.5 } + f64::from(i % 4) * 0.1,
                st_slope: f64::from(i % 3),
                major_vessels: f64::from(label) * 2.0,
                thalassemia: 2.0 + f64::from(label),
            };
            pairs.push((record, label));
        }
        LabeledDataset::from_pairs(pairs)
    }

    fn small_config() -> ModelConfig {
        ModelConfig {
            n_trees: 25,
            ..ModelConfig::default()
        }
    }

    fn high_risk_record() -> ClinicalRecord {
        ClinicalRecord {
            age: 64.0,
            sex: 0.0,
            chest_pain: 2.0,
            resting_bp: 136.0,
            cholesterol: 240.0,
            fasting_blood_sugar: 1.0,
            rest_ecg: 1.0,
            max_heart_rate: 126.0,
            exercise_angina: 1.0,
            st_depression: 2.6,
            st_slope: 1.0,
            major_vessels: 2.0,
            thalassemia: 3.0,
        }
    }

    fn low_risk_record() -> ClinicalRecord {
        ClinicalRecord {
            age: 33.0,
            sex: 1.0,
            chest_pain: 1.0,
            resting_bp: 124.0,
            cholesterol: 210.0,
            fasting_blood_sugar: 0.0,
            rest_ecg: 0.0,
            max_heart_rate: 157.0,
            exercise_angina: 0.0,
            st_depression: 0.6,
            st_slope: 0.0,
            major_vessels: 0.0,
            thalassemia: 2.0,
        }
    }

    #[test]
    fn test_training_is_deterministic() {
        let dataset = toy_dataset();
        let first = RandomForest::train(&dataset, &small_config()).expect("Should train");
        let second = RandomForest::train(&dataset, &small_config()).expect("Should train");

        let record = high_risk_record().to_features();
        let p1 = first.predict_proba(&record).expect("Should predict");
        let p2 = second.predict_proba(&record).expect("Should predict");
        assert!(
            (p1 - p2).abs() < 1e-9,
            "Same dataset and seed must reproduce the probability: {p1} vs {p2}"
        );

        assert_eq!(first.feature_importances(), second.feature_importances());
    }

    #[test]
    fn test_probability_stays_in_unit_interval() {
        let dataset = toy_dataset();
        let model = RandomForest::train(&dataset, &small_config()).expect("Should train");

        for record in dataset.records() {
            let p = model.predict_record(record).expect("Should predict");
            assert!((0.0..=1.0).contains(&p), "probability {p} out of range");
        }
    }

    #[test]
    fn test_importances_normalized() {
        let dataset = toy_dataset();
        let model = RandomForest::train(&dataset, &small_config()).expect("Should train");

        let importances = model.feature_importances();
        assert_eq!(importances.len(), 13);
        let sum: f64 = importances.iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-6, "importances sum to {sum}");
        assert!(importances.iter().all(|(_, w)| *w >= 0.0));

        // Canonical order is preserved in the mapping itself and matches the
        // ordering the model reports it was trained on.
        let names: Vec<&str> = importances.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, FEATURE_NAMES);
        let trained: Vec<&str> = model.feature_names().iter().map(String::as_str).collect();
        assert_eq!(trained, names);
    }

    #[test]
    fn test_single_class_dataset_rejected() {
        let pairs = (0..10)
            .map(|_| (ClinicalRecord::default(), 1))
            .collect::<Vec<_>>();
        let dataset = LabeledDataset::from_pairs(pairs);

        let err = RandomForest::train(&dataset, &small_config()).expect_err("Should reject");
        assert_eq!(err, ModelError::InsufficientData { classes: 1 });
    }

    #[test]
    fn test_feature_count_mismatch_leaves_model_intact() {
        let dataset = toy_dataset();
        let model = RandomForest::train(&dataset, &small_config()).expect("Should train");

        let record = high_risk_record().to_features();
        let before = model.predict_proba(&record).expect("Should predict");

        let truncated = &record[..12];
        let err = model.predict_proba(truncated).expect_err("Should reject 12 features");
        assert_eq!(
            err,
            ModelError::FeatureCountMismatch {
                expected: 13,
                got: 12
            }
        );

        // The failed request must not disturb the trained state.
        let after = model.predict_proba(&record).expect("Should predict");
        assert!((before - after).abs() < f64::EPSILON);
    }

    #[test]
    fn test_feature_order_is_respected() {
        let dataset = toy_dataset();
        let model = RandomForest::train(&dataset, &small_config()).expect("Should train");

        let changed = dataset.records().iter().any(|record| {
            let original = record.to_features();
            let mut swapped = original.clone();
            swapped.swap(0, 1); // age <-> sex
            let p_original = model.predict_proba(&original).expect("Should predict");
            let p_swapped = model.predict_proba(&swapped).expect("Should predict");
            (p_original - p_swapped).abs() > 1e-9
        });
        assert!(changed, "swapping age and sex changed no prediction");
    }

    #[test]
    fn test_minimal_forest_end_to_end() {
        // Two archetype records differing in every attribute, a single tree
        // trained on the full pair, no bootstrap resampling.
        let dataset =
            LabeledDataset::from_pairs(vec![(low_risk_record(), 0), (high_risk_record(), 1)]);
        let config = ModelConfig {
            n_trees: 1,
            seed: 42,
            bootstrap: false,
            ..ModelConfig::default()
        };
        let model = RandomForest::train(&dataset, &config).expect("Should train");

        let p = model
            .predict_record(&high_risk_record())
            .expect("Should predict");
        assert!(p > 0.5, "positive archetype scored {p}");

        let tier = crate::domain::RiskTier::from_probability(p);
        assert!(matches!(
            tier,
            crate::domain::RiskTier::Moderate | crate::domain::RiskTier::Critical
        ));
    }

    #[test]
    fn test_separable_classes_score_apart() {
        let dataset = toy_dataset();
        let model = RandomForest::train(&dataset, &small_config()).expect("Should train");

        let p_low = model
            .predict_record(&low_risk_record())
            .expect("Should predict");
        let p_high = model
            .predict_record(&high_risk_record())
            .expect("Should predict");
        assert!(
            p_high > p_low,
            "high-risk archetype ({p_high}) should outscore low-risk ({p_low})"
        );
    }
}
