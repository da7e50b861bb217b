//! Risk model port: Trait for trainable probability classifiers.

use crate::domain::{LabeledDataset, ModelError};

/// Training configuration for ensemble models.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Number of trees in the ensemble.
    pub n_trees: usize,

    /// Seed for the training RNG. Training is deterministic given the same
    /// dataset and seed.
    pub seed: u64,

    /// Maximum tree depth; `None` grows until leaves are pure.
    pub max_depth: Option<usize>,

    /// Minimum samples required to split a node.
    pub min_samples_split: usize,

    /// Train each tree on a bootstrap resample of the dataset.
    pub bootstrap: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
            bootstrap: true,
        }
    }
}

/// Trait for a supervised risk classifier.
///
/// Training is the only state-creating operation; a trained model is
/// immutable and its inference methods are pure, reentrant, and safe to call
/// concurrently.
pub trait RiskModel: Sized + Send + Sync {
    /// Fit the model on the full labeled dataset.
    ///
    /// # Errors
    /// Returns `ModelError::InsufficientData` if fewer than 2 label classes
    /// are represented.
    fn train(dataset: &LabeledDataset, config: &ModelConfig) -> Result<Self, ModelError>;

    /// Estimate the positive-class (disease present) probability for one
    /// canonically ordered feature vector.
    ///
    /// # Errors
    /// Returns `ModelError::FeatureCountMismatch` if the feature count does
    /// not match the trained ordering.
    fn predict_proba(&self, features: &[f64]) -> Result<f64, ModelError>;

    /// Aggregate per-feature importance in canonical feature order,
    /// normalized to sum to 1.
    fn feature_importances(&self) -> Vec<(String, f64)>;

    /// The feature ordering this model was trained on.
    fn feature_names(&self) -> &[String];
}
