//! Assessment service: Orchestrates training and risk inference.
//!
//! This service coordinates:
//! - One-time dataset loading and model training
//! - Per-request probability inference
//! - Risk tiering and explanation ranking

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::domain::explain::{rank_factors, DEFAULT_TOP_K};
use crate::domain::{ClinicalRecord, RiskAssessment};
use crate::ports::{DatasetSource, ModelConfig, RiskModel};
use crate::CardioriskError;

/// Service for scoring clinical records against a lazily trained model.
///
/// # Training discipline
///
/// The model is held in a compute-once cell: the first caller that needs it
/// loads the dataset and trains, every later (or concurrent) caller observes
/// that same completed model. Training never repeats for the lifetime of the
/// service; retraining means constructing a new service.
///
/// After training, inference and importances are read-only and safe to call
/// concurrently without coordination.
pub struct AssessmentService<M, S>
where
    M: RiskModel,
    S: DatasetSource,
{
    source: Arc<S>,
    config: ModelConfig,
    model: OnceCell<M>,
}

impl<M, S> AssessmentService<M, S>
where
    M: RiskModel,
    S: DatasetSource,
{
    /// Create a new assessment service.
    pub fn new(source: Arc<S>, config: ModelConfig) -> Self {
        Self {
            source,
            config,
            model: OnceCell::new(),
        }
    }

    /// Whether the model has already been trained.
    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.model.get().is_some()
    }

    /// Train the model now instead of on first assessment.
    ///
    /// # Errors
    /// Returns error if the dataset cannot be loaded or training fails.
    pub fn warm_up(&self) -> Result<(), CardioriskError> {
        self.model().map(|_| ())
    }

    fn model(&self) -> Result<&M, CardioriskError> {
        self.model.get_or_try_init(|| {
            let dataset = self.source.load()?;
            tracing::info!(records = dataset.len(), "Dataset loaded, training model");
            let model = M::train(&dataset, &self.config)?;
            Ok(model)
        })
    }

    /// Assess one clinical record.
    ///
    /// Runs the full pipeline: probability inference, risk tiering, and
    /// explanation ranking (top 8 factors).
    ///
    /// # Errors
    /// Returns error if training or inference fails.
    pub fn assess(&self, record: &ClinicalRecord) -> Result<RiskAssessment, CardioriskError> {
        let model = self.model()?;

        let probability = model.predict_proba(&record.to_features())?;
        let factors = rank_factors(&model.feature_importances(), DEFAULT_TOP_K).collect();

        let assessment = RiskAssessment::new(probability, factors);
        tracing::info!(probability, tier = %assessment.tier, "Assessment complete");
        Ok(assessment)
    }

    /// Assess one clinical record, rejecting out-of-range inputs.
    ///
    /// `assess` accepts any numeric values and leaves range policy to the
    /// caller; this variant is that policy for callers who want it enforced.
    ///
    /// # Errors
    /// Returns `CardioriskError::Validation` listing every violated range,
    /// or any training/inference error from `assess`.
    pub fn assess_strict(&self, record: &ClinicalRecord) -> Result<RiskAssessment, CardioriskError> {
        record
            .validate()
            .map_err(|violations| CardioriskError::Validation(violations.join("; ")))?;
        self.assess(record)
    }

    /// Ranked feature importances of the trained model.
    ///
    /// # Errors
    /// Returns error if training fails.
    pub fn importances(&self, top_k: usize) -> Result<Vec<(String, f64)>, CardioriskError> {
        let model = self.model()?;
        Ok(rank_factors(&model.feature_importances(), top_k).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{RandomForest, StaticDatasetSource};
    use crate::domain::{LabeledDataset, RiskTier};
    use crate::ports::DataError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts how many times the dataset is actually loaded.
    struct CountingSource {
        inner: StaticDatasetSource,
        loads: AtomicUsize,
    }

    impl DatasetSource for CountingSource {
        fn load(&self) -> Result<LabeledDataset, DataError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.inner.load()
        }
    }

    fn fixture_dataset() -> LabeledDataset {
        let mut pairs = Vec::new();
        for i in 0..30u32 {
            let age = 35.0 + f64::from(i);
            let label = u8::from(age > 49.5);
            let record = ClinicalRecord {
                age,
                max_heart_rate: 185.0 - age,
                st_depression: if label == 1 { 2.8 } else { 0.4 },
                major_vessels: f64::from(label * 2),
                exercise_angina: f64::from(label),
                ..ClinicalRecord::default()
            };
            pairs.push((record, label));
        }
        LabeledDataset::from_pairs(pairs)
    }

    fn test_config() -> ModelConfig {
        ModelConfig {
            n_trees: 20,
            ..ModelConfig::default()
        }
    }

    fn create_test_service() -> AssessmentService<RandomForest, CountingSource> {
        let source = CountingSource {
            inner: StaticDatasetSource::new(fixture_dataset()),
            loads: AtomicUsize::new(0),
        };
        AssessmentService::new(Arc::new(source), test_config())
    }

    #[test]
    fn test_trains_exactly_once() {
        let service = create_test_service();
        assert!(!service.is_trained());

        let record = ClinicalRecord::default();
        service.assess(&record).expect("Should assess");
        assert!(service.is_trained());
        service.assess(&record).expect("Should assess again");
        service.importances(5).expect("Should rank");

        assert_eq!(service.source.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_assessment_pipeline() {
        let service = create_test_service();

        let elderly = ClinicalRecord {
            age: 63.0,
            max_heart_rate: 122.0,
            st_depression: 2.8,
            major_vessels: 2.0,
            exercise_angina: 1.0,
            ..ClinicalRecord::default()
        };
        let assessment = service.assess(&elderly).expect("Should assess");

        assert!((0.0..=1.0).contains(&assessment.probability));
        assert!((assessment.percentage - assessment.probability * 100.0).abs() < 1e-9);
        assert!(assessment.top_factors.len() <= DEFAULT_TOP_K);
        assert_eq!(assessment.message, assessment.tier.advisory());
    }

    #[test]
    fn test_archetypes_tier_apart() {
        let service = create_test_service();

        let young = ClinicalRecord {
            age: 36.0,
            max_heart_rate: 149.0,
            st_depression: 0.4,
            ..ClinicalRecord::default()
        };
        let elderly = ClinicalRecord {
            age: 63.0,
            max_heart_rate: 122.0,
            st_depression: 2.8,
            major_vessels: 2.0,
            exercise_angina: 1.0,
            ..ClinicalRecord::default()
        };

        let low = service.assess(&young).expect("Should assess");
        let high = service.assess(&elderly).expect("Should assess");
        assert!(high.probability > low.probability);
        assert_eq!(low.tier, RiskTier::Low);
    }

    #[test]
    fn test_strict_assessment_rejects_out_of_range() {
        let service = create_test_service();

        let impossible = ClinicalRecord {
            cholesterol: -40.0,
            max_heart_rate: 300.0,
            ..ClinicalRecord::default()
        };
        let err = service
            .assess_strict(&impossible)
            .expect_err("Should reject out-of-range inputs");
        assert!(
            matches!(&err, CardioriskError::Validation(msg)
                if msg.contains("Cholesterol") && msg.contains("Max heart rate"))
        );

        // The permissive path still accepts the same record.
        service.assess(&impossible).expect("Should assess");
        // And the strict path passes in-range records through.
        service
            .assess_strict(&ClinicalRecord::default())
            .expect("Should assess valid record");
    }

    #[test]
    fn test_empty_source_surfaces_training_error() {
        let source = StaticDatasetSource::new(LabeledDataset::from_pairs(Vec::new()));
        let service: AssessmentService<RandomForest, _> =
            AssessmentService::new(Arc::new(source), test_config());

        let err = service
            .assess(&ClinicalRecord::default())
            .expect_err("Should fail");
        assert!(matches!(err, CardioriskError::Model(_)));
        assert!(!service.is_trained());
    }

    #[test]
    fn test_warm_up_then_assess() {
        let service = create_test_service();
        service.warm_up().expect("Should train");
        assert!(service.is_trained());
        service
            .assess(&ClinicalRecord::default())
            .expect("Should assess");
        assert_eq!(service.source.loads.load(Ordering::SeqCst), 1);
    }
}
