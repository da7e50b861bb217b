//! Labeled training dataset.

use super::record::ClinicalRecord;

/// An immutable, ordered collection of labeled clinical records.
///
/// Labels are binary: 0 = no disease, 1 = disease present. Records are never
/// transformed after loading; normalization and imputation are out of scope.
#[derive(Debug, Clone)]
pub struct LabeledDataset {
    records: Vec<ClinicalRecord>,
    labels: Vec<u8>,
}

impl LabeledDataset {
    /// Build a dataset from (record, label) pairs.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(ClinicalRecord, u8)>) -> Self {
        let (records, labels) = pairs.into_iter().unzip();
        Self { records, labels }
    }

    /// Number of labeled records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[ClinicalRecord] {
        &self.records
    }

    #[must_use]
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Number of distinct label classes present.
    #[must_use]
    pub fn distinct_classes(&self) -> usize {
        let has_negative = self.labels.iter().any(|&l| l == 0);
        let has_positive = self.labels.iter().any(|&l| l != 0);
        usize::from(has_negative) + usize::from(has_positive)
    }

    /// Feature matrix in canonical column order, one row per record.
    #[must_use]
    pub fn feature_matrix(&self) -> Vec<Vec<f64>> {
        self.records.iter().map(ClinicalRecord::to_features).collect()
    }
}
