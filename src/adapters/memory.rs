//! In-memory dataset source for fixtures and tests.

use crate::domain::LabeledDataset;
use crate::ports::{DataError, DatasetSource};

/// Serves a dataset held in memory.
///
/// Keeps the training pipeline exercisable without any I/O, which is also
/// how the test suite drives it.
pub struct StaticDatasetSource {
    dataset: LabeledDataset,
}

impl StaticDatasetSource {
    #[must_use]
    pub fn new(dataset: LabeledDataset) -> Self {
        Self { dataset }
    }
}

impl DatasetSource for StaticDatasetSource {
    fn load(&self) -> Result<LabeledDataset, DataError> {
        Ok(self.dataset.clone())
    }
}
