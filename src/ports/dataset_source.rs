//! Dataset source port: Trait for labeled dataset retrieval.
//!
//! The training pipeline never fetches data itself; it receives a source as
//! an injected collaborator so the core stays testable without network or
//! filesystem access.

use crate::domain::LabeledDataset;

/// Errors raised while retrieving or parsing a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The source could not be fetched or its contents could not be parsed.
    #[error("Dataset unavailable: {0}")]
    Unavailable(String),

    /// The tabular source is missing an expected column.
    #[error("Dataset schema mismatch: missing column '{column}'")]
    SchemaMismatch { column: String },
}

/// Trait for loading a labeled clinical dataset.
///
/// Implementations resolve a source (file, in-memory fixture, remote table)
/// into records with feature columns in canonical order and the binary label
/// separated out. No transformation is performed; records are assumed
/// complete.
pub trait DatasetSource: Send + Sync {
    /// Load the full labeled dataset.
    ///
    /// # Errors
    /// Returns `DataError::Unavailable` if the source cannot be retrieved or
    /// parsed, `DataError::SchemaMismatch` if expected columns are absent.
    fn load(&self) -> Result<LabeledDataset, DataError>;
}
