//! CSV adapter: Implementation of `DatasetSource` for tabular files.
//!
//! Expects a header row with the 13 canonical feature columns plus a binary
//! `target` label column. Columns may appear in any order in the file; they
//! are mapped by name into canonical order before records are built, so the
//! on-disk layout can never reorder features behind the model's back.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::domain::{ClinicalRecord, LabeledDataset, FEATURE_NAMES};
use crate::ports::{DataError, DatasetSource};

/// Name of the binary label column.
const TARGET_COLUMN: &str = "target";

/// Loads a labeled dataset from a CSV file on disk.
pub struct CsvDatasetSource {
    path: PathBuf,
}

impl CsvDatasetSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for CsvDatasetSource {
    fn load(&self) -> Result<LabeledDataset, DataError> {
        tracing::info!(path = %self.path.display(), "Loading clinical dataset");
        let file = std::fs::File::open(&self.path)
            .map_err(|e| DataError::Unavailable(format!("{}: {e}", self.path.display())))?;
        read_dataset(file)
    }
}

/// Parse a labeled dataset from any CSV reader.
///
/// # Errors
/// `DataError::SchemaMismatch` when a canonical column or `target` is missing
/// from the header, `DataError::Unavailable` when a row cannot be parsed.
pub fn read_dataset<R: Read>(reader: R) -> Result<LabeledDataset, DataError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DataError::Unavailable(format!("Failed to read header: {e}")))?
        .clone();

    let column_index = |name: &str| -> Result<usize, DataError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| DataError::SchemaMismatch {
                column: name.to_string(),
            })
    };

    // Resolve every canonical column up front so a schema problem surfaces
    // before any row is parsed.
    let mut feature_indices = Vec::with_capacity(FEATURE_NAMES.len());
    for name in FEATURE_NAMES {
        feature_indices.push(column_index(name)?);
    }
    let target_index = column_index(TARGET_COLUMN)?;

    let mut pairs = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let line = row + 2; // header occupies line 1
        let record = result
            .map_err(|e| DataError::Unavailable(format!("Failed to read line {line}: {e}")))?;

        let parse_field = |idx: usize| -> Result<f64, DataError> {
            let raw = record.get(idx).ok_or_else(|| {
                DataError::Unavailable(format!("Line {line}: missing field {idx}"))
            })?;
            raw.trim().parse::<f64>().map_err(|e| {
                DataError::Unavailable(format!("Line {line}: invalid number '{raw}': {e}"))
            })
        };

        let mut features = Vec::with_capacity(FEATURE_NAMES.len());
        for &idx in &feature_indices {
            features.push(parse_field(idx)?);
        }

        let label = parse_field(target_index)?;
        if label != 0.0 && label != 1.0 {
            return Err(DataError::Unavailable(format!(
                "Line {line}: target must be 0 or 1, got {label}"
            )));
        }

        // Length is 13 by construction, so this cannot fail here.
        let clinical = ClinicalRecord::from_slice(&features)
            .map_err(|e| DataError::Unavailable(e.to_string()))?;
        pairs.push((clinical, label as u8));
    }

    tracing::debug!(records = pairs.len(), "Dataset parsed");
    Ok(LabeledDataset::from_pairs(pairs))
}
