//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no external service dependencies.
//! All types are serializable and carry the invariants the rest of the crate
//! relies on, most importantly the canonical clinical feature ordering.

mod assessment;
mod dataset;
pub mod explain;
mod record;

pub use assessment::{RiskAssessment, RiskTier};
pub use dataset::LabeledDataset;
pub use record::{ClinicalRecord, ModelError, FEATURE_NAMES};
