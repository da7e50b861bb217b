//! # Cardiorisk
//!
//! Cardiovascular risk scoring engine.
//!
//! This crate provides:
//! - Random-forest inference over 13 clinical attributes
//! - Risk-tier classification (LOW / MODERATE / CRITICAL) with advisory text
//! - Ranked feature-importance explanations for each assessment
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (ClinicalRecord, RiskAssessment, tiering)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (CSV loader, random forest)
//! - `application`: Use cases orchestrating domain and ports

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use domain::{ClinicalRecord, ModelError, RiskAssessment, RiskTier};
pub use ports::DataError;

/// Result type for cardiorisk operations
pub type Result<T> = std::result::Result<T, CardioriskError>;

/// Main error type for cardiorisk
#[derive(Debug, thiserror::Error)]
pub enum CardioriskError {
    #[error("Dataset error: {0}")]
    Data(#[from] ports::DataError),

    #[error("Model error: {0}")]
    Model(#[from] domain::ModelError),

    #[error("Invalid clinical input: {0}")]
    Validation(String),
}
