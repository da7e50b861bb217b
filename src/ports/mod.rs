//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (dataset sources, the
//! trained model implementation).

mod dataset_source;
mod model;

pub use dataset_source::{DataError, DatasetSource};
pub use model::{ModelConfig, RiskModel};
