//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the engine.

mod assessment;

pub use assessment::AssessmentService;
