//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integrations:
//! - `csv`: CSV file ingestion for labeled clinical datasets
//! - `memory`: in-memory dataset fixtures
//! - `forest`: random forest implementation of the risk model

pub mod csv;
pub mod forest;
pub mod memory;

pub use self::csv::CsvDatasetSource;
pub use forest::RandomForest;
pub use memory::StaticDatasetSource;
