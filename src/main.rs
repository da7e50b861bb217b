//! Cardiorisk: cardiovascular risk scoring engine.
//!
//! Thin CLI entry point: trains on a labeled CSV dataset and scores one
//! clinical record, printing the assessment as JSON.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use cardiorisk::adapters::{CsvDatasetSource, RandomForest};
use cardiorisk::application::AssessmentService;
use cardiorisk::domain::{ClinicalRecord, FEATURE_NAMES};
use cardiorisk::ports::ModelConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(dataset_path) = args.next() else {
        bail!(
            "usage: cardiorisk <dataset.csv> [{} comma-separated feature values]",
            FEATURE_NAMES.len()
        );
    };

    let record = match args.next() {
        Some(raw) => parse_record(&raw)?,
        None => ClinicalRecord::default(),
    };

    let strict = std::env::var("CARDIORISK_STRICT")
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    if !strict {
        if let Err(violations) = record.validate() {
            for violation in &violations {
                tracing::warn!("Out-of-range input: {violation}");
            }
        }
    }
    tracing::info!(
        age = record.age,
        chest_pain = record.chest_pain_label(),
        rest_ecg = record.rest_ecg_label(),
        st_slope = record.st_slope_label(),
        thalassemia = record.thalassemia_label(),
        "Scoring clinical record"
    );

    let source = Arc::new(CsvDatasetSource::new(dataset_path));
    let service: AssessmentService<RandomForest, _> =
        AssessmentService::new(source, ModelConfig::default());

    let assessment = if strict {
        service.assess_strict(&record)?
    } else {
        service.assess(&record)?
    };
    println!("{}", serde_json::to_string_pretty(&assessment)?);

    Ok(())
}

fn parse_record(raw: &str) -> Result<ClinicalRecord> {
    let values = raw
        .split(',')
        .map(|field| {
            field
                .trim()
                .parse::<f64>()
                .with_context(|| format!("invalid feature value '{field}'"))
        })
        .collect::<Result<Vec<f64>>>()?;

    ClinicalRecord::from_slice(&values)
        .context("expected 13 comma-separated feature values in canonical order")
}
