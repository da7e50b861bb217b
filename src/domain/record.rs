//! Clinical record types for cardiovascular risk prediction.
//!
//! Based on the UCI Heart Disease dataset attributes.

use serde::{Deserialize, Serialize};

/// Canonical feature order established at training time.
///
/// Names match the UCI heart.csv header. Inference must present features in
/// exactly this order; the model rejects any other arity outright.
pub const FEATURE_NAMES: [&str; 13] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// Errors raised by model training and inference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Training requires both label classes to be represented.
    #[error("Insufficient data: {classes} label class(es) present, need 2")]
    InsufficientData { classes: usize },

    /// Inference input does not match the trained feature ordering.
    #[error("Feature count mismatch: expected {expected} features, got {got}")]
    FeatureCountMismatch { expected: usize, got: usize },
}

/// Clinical attributes of a single patient, in the canonical UCI schema.
///
/// 13 features matching the trained model:
/// age, sex, cp, trestbps, chol, fbs, restecg, thalach, exang, oldpeak,
/// slope, ca, thal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRecord {
    /// Age in years (1-120 typical range)
    pub age: f64,

    /// Sex: 0 = female, 1 = male
    pub sex: f64,

    /// Chest pain type: 0 = typical angina, 1 = atypical angina,
    /// 2 = non-anginal, 3 = asymptomatic
    pub chest_pain: f64,

    /// Resting blood pressure in mm Hg (80-200 typical)
    pub resting_bp: f64,

    /// Serum cholesterol in mg/dL (100-600 typical)
    pub cholesterol: f64,

    /// Fasting blood sugar > 120 mg/dL: 0 = no, 1 = yes
    pub fasting_blood_sugar: f64,

    /// Resting ECG result: 0 = normal, 1 = ST-T abnormality,
    /// 2 = left ventricular hypertrophy
    pub rest_ecg: f64,

    /// Maximum heart rate achieved (60-220 typical)
    pub max_heart_rate: f64,

    /// Exercise-induced angina: 0 = no, 1 = yes
    pub exercise_angina: f64,

    /// ST depression induced by exercise (0.0-6.0, 0.1 increments)
    pub st_depression: f64,

    /// Slope of the peak exercise ST segment: 0 = upsloping, 1 = flat,
    /// 2 = downsloping
    pub st_slope: f64,

    /// Number of major vessels colored by fluoroscopy (0-3)
    pub major_vessels: f64,

    /// Thalassemia type: 1 = fixed defect, 2 = normal, 3 = reversible defect
    pub thalassemia: f64,
}

impl Default for ClinicalRecord {
    /// Intake defaults matching the original screening form.
    fn default() -> Self {
        Self {
            age: 55.0,
            sex: 0.0,
            chest_pain: 0.0,
            resting_bp: 120.0,
            cholesterol: 240.0,
            fasting_blood_sugar: 0.0,
            rest_ecg: 0.0,
            max_heart_rate: 150.0,
            exercise_angina: 0.0,
            st_depression: 1.0,
            st_slope: 0.0,
            major_vessels: 0.0,
            thalassemia: 1.0,
        }
    }
}

impl ClinicalRecord {
    /// Emit the features in canonical order for model consumption.
    ///
    /// This is the only sanctioned path from named fields to a positional
    /// vector; building positional arrays ad hoc would silently corrupt
    /// predictions on reorder.
    #[must_use]
    pub fn to_features(&self) -> Vec<f64> {
        vec![
            self.age,
            self.sex,
            self.chest_pain,
            self.resting_bp,
            self.cholesterol,
            self.fasting_blood_sugar,
            self.rest_ecg,
            self.max_heart_rate,
            self.exercise_angina,
            self.st_depression,
            self.st_slope,
            self.major_vessels,
            self.thalassemia,
        ]
    }

    /// Create a record from a canonically ordered slice.
    ///
    /// # Errors
    /// Returns `ModelError::FeatureCountMismatch` if the slice length is not 13.
    pub fn from_slice(v: &[f64]) -> Result<Self, ModelError> {
        if v.len() != FEATURE_NAMES.len() {
            return Err(ModelError::FeatureCountMismatch {
                expected: FEATURE_NAMES.len(),
                got: v.len(),
            });
        }

        Ok(Self {
            age: v[0],
            sex: v[1],
            chest_pain: v[2],
            resting_bp: v[3],
            cholesterol: v[4],
            fasting_blood_sugar: v[5],
            rest_ecg: v[6],
            max_heart_rate: v[7],
            exercise_angina: v[8],
            st_depression: v[9],
            st_slope: v[10],
            major_vessels: v[11],
            thalassemia: v[12],
        })
    }

    /// Check that all attributes fall within their documented clinical ranges.
    ///
    /// Out-of-range values are still accepted by inference; enforcing this is
    /// the caller's policy. The engine only reports.
    ///
    /// # Errors
    /// Returns the violations as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(1.0..=120.0).contains(&self.age) {
            errors.push(format!("Age {} out of range [1, 120]", self.age));
        }
        if self.sex != 0.0 && self.sex != 1.0 {
            errors.push(format!("Sex {} must be 0 or 1", self.sex));
        }
        if !(0.0..=3.0).contains(&self.chest_pain) {
            errors.push(format!("Chest pain type {} out of range [0, 3]", self.chest_pain));
        }
        if !(80.0..=200.0).contains(&self.resting_bp) {
            errors.push(format!(
                "Resting BP {} out of range [80, 200]",
                self.resting_bp
            ));
        }
        if !(100.0..=600.0).contains(&self.cholesterol) {
            errors.push(format!(
                "Cholesterol {} out of range [100, 600]",
                self.cholesterol
            ));
        }
        if self.fasting_blood_sugar != 0.0 && self.fasting_blood_sugar != 1.0 {
            errors.push(format!(
                "Fasting blood sugar flag {} must be 0 or 1",
                self.fasting_blood_sugar
            ));
        }
        if !(0.0..=2.0).contains(&self.rest_ecg) {
            errors.push(format!("Resting ECG {} out of range [0, 2]", self.rest_ecg));
        }
        if !(60.0..=220.0).contains(&self.max_heart_rate) {
            errors.push(format!(
                "Max heart rate {} out of range [60, 220]",
                self.max_heart_rate
            ));
        }
        if self.exercise_angina != 0.0 && self.exercise_angina != 1.0 {
            errors.push(format!(
                "Exercise angina {} must be 0 or 1",
                self.exercise_angina
            ));
        }
        if !(0.0..=6.0).contains(&self.st_depression) {
            errors.push(format!(
                "ST depression {} out of range [0.0, 6.0]",
                self.st_depression
            ));
        }
        if !(0.0..=2.0).contains(&self.st_slope) {
            errors.push(format!("ST slope {} out of range [0, 2]", self.st_slope));
        }
        if !(0.0..=3.0).contains(&self.major_vessels) {
            errors.push(format!(
                "Major vessels {} out of range [0, 3]",
                self.major_vessels
            ));
        }
        if !(1.0..=3.0).contains(&self.thalassemia) {
            errors.push(format!(
                "Thalassemia {} out of range [1, 3]",
                self.thalassemia
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Human-readable chest pain type.
    #[must_use]
    pub fn chest_pain_label(&self) -> &'static str {
        match self.chest_pain as i64 {
            0 => "Typical Angina",
            1 => "Atypical Angina",
            2 => "Non-Anginal",
            _ => "Asymptomatic",
        }
    }

    /// Human-readable resting ECG result.
    #[must_use]
    pub fn rest_ecg_label(&self) -> &'static str {
        match self.rest_ecg as i64 {
            0 => "Normal",
            1 => "ST-T Abnormality",
            _ => "LV Hypertrophy",
        }
    }

    /// Human-readable ST slope.
    #[must_use]
    pub fn st_slope_label(&self) -> &'static str {
        match self.st_slope as i64 {
            0 => "Upsloping",
            1 => "Flat",
            _ => "Downsloping",
        }
    }

    /// Human-readable thalassemia type.
    #[must_use]
    pub fn thalassemia_label(&self) -> &'static str {
        match self.thalassemia as i64 {
            1 => "Fixed Defect",
            2 => "Normal",
            _ => "Reversible Defect",
        }
    }
}
