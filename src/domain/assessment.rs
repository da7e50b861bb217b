//! Risk assessment result types.
//!
//! Represents the output of one heart disease risk inference.

use serde::{Deserialize, Serialize};

/// Risk tier classification for heart disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    /// Low risk of heart disease
    Low,
    /// Moderate risk, monitoring recommended
    Moderate,
    /// Critical risk, immediate consultation advised
    Critical,
}

impl RiskTier {
    /// Classify a disease probability into a tier.
    ///
    /// Thresholds are fixed: above 0.60 is critical, above 0.35 is moderate,
    /// the rest is low. Boundary values belong to the lower tier.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.60 {
            Self::Critical
        } else if probability > 0.35 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Get the advisory message shown with this tier.
    #[must_use]
    pub fn advisory(&self) -> &'static str {
        match self {
            Self::Low => "Healthy profile detected. Keep maintaining a balanced lifestyle!",
            Self::Moderate => "It's recommended to schedule a check-up and monitor your vitals.",
            Self::Critical => "Immediate consultation with a specialist is strongly advised.",
        }
    }

    /// Get the associated color for display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (46, 213, 115),      // Green (#2ED573)
            Self::Moderate => (255, 165, 2),  // Amber (#FFA502)
            Self::Critical => (255, 75, 43),  // Red (#FF4B2B)
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Result of one risk inference, ready for display or serialization.
///
/// Ephemeral: produced per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Raw disease probability (0.0 to 1.0)
    pub probability: f64,

    /// Probability expressed as a percentage
    pub percentage: f64,

    /// Risk tier derived from the probability
    pub tier: RiskTier,

    /// Advisory message for the tier
    pub message: String,

    /// Features ranked by their contribution to the model, descending
    pub top_factors: Vec<(String, f64)>,

    /// Timestamp of the assessment
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl RiskAssessment {
    /// Create an assessment from a probability and ranked contributions.
    #[must_use]
    pub fn new(probability: f64, top_factors: Vec<(String, f64)>) -> Self {
        let tier = RiskTier::from_probability(probability);
        Self {
            probability,
            percentage: probability * 100.0,
            tier,
            message: tier.advisory().to_string(),
            top_factors,
            created_at: chrono::Utc::now(),
        }
    }
}
