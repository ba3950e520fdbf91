//! Readmission risk assessment types.
//!
//! Represents the output of a risk model for one patient.

use serde::{Deserialize, Serialize};

/// Risk category for 30-day readmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    /// Score below 0.3
    Low,
    /// Score in [0.3, 0.7)
    Medium,
    /// Score of 0.7 or more
    High,
}

impl RiskCategory {
    /// Lower bound (inclusive) of the Medium bucket.
    pub const MEDIUM_THRESHOLD: f64 = 0.3;
    /// Lower bound (inclusive) of the High bucket.
    pub const HIGH_THRESHOLD: f64 = 0.7;

    /// Bucket a risk score. Lower bounds are closed, upper bounds open.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < Self::MEDIUM_THRESHOLD {
            Self::Low
        } else if score < Self::HIGH_THRESHOLD {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - Standard discharge planning",
            Self::Medium => "Medium risk - Enhanced follow-up recommended",
            Self::High => "High risk - Transitional care intervention advised",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// A named explanation for why a score came out the way it did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributingFactor {
    /// Factor label, e.g. "Previous Admissions"
    pub factor: String,
    /// Fixed importance weight in [0, 1]
    pub importance: f64,
    /// Description referencing the triggering value
    pub description: String,
}

/// Complete risk assessment for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Patient identifier, "unknown" when none was supplied
    pub patient_id: String,

    /// Risk score in [0, 1]
    pub risk_score: f64,

    /// Bucketed risk score
    pub risk_category: RiskCategory,

    /// Data-completeness confidence in [0.6, 0.95]
    pub confidence: f64,

    /// At most five factors, highest importance first
    pub contributing_factors: Vec<ContributingFactor>,

    /// Ordered, duplicate-free action list
    pub recommendations: Vec<String>,

    /// Time the assessment was produced
    pub prediction_date: chrono::DateTime<chrono::Utc>,
}

impl RiskAssessment {
    /// Whether a factor with the given label was reported.
    #[must_use]
    pub fn has_factor(&self, label: &str) -> bool {
        self.contributing_factors.iter().any(|f| f.factor == label)
    }
}
