//! # Readmit
//!
//! Transparent 30-day hospital readmission risk scoring.
//!
//! This crate provides:
//! - Feature extraction from a patient encounter record into a flat numeric
//!   feature map (comorbidity burden, calendar, lab, medication, social and
//!   categorical features)
//! - A weighted, rule-based risk model producing a bounded score, a risk
//!   category, a data-completeness confidence, ranked contributing factors
//!   and a recommendation list
//! - Batch scoring that keeps going past malformed records
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Records, feature maps, assessments, and pure extraction logic
//! - `ports`: Trait definitions for the risk model, randomness, time, and record sources
//! - `adapters`: Concrete implementations (weighted scorer, ChaCha20 RNG, JSON files)
//! - `application`: Use cases orchestrating domain and ports

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use adapters::weighted::{ScorerConfig, WeightedRiskScorer};
pub use application::{AssessmentService, CohortSummary};
pub use domain::{
    extract_features, FeatureExtractor, FeatureMap, ModelMetrics, PatientRecord, RiskAssessment,
    RiskCategory, ValidationError,
};
pub use ports::{Clock, RandomSource, RiskModel};

/// Result type for Readmit operations
pub type Result<T> = std::result::Result<T, ReadmitError>;

/// Main error type for Readmit
#[derive(Debug, thiserror::Error)]
pub enum ReadmitError {
    #[error("Invalid patient record: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("Record source failed: {0}")]
    Source(#[from] adapters::SourceError),

    #[error("Assessment worker panicked")]
    WorkerPanicked,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
