//! Domain layer: Core types and pure feature logic.
//!
//! Nothing in this module performs I/O, reads the clock, or draws random
//! numbers.

mod assessment;
pub mod extraction;
pub mod features;
mod metrics;
mod patient;

pub use assessment::{ContributingFactor, RiskAssessment, RiskCategory};
pub use extraction::{extract_features, FeatureExtractor};
pub use features::FeatureMap;
pub use metrics::{ConfusionMatrix, ModelMetrics};
pub use patient::{Gender, LabResult, PatientRecord, SocialFactors, ValidationError, VitalSigns};
