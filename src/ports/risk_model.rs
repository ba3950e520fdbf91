//! Risk model port: Trait for turning a feature map into an assessment.
//!
//! Models only see the feature-name contract in
//! [`crate::domain::features::names`], so the weighted scorer can be replaced
//! by a learned model without touching extraction.

use crate::domain::{FeatureMap, RiskAssessment};
use crate::ports::{Clock, RandomSource};

/// Trait for readmission risk models.
pub trait RiskModel: Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &str;

    /// Score one patient's features.
    ///
    /// This never fails on a well-formed map. A missing or blank
    /// `patient_id` is reported as `"unknown"`.
    ///
    /// # Arguments
    /// * `features` - Feature map for a single patient
    /// * `patient_id` - Identifier to attach to the assessment
    /// * `rng` - Source of scoring noise
    /// * `clock` - Source of the prediction timestamp
    fn score(
        &self,
        features: &FeatureMap,
        patient_id: Option<&str>,
        rng: &mut dyn RandomSource,
        clock: &dyn Clock,
    ) -> RiskAssessment;
}
