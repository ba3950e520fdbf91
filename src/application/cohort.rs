//! Cohort summary: Aggregate view over a set of assessments.

use serde::{Deserialize, Serialize};

use crate::domain::{RiskAssessment, RiskCategory};

/// Category counts and mean score for a scored cohort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortSummary {
    pub total: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,

    /// Mean risk score, 0 for an empty cohort
    pub average_risk_score: f64,

    /// Patients in the High category, in input order
    pub high_risk_patients: Vec<String>,
}

impl CohortSummary {
    #[must_use]
    pub fn from_assessments<'a, I>(assessments: I) -> Self
    where
        I: IntoIterator<Item = &'a RiskAssessment>,
    {
        let mut summary = Self::default();
        let mut score_sum = 0.0;

        for a in assessments {
            summary.total += 1;
            score_sum += a.risk_score;
            match a.risk_category {
                RiskCategory::Low => summary.low += 1,
                RiskCategory::Medium => summary.medium += 1,
                RiskCategory::High => {
                    summary.high += 1;
                    summary.high_risk_patients.push(a.patient_id.clone());
                }
            }
        }

        if summary.total > 0 {
            summary.average_risk_score = score_sum / summary.total as f64;
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn assessment(id: &str, score: f64) -> RiskAssessment {
        RiskAssessment {
            patient_id: id.into(),
            risk_score: score,
            risk_category: RiskCategory::from_score(score),
            confidence: 0.8,
            contributing_factors: vec![],
            recommendations: vec![],
            prediction_date: Utc::now(),
        }
    }

    #[test]
    fn test_empty_cohort() {
        let summary = CohortSummary::from_assessments(&Vec::<RiskAssessment>::new());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_risk_score, 0.0);
    }

    #[test]
    fn test_counts_and_average() {
        let cohort = vec![
            assessment("P1", 0.9),
            assessment("P2", 0.1),
            assessment("P3", 0.5),
            assessment("P4", 0.7),
        ];
        let summary = CohortSummary::from_assessments(&cohort);

        assert_eq!((summary.low, summary.medium, summary.high), (1, 1, 2));
        assert!((summary.average_risk_score - 0.55).abs() < 1e-12);
        assert_eq!(summary.high_risk_patients, vec!["P1", "P4"]);
    }
}
