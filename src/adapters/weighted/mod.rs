//! Weighted adapter: Transparent linear implementation of `RiskModel`.
//!
//! The score is a signed weighted sum over a fixed subset of features, plus a
//! small uniform perturbation and a base offset, clamped to [0, 1]. It stands
//! in for a trained classifier behind the same `RiskModel` contract.
//!
//! # Confidence
//!
//! The reported confidence is a data-completeness proxy: the share of the
//! reference feature table covered by the input map, plus a small jitter,
//! clamped to a fixed band. It is not a statistical confidence interval.

pub mod rules;

use std::collections::HashSet;

use crate::domain::{ContributingFactor, FeatureMap, RiskAssessment, RiskCategory};
use crate::ports::{Clock, RandomSource, RiskModel};

use rules::{FACTOR_RECOMMENDATIONS, FACTOR_RULES, REFERENCE_IMPORTANCES, SCORE_WEIGHTS};

/// Identifier reported for assessments without a usable patient id.
pub const UNKNOWN_PATIENT: &str = "unknown";

/// Configuration for the weighted scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorerConfig {
    /// Constant added to the weighted sum before clamping
    pub base_offset: f64,

    /// Half-width of the uniform score perturbation
    pub perturbation: f64,

    /// Upper bound of the uniform confidence jitter
    pub confidence_jitter: f64,

    /// Confidence band (min, max)
    pub confidence_bounds: (f64, f64),

    /// Maximum number of contributing factors reported
    pub max_factors: usize,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            base_offset: 0.3,
            perturbation: 0.05,
            confidence_jitter: 0.1,
            confidence_bounds: (0.6, 0.95),
            max_factors: 5,
        }
    }
}

fn parse_f64(raw: Option<String>) -> Option<f64> {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|x| x.is_finite())
}

impl ScorerConfig {
    /// Load config overrides from environment (best-effort).
    ///
    /// Supported:
    /// - READMIT_BASE_OFFSET
    /// - READMIT_PERTURBATION (>= 0)
    /// - READMIT_CONFIDENCE_JITTER (>= 0)
    #[must_use]
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Apply overrides read through `lookup`. Unparseable, non-finite and
    /// out-of-range values keep the default.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(x) = parse_f64(lookup("READMIT_BASE_OFFSET")) {
            cfg.base_offset = x;
        }
        if let Some(x) = parse_f64(lookup("READMIT_PERTURBATION")).filter(|x| *x >= 0.0) {
            cfg.perturbation = x;
        }
        if let Some(x) = parse_f64(lookup("READMIT_CONFIDENCE_JITTER")).filter(|x| *x >= 0.0) {
            cfg.confidence_jitter = x;
        }

        cfg
    }
}

/// Linear weighted-sum readmission scorer.
#[derive(Debug, Clone, Default)]
pub struct WeightedRiskScorer {
    config: ScorerConfig,
}

impl WeightedRiskScorer {
    #[must_use]
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Weighted sum of the features present in the map. Absent features
    /// contribute nothing.
    #[must_use]
    pub fn weighted_sum(&self, features: &FeatureMap) -> f64 {
        SCORE_WEIGHTS
            .iter()
            .filter_map(|(name, weight)| features.get(name).map(|value| value * weight))
            .sum()
    }

    /// Risk score in [0, 1].
    pub fn risk_score(&self, features: &FeatureMap, rng: &mut dyn RandomSource) -> f64 {
        let half_width = self.config.perturbation;
        let mut score = self.weighted_sum(features);
        score += rng.uniform(-half_width, half_width);
        score += self.config.base_offset;
        if score.is_nan() {
            return 0.0;
        }
        score.clamp(0.0, 1.0)
    }

    /// Data-completeness confidence, clamped to the configured band.
    pub fn confidence(&self, features: &FeatureMap, rng: &mut dyn RandomSource) -> f64 {
        let (min, max) = self.config.confidence_bounds;
        let completeness = features.present_count() as f64 / REFERENCE_IMPORTANCES.len() as f64;
        let jitter = rng.uniform(0.0, self.config.confidence_jitter);
        (completeness + jitter).clamp(min, max)
    }

    /// Factors whose rule fires, highest importance first, truncated.
    ///
    /// The sort is stable, so equal importances keep rule order.
    #[must_use]
    pub fn contributing_factors(&self, features: &FeatureMap) -> Vec<ContributingFactor> {
        let mut factors: Vec<ContributingFactor> = FACTOR_RULES
            .iter()
            .filter_map(|rule| {
                let value = features.get(rule.feature)?;
                rule.comparison
                    .holds(value, rule.threshold)
                    .then(|| ContributingFactor {
                        factor: rule.factor.to_string(),
                        importance: rule.importance,
                        description: rule.describe(value),
                    })
            })
            .collect();

        factors.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        factors.truncate(self.config.max_factors);
        factors
    }

    /// Category actions followed by factor-specific actions, without
    /// duplicates and in first-occurrence order.
    #[must_use]
    pub fn recommendations(
        &self,
        category: RiskCategory,
        factors: &[ContributingFactor],
    ) -> Vec<String> {
        let factor_actions = factors.iter().filter_map(|f| {
            FACTOR_RECOMMENDATIONS
                .iter()
                .find(|(label, _)| *label == f.factor)
                .map(|(_, action)| *action)
        });

        let mut seen = HashSet::new();
        rules::category_recommendations(category)
            .iter()
            .copied()
            .chain(factor_actions)
            .filter(|action| seen.insert(*action))
            .map(str::to_string)
            .collect()
    }
}

impl RiskModel for WeightedRiskScorer {
    fn name(&self) -> &str {
        "weighted-linear"
    }

    fn score(
        &self,
        features: &FeatureMap,
        patient_id: Option<&str>,
        rng: &mut dyn RandomSource,
        clock: &dyn Clock,
    ) -> RiskAssessment {
        let patient_id = patient_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(UNKNOWN_PATIENT)
            .to_string();

        let risk_score = self.risk_score(features, rng);
        let risk_category = RiskCategory::from_score(risk_score);
        let confidence = self.confidence(features, rng);
        let contributing_factors = self.contributing_factors(features);
        let recommendations = self.recommendations(risk_category, &contributing_factors);

        tracing::debug!(
            score = risk_score,
            category = %risk_category,
            factors = contributing_factors.len(),
            "Scored feature map"
        );

        RiskAssessment {
            patient_id,
            risk_score,
            risk_category,
            confidence,
            contributing_factors,
            recommendations,
            prediction_date: clock.now(),
        }
    }
}
