use std::collections::HashSet;

use chrono::{DateTime, Utc};
use proptest::prelude::*;

use readmit::adapters::rng::{FixedClock, FixedSource};
use readmit::adapters::weighted::rules::{FACTOR_RULES, REFERENCE_IMPORTANCES, SCORE_WEIGHTS};
use readmit::domain::extraction::{charlson_index, medication_complexity, CHARLSON_WEIGHTS};
use readmit::{FeatureMap, RiskCategory, RiskModel, WeightedRiskScorer};

fn clock() -> FixedClock {
    FixedClock(DateTime::<Utc>::default())
}

proptest! {
    #[test]
    fn charlson_index_is_order_independent_sum(
        picks in prop::collection::vec(0..CHARLSON_WEIGHTS.len(), 0..24),
        unknown in prop::collection::vec("unknown_[a-z]{1,8}", 0..4),
    ) {
        let mut tags: Vec<String> = picks.iter().map(|&i| CHARLSON_WEIGHTS[i].0.to_string()).collect();
        let expected: u32 = picks.iter().map(|&i| CHARLSON_WEIGHTS[i].1).sum();
        tags.extend(unknown);

        prop_assert_eq!(charlson_index(&tags), expected);
        tags.reverse();
        prop_assert_eq!(charlson_index(&tags), expected);
    }

    #[test]
    fn medication_complexity_is_at_least_count(
        meds in prop::collection::vec("[A-Za-z]{0,12}", 0..12),
    ) {
        prop_assert!(medication_complexity(&meds) >= meds.len() as u32);
    }

    #[test]
    fn risk_score_stays_in_unit_interval(
        values in prop::collection::vec(-1e9f64..1e9, SCORE_WEIGHTS.len()),
        unit in 0.0f64..=1.0,
    ) {
        let features: FeatureMap = SCORE_WEIGHTS
            .iter()
            .zip(values)
            .map(|((name, _), v)| (*name, v))
            .collect();
        let assessment = WeightedRiskScorer::default()
            .score(&features, None, &mut FixedSource::new(unit), &clock());

        prop_assert!((0.0..=1.0).contains(&assessment.risk_score));
        prop_assert_eq!(assessment.risk_category, RiskCategory::from_score(assessment.risk_score));
        prop_assert_eq!(assessment.patient_id.as_str(), "unknown");
    }

    #[test]
    fn confidence_stays_in_band(
        present in 0..=REFERENCE_IMPORTANCES.len(),
        unit in 0.0f64..=1.0,
    ) {
        let features: FeatureMap = REFERENCE_IMPORTANCES
            .iter()
            .take(present)
            .map(|(name, _)| (*name, 1.0))
            .collect();
        let confidence = WeightedRiskScorer::default()
            .confidence(&features, &mut FixedSource::new(unit));

        prop_assert!((0.6..=0.95).contains(&confidence));
    }

    #[test]
    fn factors_are_ranked_and_bounded(
        values in prop::collection::vec(0.0f64..20.0, FACTOR_RULES.len()),
        emergency in any::<bool>(),
    ) {
        let features: FeatureMap = FACTOR_RULES
            .iter()
            .zip(values)
            .map(|(rule, v)| {
                let v = if rule.feature == "emergency_admission" {
                    if emergency { 1.0 } else { 0.0 }
                } else {
                    v
                };
                (rule.feature, v)
            })
            .collect();

        let assessment = WeightedRiskScorer::default()
            .score(&features, Some("P"), &mut FixedSource::midpoint(), &clock());
        let factors = &assessment.contributing_factors;

        prop_assert!(factors.len() <= 5);
        prop_assert!(factors.windows(2).all(|w| w[0].importance >= w[1].importance));

        let unique: HashSet<_> = assessment.recommendations.iter().collect();
        prop_assert_eq!(unique.len(), assessment.recommendations.len());
    }
}
