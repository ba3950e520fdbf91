//! Declarative rule tables for the weighted scorer.
//!
//! Scoring weights, the reference importance table, factor thresholds and
//! recommendation text all live here so they can be audited or swapped
//! without touching control flow.

use crate::domain::features::names;
use crate::domain::RiskCategory;

/// Signed per-feature weights of the linear score.
pub const SCORE_WEIGHTS: &[(&str, f64)] = &[
    (names::PREVIOUS_ADMISSIONS, 0.15),
    (names::CHARLSON_COMORBIDITY_INDEX, 0.12),
    (names::LENGTH_OF_STAY, 0.10),
    (names::AGE, 0.08),
    (names::EMERGENCY_ADMISSION, 0.08),
    (names::MEDICATION_COMPLEXITY, 0.07),
    (names::SOCIAL_RISK_SCORE, 0.06),
    (names::DISCHARGE_HOME, -0.05),
    (names::NUM_DIAGNOSES, 0.05),
    (names::SYSTOLIC_BP, 0.04),
    (names::HEART_RATE, 0.04),
    (names::OXYGEN_SATURATION, -0.03),
    (names::IS_WEEKEND_DISCHARGE, 0.03),
    (names::INSURANCE_UNINSURED, 0.03),
    (names::TEMPERATURE, 0.02),
];

/// Reference feature importances; its size is the denominator of the
/// data-completeness confidence.
pub const REFERENCE_IMPORTANCES: &[(&str, f64)] = &[
    (names::PREVIOUS_ADMISSIONS, 0.15),
    (names::CHARLSON_COMORBIDITY_INDEX, 0.12),
    (names::LENGTH_OF_STAY, 0.10),
    (names::AGE, 0.08),
    (names::EMERGENCY_ADMISSION, 0.08),
    (names::MEDICATION_COMPLEXITY, 0.07),
    (names::SOCIAL_RISK_SCORE, 0.06),
    (names::DISCHARGE_HOME, 0.05),
    (names::NUM_DIAGNOSES, 0.05),
    (names::SYSTOLIC_BP, 0.04),
    (names::HEART_RATE, 0.04),
    (names::OXYGEN_SATURATION, 0.03),
    (names::IS_WEEKEND_DISCHARGE, 0.03),
    (names::INSURANCE_UNINSURED, 0.03),
    (names::TEMPERATURE, 0.02),
    (names::RESPIRATORY_RATE, 0.02),
    (names::DIASTOLIC_BP, 0.02),
    (names::AGE_GROUP, 0.01),
];

/// How a factor rule compares the feature value with its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    GreaterThan,
    EqualTo,
}

impl Comparison {
    #[must_use]
    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterThan => value > threshold,
            Self::EqualTo => value == threshold,
        }
    }
}

/// One contributing-factor rule. `{value}` in the template is replaced by the
/// triggering feature value.
#[derive(Debug, Clone, Copy)]
pub struct FactorRule {
    pub feature: &'static str,
    pub comparison: Comparison,
    pub threshold: f64,
    pub factor: &'static str,
    pub importance: f64,
    pub template: &'static str,
}

impl FactorRule {
    #[must_use]
    pub fn describe(&self, value: f64) -> String {
        self.template.replace("{value}", &value.to_string())
    }
}

pub const PREVIOUS_ADMISSIONS: &str = "Previous Admissions";
pub const COMORBIDITY_BURDEN: &str = "Comorbidity Burden";
pub const EXTENDED_LENGTH_OF_STAY: &str = "Extended Length of Stay";
pub const ADVANCED_AGE: &str = "Advanced Age";
pub const SOCIAL_RISK_FACTORS: &str = "Social Risk Factors";
pub const EMERGENCY_ADMISSION: &str = "Emergency Admission";

/// Factor rules in evaluation order. Ties in importance keep this order.
pub const FACTOR_RULES: &[FactorRule] = &[
    FactorRule {
        feature: names::PREVIOUS_ADMISSIONS,
        comparison: Comparison::GreaterThan,
        threshold: 2.0,
        factor: PREVIOUS_ADMISSIONS,
        importance: 0.85,
        template: "{value} previous admissions indicate high readmission risk",
    },
    FactorRule {
        feature: names::CHARLSON_COMORBIDITY_INDEX,
        comparison: Comparison::GreaterThan,
        threshold: 3.0,
        factor: COMORBIDITY_BURDEN,
        importance: 0.78,
        template: "High comorbidity index ({value}) increases complexity",
    },
    FactorRule {
        feature: names::LENGTH_OF_STAY,
        comparison: Comparison::GreaterThan,
        threshold: 7.0,
        factor: EXTENDED_LENGTH_OF_STAY,
        importance: 0.65,
        template: "{value} day stay suggests complex medical needs",
    },
    FactorRule {
        feature: names::AGE,
        comparison: Comparison::GreaterThan,
        threshold: 75.0,
        factor: ADVANCED_AGE,
        importance: 0.60,
        template: "Age {value} associated with increased readmission risk",
    },
    FactorRule {
        feature: names::SOCIAL_RISK_SCORE,
        comparison: Comparison::GreaterThan,
        threshold: 2.0,
        factor: SOCIAL_RISK_FACTORS,
        importance: 0.55,
        template: "{value} social barriers may impact post-discharge care",
    },
    FactorRule {
        feature: names::EMERGENCY_ADMISSION,
        comparison: Comparison::EqualTo,
        threshold: 1.0,
        factor: EMERGENCY_ADMISSION,
        importance: 0.50,
        template: "Unplanned admission suggests unstable condition",
    },
];

pub const FOLLOW_UP_7_DAYS: &str = "Schedule follow-up appointment within 7 days";

const HIGH_RECOMMENDATIONS: &[&str] = &[
    FOLLOW_UP_7_DAYS,
    "Arrange home health services",
    "Medication reconciliation and education",
    "Consider transitional care management",
];

const MEDIUM_RECOMMENDATIONS: &[&str] = &[
    "Schedule follow-up appointment within 14 days",
    "Provide detailed discharge instructions",
    "Ensure medication adherence plan",
];

const LOW_RECOMMENDATIONS: &[&str] = &[
    "Standard discharge planning",
    "Follow-up as clinically indicated",
];

/// Base recommendations for a risk category.
#[must_use]
pub fn category_recommendations(category: RiskCategory) -> &'static [&'static str] {
    match category {
        RiskCategory::High => HIGH_RECOMMENDATIONS,
        RiskCategory::Medium => MEDIUM_RECOMMENDATIONS,
        RiskCategory::Low => LOW_RECOMMENDATIONS,
    }
}

/// Additions triggered by a reported factor label.
pub const FACTOR_RECOMMENDATIONS: &[(&str, &str)] = &[
    (
        SOCIAL_RISK_FACTORS,
        "Social work consultation for discharge planning",
    ),
    (COMORBIDITY_BURDEN, "Coordinate care with specialists"),
    (
        PREVIOUS_ADMISSIONS,
        "Review previous admission patterns and causes",
    ),
    (ADVANCED_AGE, "Geriatric assessment and fall prevention"),
];
