//! Feature extraction: `PatientRecord -> FeatureMap`.
//!
//! Every sub-computation is a pure function over part of the record, so each
//! can be tested in isolation. Lookup tables are declared as constants at the
//! top of the module.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Timelike, Utc};
use regex::Regex;

use super::features::{lab_key, names, FeatureMap};
use super::patient::{Gender, LabResult, PatientRecord, SocialFactors, ValidationError};

/// Charlson comorbidity weights keyed by normalized condition tag.
pub const CHARLSON_WEIGHTS: &[(&str, u32)] = &[
    ("myocardial_infarction", 1),
    ("congestive_heart_failure", 1),
    ("peripheral_vascular_disease", 1),
    ("cerebrovascular_disease", 1),
    ("dementia", 1),
    ("chronic_pulmonary_disease", 1),
    ("rheumatic_disease", 1),
    ("peptic_ulcer_disease", 1),
    ("mild_liver_disease", 1),
    ("diabetes", 1),
    ("diabetes_complications", 2),
    ("hemiplegia", 2),
    ("renal_disease", 2),
    ("malignancy", 2),
    ("moderate_liver_disease", 3),
    ("metastatic_carcinoma", 6),
    ("aids", 6),
];

/// Substrings marking a high-risk medication.
pub const HIGH_RISK_MEDICATIONS: &[&str] = &[
    "warfarin",
    "insulin",
    "digoxin",
    "lithium",
    "phenytoin",
    "carbamazepine",
    "theophylline",
    "methotrexate",
];

/// Extra weight added per high-risk token match.
const HIGH_RISK_MEDICATION_WEIGHT: u32 = 2;

/// Upper bounds (exclusive) of the first three age buckets.
const AGE_GROUP_BOUNDS: [u32; 3] = [30, 50, 70];

const INSURANCE_TYPES: [(&str, &str); 4] = [
    (names::INSURANCE_MEDICARE, "Medicare"),
    (names::INSURANCE_MEDICAID, "Medicaid"),
    (names::INSURANCE_PRIVATE, "Private"),
    (names::INSURANCE_UNINSURED, "Uninsured"),
];

const DISCHARGE_DISPOSITIONS: [(&str, &str); 3] = [
    (names::DISCHARGE_HOME, "Home"),
    (names::DISCHARGE_SNF, "SNF"),
    (names::DISCHARGE_REHAB, "Rehabilitation"),
];

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("Valid regex"))
}

fn reference_range_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(-?(?:\d+\.?\d*|\.\d+))\s*-\s*(-?(?:\d+\.?\d*|\.\d+))\s*$")
            .expect("Valid regex")
    })
}

fn flag(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

/// Normalize a comorbidity tag: lower-case, whitespace runs become `_`.
#[must_use]
pub fn normalize_condition(tag: &str) -> String {
    whitespace_run()
        .replace_all(&tag.to_lowercase(), "_")
        .into_owned()
}

/// Charlson weight of a single tag, `None` when the tag is not in the table.
#[must_use]
pub fn charlson_weight(tag: &str) -> Option<u32> {
    let normalized = normalize_condition(tag);
    CHARLSON_WEIGHTS
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, weight)| *weight)
}

/// Sum of Charlson weights. Unknown tags contribute 0.
pub fn charlson_index<I, S>(comorbidities: I) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    comorbidities
        .into_iter()
        .map(|tag| {
            let tag = tag.as_ref();
            charlson_weight(tag).unwrap_or_else(|| {
                tracing::debug!(tag, "Unknown comorbidity tag, weight 0");
                0
            })
        })
        .sum()
}

/// Calendar features of the encounter boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalFeatures {
    /// 0 = Sunday .. 6 = Saturday
    pub admission_day_of_week: u32,
    pub admission_month: u32,
    pub admission_hour: u32,
    pub discharge_day_of_week: u32,
    pub discharge_month: u32,
    pub discharge_hour: u32,
    pub is_weekend_admission: bool,
    pub is_weekend_discharge: bool,
}

impl TemporalFeatures {
    fn write_to(&self, out: &mut BTreeMap<String, f64>) {
        let entries = [
            (names::ADMISSION_DAY_OF_WEEK, f64::from(self.admission_day_of_week)),
            (names::ADMISSION_MONTH, f64::from(self.admission_month)),
            (names::ADMISSION_HOUR, f64::from(self.admission_hour)),
            (names::DISCHARGE_DAY_OF_WEEK, f64::from(self.discharge_day_of_week)),
            (names::DISCHARGE_MONTH, f64::from(self.discharge_month)),
            (names::DISCHARGE_HOUR, f64::from(self.discharge_hour)),
            (names::IS_WEEKEND_ADMISSION, flag(self.is_weekend_admission)),
            (names::IS_WEEKEND_DISCHARGE, flag(self.is_weekend_discharge)),
        ];
        out.extend(entries.into_iter().map(|(k, v)| (k.to_string(), v)));
    }
}

/// Derive calendar features (evaluated in UTC).
///
/// # Errors
/// Returns `ValidationError::DischargeBeforeAdmission` when the encounter
/// ends before it starts.
pub fn temporal_features(
    admission: DateTime<Utc>,
    discharge: DateTime<Utc>,
) -> Result<TemporalFeatures, ValidationError> {
    if discharge < admission {
        return Err(ValidationError::DischargeBeforeAdmission {
            admission,
            discharge,
        });
    }

    let admission_dow = admission.weekday().num_days_from_sunday();
    let discharge_dow = discharge.weekday().num_days_from_sunday();
    let is_weekend = |dow: u32| dow == 0 || dow == 6;

    Ok(TemporalFeatures {
        admission_day_of_week: admission_dow,
        admission_month: admission.month(),
        admission_hour: admission.hour(),
        discharge_day_of_week: discharge_dow,
        discharge_month: discharge.month(),
        discharge_hour: discharge.hour(),
        is_weekend_admission: is_weekend(admission_dow),
        is_weekend_discharge: is_weekend(discharge_dow),
    })
}

/// Parse a `"low-high"` reference range into two finite bounds.
#[must_use]
pub fn parse_reference_range(range: &str) -> Option<(f64, f64)> {
    let caps = reference_range_pattern().captures(range)?;
    let low: f64 = caps.get(1)?.as_str().parse().ok()?;
    let high: f64 = caps.get(2)?.as_str().parse().ok()?;
    (low.is_finite() && high.is_finite()).then_some((low, high))
}

/// Min-max normalize a lab value against its reference range.
///
/// Values outside the range map outside [0, 1]. An unparseable or degenerate
/// range falls back to the abnormal flag.
#[must_use]
pub fn normalize_lab(lab: &LabResult) -> f64 {
    match parse_reference_range(&lab.reference_range) {
        Some((low, high)) if high != low => (lab.value - low) / (high - low),
        _ => {
            tracing::debug!(
                test = %lab.test_name,
                range = %lab.reference_range,
                "Unusable reference range, using abnormal flag"
            );
            flag(lab.abnormal)
        }
    }
}

/// Medication count plus extra weight for every high-risk token matched.
///
/// A medication matching several tokens is counted once per token.
pub fn medication_complexity<I, S>(medications: I) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut count = 0u32;
    let mut high_risk_matches = 0u32;
    for med in medications {
        count += 1;
        let lowered = med.as_ref().to_lowercase();
        high_risk_matches += HIGH_RISK_MEDICATIONS
            .iter()
            .filter(|token| lowered.contains(*token))
            .count() as u32;
    }
    count + HIGH_RISK_MEDICATION_WEIGHT * high_risk_matches
}

/// Age bucket: <30 -> 0, 30-49 -> 1, 50-69 -> 2, >=70 -> 3.
#[must_use]
pub fn age_group(age: u32) -> u32 {
    AGE_GROUP_BOUNDS.iter().take_while(|&&bound| age >= bound).count() as u32
}

/// Count of social barriers present (0-4).
#[must_use]
pub fn social_risk_score(social: &SocialFactors) -> u32 {
    [
        !social.transportation_access,
        social.language_barrier,
        social.living_situation == "Alone",
        social.support_system == "None",
    ]
    .into_iter()
    .filter(|&present| present)
    .count() as u32
}

fn categorical_features(record: &PatientRecord, out: &mut BTreeMap<String, f64>) {
    out.insert(
        names::GENDER_MALE.to_string(),
        flag(record.gender == Gender::Male),
    );

    for (name, label) in INSURANCE_TYPES {
        out.insert(name.to_string(), flag(record.insurance_type == label));
    }

    out.insert(
        names::EMERGENCY_ADMISSION.to_string(),
        flag(record.emergency_admission),
    );

    let mut known_disposition = false;
    for (name, label) in DISCHARGE_DISPOSITIONS {
        let matched = record.discharge_disposition == label;
        known_disposition |= matched;
        out.insert(name.to_string(), flag(matched));
    }
    out.insert(names::DISCHARGE_OTHER.to_string(), flag(!known_disposition));
}

/// Stateless feature extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Convert one record into its feature map.
    ///
    /// # Errors
    /// Returns a `ValidationError` when the record fails validation; nothing
    /// is extracted from an invalid record.
    pub fn extract(&self, record: &PatientRecord) -> Result<FeatureMap, ValidationError> {
        record.validate()?;

        let temporal = temporal_features(record.admission_date, record.discharge_date)?;
        let vitals = &record.vital_signs;
        let mut out = BTreeMap::new();

        let scalars = [
            (names::AGE, f64::from(record.age)),
            (names::AGE_GROUP, f64::from(age_group(record.age))),
            (names::LENGTH_OF_STAY, f64::from(record.length_of_stay())),
            (
                names::CHARLSON_COMORBIDITY_INDEX,
                f64::from(charlson_index(&record.comorbidities)),
            ),
            (
                names::PREVIOUS_ADMISSIONS,
                f64::from(record.previous_admissions),
            ),
            (
                names::MEDICATION_COMPLEXITY,
                f64::from(medication_complexity(&record.medications)),
            ),
            (names::NUM_PROCEDURES, record.procedures.len() as f64),
            (
                names::NUM_DIAGNOSES,
                (record.secondary_diagnoses.len() + 1) as f64,
            ),
            (names::SYSTOLIC_BP, vitals.systolic_bp),
            (names::DIASTOLIC_BP, vitals.diastolic_bp),
            (names::HEART_RATE, vitals.heart_rate),
            (names::TEMPERATURE, vitals.temperature),
            (names::RESPIRATORY_RATE, vitals.respiratory_rate),
            (names::OXYGEN_SATURATION, vitals.oxygen_saturation),
            (
                names::SOCIAL_RISK_SCORE,
                f64::from(social_risk_score(&record.social_factors)),
            ),
        ];
        out.extend(scalars.into_iter().map(|(k, v)| (k.to_string(), v)));

        temporal.write_to(&mut out);
        categorical_features(record, &mut out);

        // Later results for the same test name replace earlier ones.
        for lab in &record.lab_results {
            out.insert(lab_key(&lab.test_name), normalize_lab(lab));
        }

        tracing::debug!(
            features = out.len(),
            labs = record.lab_results.len(),
            "Extracted feature map"
        );

        Ok(FeatureMap::from(out))
    }
}

/// Convenience wrapper around [`FeatureExtractor::extract`].
///
/// # Errors
/// See [`FeatureExtractor::extract`].
pub fn extract_features(record: &PatientRecord) -> Result<FeatureMap, ValidationError> {
    FeatureExtractor::new().extract(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn lab(range: &str, value: f64, abnormal: bool) -> LabResult {
        LabResult {
            test_name: "Creatinine".into(),
            value,
            unit: "mg/dL".into(),
            reference_range: range.into(),
            abnormal,
        }
    }

    #[test]
    fn test_charlson_index_sums_known_weights() {
        let tags = [
            "myocardial_infarction",
            "diabetes",
            "chronic_pulmonary_disease",
            "renal_disease",
        ];
        assert_eq!(charlson_index(tags), 5);
    }

    #[test]
    fn test_charlson_index_normalizes_tags() {
        assert_eq!(charlson_index(["Metastatic Carcinoma"]), 6);
        assert_eq!(charlson_index(["Renal\tDisease"]), 2);
    }

    #[test]
    fn test_charlson_index_ignores_unknown_tags() {
        assert_eq!(charlson_index(["gout", "aids"]), 6);
        assert_eq!(charlson_index(Vec::<String>::new()), 0);
    }

    #[test]
    fn test_temporal_features_weekend_flags() {
        // 2024-01-13 is a Saturday, 2024-01-15 a Monday.
        let admission = Utc.with_ymd_and_hms(2024, 1, 13, 22, 15, 0).unwrap();
        let discharge = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let t = temporal_features(admission, discharge).expect("Valid ordering");

        assert_eq!(t.admission_day_of_week, 6);
        assert_eq!(t.admission_hour, 22);
        assert_eq!(t.admission_month, 1);
        assert!(t.is_weekend_admission);
        assert_eq!(t.discharge_day_of_week, 1);
        assert!(!t.is_weekend_discharge);
    }

    #[test]
    fn test_temporal_features_reject_reversed_dates() {
        let admission = Utc.with_ymd_and_hms(2024, 2, 10, 8, 0, 0).unwrap();
        let discharge = Utc.with_ymd_and_hms(2024, 2, 9, 8, 0, 0).unwrap();
        assert!(matches!(
            temporal_features(admission, discharge),
            Err(ValidationError::DischargeBeforeAdmission { .. })
        ));
    }

    #[test]
    fn test_same_instant_admission_and_discharge_is_valid() {
        let at = Utc.with_ymd_and_hms(2024, 2, 10, 8, 0, 0).unwrap();
        assert!(temporal_features(at, at).is_ok());
    }

    #[test]
    fn test_normalize_lab_within_and_outside_range() {
        assert!((normalize_lab(&lab("0.6-1.2", 0.9, false)) - 0.5).abs() < 1e-12);
        assert!((normalize_lab(&lab("0.6-1.2", 1.8, true)) - 2.0).abs() < 1e-12);
        assert!(normalize_lab(&lab("0-100", -10.0, true)) < 0.0);
    }

    #[test]
    fn test_normalize_lab_falls_back_to_abnormal_flag() {
        assert_eq!(normalize_lab(&lab("<200", 240.0, true)), 1.0);
        assert_eq!(normalize_lab(&lab("negative", 0.0, false)), 0.0);
        assert_eq!(normalize_lab(&lab("1-2-3", 2.5, true)), 1.0);
        assert_eq!(normalize_lab(&lab("5-5", 5.0, false)), 0.0);
    }

    #[test]
    fn test_parse_reference_range_variants() {
        assert_eq!(parse_reference_range("4.0-5.6"), Some((4.0, 5.6)));
        assert_eq!(parse_reference_range(" 0 - 0.04 "), Some((0.0, 0.04)));
        assert_eq!(parse_reference_range("-5-5"), Some((-5.0, 5.0)));
        assert_eq!(parse_reference_range("abc-def"), None);
        assert_eq!(parse_reference_range(""), None);
    }

    #[test]
    fn test_medication_complexity_counts_per_token() {
        assert_eq!(medication_complexity(["Metoprolol", "Aspirin"]), 2);
        assert_eq!(medication_complexity(["Warfarin 5mg", "Insulin glargine"]), 6);
        // One medication name containing two tokens is counted twice.
        assert_eq!(medication_complexity(["warfarin/digoxin"]), 5);
        assert_eq!(medication_complexity(Vec::<&str>::new()), 0);
    }

    #[test]
    fn test_age_group_boundaries() {
        assert_eq!(age_group(0), 0);
        assert_eq!(age_group(29), 0);
        assert_eq!(age_group(30), 1);
        assert_eq!(age_group(49), 1);
        assert_eq!(age_group(50), 2);
        assert_eq!(age_group(69), 2);
        assert_eq!(age_group(70), 3);
        assert_eq!(age_group(101), 3);
    }

    #[test]
    fn test_social_risk_score_counts_barriers() {
        let mut social = SocialFactors {
            marital_status: "Widowed".into(),
            living_situation: "Alone".into(),
            support_system: "None".into(),
            transportation_access: false,
            language_barrier: true,
        };
        assert_eq!(social_risk_score(&social), 4);

        social.support_system = "none".into();
        social.transportation_access = true;
        assert_eq!(social_risk_score(&social), 2);
    }
}
