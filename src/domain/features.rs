//! Flat numeric feature maps.
//!
//! A `FeatureMap` is the interchange format between extraction and scoring.
//! Scorers only depend on the feature names in [`names`], never on how the
//! values were derived.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Feature names in the fixed vocabulary.
pub mod names {
    pub const AGE: &str = "age";
    pub const AGE_GROUP: &str = "age_group";

    pub const LENGTH_OF_STAY: &str = "length_of_stay";
    pub const CHARLSON_COMORBIDITY_INDEX: &str = "charlson_comorbidity_index";
    pub const PREVIOUS_ADMISSIONS: &str = "previous_admissions";
    pub const MEDICATION_COMPLEXITY: &str = "medication_complexity";
    pub const NUM_PROCEDURES: &str = "num_procedures";
    pub const NUM_DIAGNOSES: &str = "num_diagnoses";

    pub const SYSTOLIC_BP: &str = "systolic_bp";
    pub const DIASTOLIC_BP: &str = "diastolic_bp";
    pub const HEART_RATE: &str = "heart_rate";
    pub const TEMPERATURE: &str = "temperature";
    pub const RESPIRATORY_RATE: &str = "respiratory_rate";
    pub const OXYGEN_SATURATION: &str = "oxygen_saturation";

    pub const SOCIAL_RISK_SCORE: &str = "social_risk_score";

    pub const ADMISSION_DAY_OF_WEEK: &str = "admission_day_of_week";
    pub const ADMISSION_MONTH: &str = "admission_month";
    pub const ADMISSION_HOUR: &str = "admission_hour";
    pub const DISCHARGE_DAY_OF_WEEK: &str = "discharge_day_of_week";
    pub const DISCHARGE_MONTH: &str = "discharge_month";
    pub const DISCHARGE_HOUR: &str = "discharge_hour";
    pub const IS_WEEKEND_ADMISSION: &str = "is_weekend_admission";
    pub const IS_WEEKEND_DISCHARGE: &str = "is_weekend_discharge";

    pub const GENDER_MALE: &str = "gender_male";
    pub const INSURANCE_MEDICARE: &str = "insurance_medicare";
    pub const INSURANCE_MEDICAID: &str = "insurance_medicaid";
    pub const INSURANCE_PRIVATE: &str = "insurance_private";
    pub const INSURANCE_UNINSURED: &str = "insurance_uninsured";
    pub const EMERGENCY_ADMISSION: &str = "emergency_admission";
    pub const DISCHARGE_HOME: &str = "discharge_home";
    pub const DISCHARGE_SNF: &str = "discharge_snf";
    pub const DISCHARGE_REHAB: &str = "discharge_rehab";
    pub const DISCHARGE_OTHER: &str = "discharge_other";

    /// Prefix reserving a separate namespace for lab-derived features.
    pub const LAB_PREFIX: &str = "lab:";
}

/// Key under which a normalized lab value is stored.
#[must_use]
pub fn lab_key(test_name: &str) -> String {
    format!("{}{test_name}", names::LAB_PREFIX)
}

/// Immutable mapping from feature name to numeric value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMap(BTreeMap<String, f64>);

impl FeatureMap {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of features carrying a finite value.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.0.values().filter(|v| v.is_finite()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Lab-derived features with the namespace prefix stripped.
    pub fn labs(&self) -> impl Iterator<Item = (&str, f64)> {
        self.iter()
            .filter_map(|(k, v)| k.strip_prefix(names::LAB_PREFIX).map(|name| (name, v)))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FeatureMap {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<BTreeMap<String, f64>> for FeatureMap {
    fn from(map: BTreeMap<String, f64>) -> Self {
        Self(map)
    }
}
