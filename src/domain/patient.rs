//! Patient encounter records.
//!
//! A `PatientRecord` is the immutable input to feature extraction. Field names
//! follow the snake_case record schema used by upstream exporters.

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Reasons a patient record cannot be turned into features.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("discharge {discharge} precedes admission {admission}")]
    DischargeBeforeAdmission {
        admission: DateTime<Utc>,
        discharge: DateTime<Utc>,
    },

    #[error("required field `{0}` is not a finite number")]
    NonFinite(String),

    #[error("record {index} is malformed: {reason}")]
    Malformed { index: usize, reason: String },

    #[error("{} validation errors: {}", .0.len(), join_errors(.0))]
    Multiple(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Keeps string identifiers; any other JSON value reads as a missing id.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => Some(id),
        RawId::Other(_) => None,
    })
}

/// Administrative gender as recorded at admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M", alias = "Male")]
    Male,
    #[serde(rename = "F", alias = "Female")]
    Female,
    #[serde(other)]
    Unspecified,
}

/// A single laboratory result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    pub test_name: String,
    pub value: f64,
    pub unit: String,
    /// Reference interval written as `"low-high"`, e.g. `"0.6-1.2"`.
    pub reference_range: String,
    /// Abnormal flag precomputed by the lab system.
    pub abnormal: bool,
}

/// Vital signs taken closest to discharge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    pub systolic_bp: f64,
    pub diastolic_bp: f64,
    pub heart_rate: f64,
    pub temperature: f64,
    pub respiratory_rate: f64,
    pub oxygen_saturation: f64,
}

impl VitalSigns {
    fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("systolic_bp", self.systolic_bp),
            ("diastolic_bp", self.diastolic_bp),
            ("heart_rate", self.heart_rate),
            ("temperature", self.temperature),
            ("respiratory_rate", self.respiratory_rate),
            ("oxygen_saturation", self.oxygen_saturation),
        ]
    }
}

/// Social determinants collected by case management.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialFactors {
    pub marital_status: String,
    /// e.g. "Alone", "With family", "Assisted living"
    pub living_situation: String,
    /// e.g. "Strong", "Limited", "None"
    pub support_system: String,
    pub transportation_access: bool,
    pub language_barrier: bool,
}

/// One inpatient encounter, as supplied by the record source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Patient identifier. Missing or non-string identifiers are reported
    /// as "unknown".
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub age: u32,
    pub gender: Gender,
    pub race: String,
    /// "Medicare", "Medicaid", "Private" or "Uninsured"
    pub insurance_type: String,
    pub admission_date: DateTime<Utc>,
    pub discharge_date: DateTime<Utc>,
    /// Length of stay in days. Derived from the encounter dates when absent.
    #[serde(default)]
    pub length_of_stay: Option<u32>,
    pub primary_diagnosis: String,
    #[serde(default)]
    pub secondary_diagnoses: Vec<String>,
    #[serde(default)]
    pub procedures: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub lab_results: Vec<LabResult>,
    pub vital_signs: VitalSigns,
    #[serde(default)]
    pub comorbidities: Vec<String>,
    pub previous_admissions: u32,
    pub emergency_admission: bool,
    /// "Home", "SNF", "Rehabilitation" or anything else
    pub discharge_disposition: String,
    pub social_factors: SocialFactors,
}

impl PatientRecord {
    /// Supplied length of stay, or whole days between admission and discharge.
    #[must_use]
    pub fn length_of_stay(&self) -> u32 {
        self.length_of_stay.unwrap_or_else(|| {
            let days = (self.discharge_date - self.admission_date).num_days();
            u32::try_from(days.max(0)).unwrap_or(u32::MAX)
        })
    }

    /// Validate the record before feature extraction.
    ///
    /// Every problem is collected; a single problem is returned as-is and
    /// several are wrapped in [`ValidationError::Multiple`].
    ///
    /// # Errors
    /// Returns the validation failures found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if self.discharge_date < self.admission_date {
            errors.push(ValidationError::DischargeBeforeAdmission {
                admission: self.admission_date,
                discharge: self.discharge_date,
            });
        }

        for (name, value) in self.vital_signs.named() {
            if !value.is_finite() {
                errors.push(ValidationError::NonFinite(format!("vital_signs.{name}")));
            }
        }

        for lab in &self.lab_results {
            if !lab.value.is_finite() {
                errors.push(ValidationError::NonFinite(format!(
                    "lab_results[{}].value",
                    lab.test_name
                )));
            }
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Multiple(errors)),
        }
    }
}
