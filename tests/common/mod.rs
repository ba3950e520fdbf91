#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use serde_json::json;

use readmit::adapters::rng::FixedClock;
use readmit::PatientRecord;

pub fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 1, 26, 9, 0, 0).unwrap())
}

pub fn p001() -> PatientRecord {
    serde_json::from_value(json!({
        "id": "P001",
        "age": 78,
        "gender": "F",
        "race": "Caucasian",
        "insurance_type": "Medicare",
        "admission_date": "2024-01-15T08:30:00Z",
        "discharge_date": "2024-01-22T14:00:00Z",
        "length_of_stay": 7,
        "primary_diagnosis": "Acute myocardial infarction",
        "secondary_diagnoses": ["Type 2 diabetes", "Hypertension", "Chronic kidney disease"],
        "procedures": ["Cardiac catheterization", "Percutaneous coronary intervention"],
        "medications": ["Metoprolol", "Lisinopril", "Atorvastatin", "Metformin", "Aspirin", "Clopidogrel"],
        "lab_results": [
            {"test_name": "Troponin I", "value": 15.2, "unit": "ng/mL", "reference_range": "0-0.04", "abnormal": true},
            {"test_name": "Creatinine", "value": 1.8, "unit": "mg/dL", "reference_range": "0.6-1.2", "abnormal": true},
            {"test_name": "HbA1c", "value": 8.5, "unit": "%", "reference_range": "4.0-5.6", "abnormal": true},
            {"test_name": "LDL", "value": 165, "unit": "mg/dL", "reference_range": "0-100", "abnormal": true}
        ],
        "vital_signs": {
            "systolic_bp": 145, "diastolic_bp": 88, "heart_rate": 92,
            "temperature": 98.6, "respiratory_rate": 18, "oxygen_saturation": 94
        },
        "comorbidities": ["myocardial_infarction", "diabetes", "chronic_pulmonary_disease", "renal_disease"],
        "previous_admissions": 3,
        "emergency_admission": true,
        "discharge_disposition": "Home",
        "social_factors": {
            "marital_status": "Widowed", "living_situation": "Alone", "support_system": "Limited",
            "transportation_access": false, "language_barrier": false
        }
    }))
    .expect("P001 fixture")
}

pub fn p002() -> PatientRecord {
    serde_json::from_value(json!({
        "id": "P002",
        "age": 45,
        "gender": "M",
        "race": "African American",
        "insurance_type": "Private",
        "admission_date": "2024-01-18T16:45:00Z",
        "discharge_date": "2024-01-20T10:30:00Z",
        "length_of_stay": 2,
        "primary_diagnosis": "Pneumonia",
        "secondary_diagnoses": ["Asthma"],
        "procedures": ["Chest X-ray", "Blood culture"],
        "medications": ["Azithromycin", "Albuterol", "Prednisone"],
        "lab_results": [
            {"test_name": "WBC", "value": 12.5, "unit": "K/uL", "reference_range": "4.5-11.0", "abnormal": true},
            {"test_name": "Procalcitonin", "value": 2.1, "unit": "ng/mL", "reference_range": "0-0.25", "abnormal": true}
        ],
        "vital_signs": {
            "systolic_bp": 128, "diastolic_bp": 82, "heart_rate": 88,
            "temperature": 101.2, "respiratory_rate": 22, "oxygen_saturation": 96
        },
        "comorbidities": ["chronic_pulmonary_disease"],
        "previous_admissions": 0,
        "emergency_admission": false,
        "discharge_disposition": "Home",
        "social_factors": {
            "marital_status": "Married", "living_situation": "With family", "support_system": "Strong",
            "transportation_access": true, "language_barrier": false
        }
    }))
    .expect("P002 fixture")
}

pub fn p003() -> PatientRecord {
    serde_json::from_value(json!({
        "id": "P003",
        "age": 67,
        "gender": "M",
        "race": "Hispanic",
        "insurance_type": "Medicaid",
        "admission_date": "2024-01-10T22:15:00Z",
        "discharge_date": "2024-01-25T11:30:00Z",
        "length_of_stay": 15,
        "primary_diagnosis": "Congestive heart failure",
        "secondary_diagnoses": ["Atrial fibrillation", "Diabetes with complications", "Depression"],
        "procedures": ["Echocardiogram", "Cardioversion"],
        "medications": ["Furosemide", "Warfarin", "Digoxin", "Insulin", "Sertraline"],
        "lab_results": [
            {"test_name": "BNP", "value": 1250, "unit": "pg/mL", "reference_range": "0-100", "abnormal": true},
            {"test_name": "INR", "value": 2.8, "unit": "", "reference_range": "2.0-3.0", "abnormal": false}
        ],
        "vital_signs": {
            "systolic_bp": 165, "diastolic_bp": 95, "heart_rate": 105,
            "temperature": 98.2, "respiratory_rate": 24, "oxygen_saturation": 89
        },
        "comorbidities": ["congestive_heart_failure", "diabetes_complications", "Peripheral Vascular Disease"],
        "previous_admissions": 5,
        "emergency_admission": true,
        "discharge_disposition": "SNF",
        "social_factors": {
            "marital_status": "Divorced", "living_situation": "Alone", "support_system": "None",
            "transportation_access": false, "language_barrier": true
        }
    }))
    .expect("P003 fixture")
}
