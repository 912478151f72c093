//! Decoding of the intake form into `PatientData`.
//!
//! The browser posts `application/x-www-form-urlencoded` pairs. Multi-select
//! fields (`symptoms`, `conditions`) arrive as repeated keys. Decoding never
//! fails: blank or malformed numbers become "absent" (or 0 for age) and
//! unrecognized symptom/condition names are dropped with a warning.

use rxrules_contracts::patient::{lenient_age, lenient_decimal, PatientData};
use tracing::warn;

/// Form field names, shared with the rendered form.
pub mod field {
    pub const AGE: &str = "age";
    pub const GENDER: &str = "gender";
    pub const WEIGHT: &str = "weight";
    pub const SYMPTOMS: &str = "symptoms";
    pub const CONDITIONS: &str = "conditions";
    pub const ALLERGIES: &str = "allergies";
    pub const CURRENT_MEDS: &str = "current_meds";
    pub const BLOOD_SUGAR: &str = "blood_sugar";
    pub const CREATININE: &str = "creatinine";
    pub const BLOOD_PRESSURE: &str = "blood_pressure";
    pub const HEMOGLOBIN: &str = "hemoglobin";
}

/// Build a `PatientData` from decoded form pairs.
///
/// For single-valued fields the first occurrence wins.
pub fn decode_patient(pairs: &[(String, String)]) -> PatientData {
    let text = |name: &str| first(pairs, name).map(str::trim).unwrap_or_default().to_string();
    let optional_text = |name: &str| {
        first(pairs, name)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let mut patient = PatientData {
        age: lenient_age(first(pairs, field::AGE)),
        allergies: text(field::ALLERGIES),
        current_meds: text(field::CURRENT_MEDS),
        creatinine: lenient_decimal(first(pairs, field::CREATININE)),
        blood_sugar: lenient_decimal(first(pairs, field::BLOOD_SUGAR)),
        gender: optional_text(field::GENDER),
        weight_kg: lenient_decimal(first(pairs, field::WEIGHT)),
        blood_pressure: optional_text(field::BLOOD_PRESSURE),
        hemoglobin: lenient_decimal(first(pairs, field::HEMOGLOBIN)),
        ..PatientData::default()
    };

    for name in all(pairs, field::SYMPTOMS) {
        match name.parse() {
            Ok(symptom) => {
                patient.symptoms.insert(symptom);
            }
            Err(e) => warn!(error = %e, "discarding unrecognized symptom"),
        }
    }
    for name in all(pairs, field::CONDITIONS) {
        match name.parse() {
            Ok(condition) => {
                patient.conditions.insert(condition);
            }
            Err(e) => warn!(error = %e, "discarding unrecognized condition"),
        }
    }

    patient
}

fn first<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

/// Every non-blank value submitted under `name`, in submission order.
fn all<'a>(pairs: &'a [(String, String)], name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    pairs
        .iter()
        .filter(move |(k, _)| k == name)
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty())
}
