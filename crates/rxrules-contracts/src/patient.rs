//! Patient intake types.
//!
//! `PatientData` is the read-only record the engine evaluates. Symptoms and
//! conditions are closed enums; anything the boundary cannot recognize is
//! dropped before it reaches the engine, so an intake with only unknown
//! symptoms simply falls through to the consultation branch.

use std::collections::BTreeSet;
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RxError;

/// A presenting symptom recognized by the rule set.
///
/// Declaration order is not the rule priority; priority lives in the engine's
/// primary rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    Fever,
    JointPain,
    Headache,
    Cough,
    Nausea,
    ChestPain,
    Dizziness,
}

impl Symptom {
    pub const ALL: [Symptom; 7] = [
        Symptom::Fever,
        Symptom::JointPain,
        Symptom::Headache,
        Symptom::Cough,
        Symptom::Nausea,
        Symptom::ChestPain,
        Symptom::Dizziness,
    ];

    /// Wire name, as submitted by the intake form.
    pub fn as_str(self) -> &'static str {
        match self {
            Symptom::Fever => "fever",
            Symptom::JointPain => "joint_pain",
            Symptom::Headache => "headache",
            Symptom::Cough => "cough",
            Symptom::Nausea => "nausea",
            Symptom::ChestPain => "chest_pain",
            Symptom::Dizziness => "dizziness",
        }
    }

    /// Human-readable label for rendered pages.
    pub fn label(self) -> &'static str {
        match self {
            Symptom::Fever => "Fever",
            Symptom::JointPain => "Joint pain",
            Symptom::Headache => "Headache",
            Symptom::Cough => "Cough",
            Symptom::Nausea => "Nausea",
            Symptom::ChestPain => "Chest pain",
            Symptom::Dizziness => "Dizziness",
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symptom {
    type Err = RxError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Symptom::ALL
            .into_iter()
            .find(|symptom| symptom.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| RxError::UnknownSymptom {
                name: needle.to_string(),
            })
    }
}

/// A pre-existing condition that modifies drug selection or adds warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    KidneyDisease,
    LiverDisease,
    Diabetes,
    Asthma,
    Hypertension,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::KidneyDisease,
        Condition::LiverDisease,
        Condition::Diabetes,
        Condition::Asthma,
        Condition::Hypertension,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Condition::KidneyDisease => "kidney_disease",
            Condition::LiverDisease => "liver_disease",
            Condition::Diabetes => "diabetes",
            Condition::Asthma => "asthma",
            Condition::Hypertension => "hypertension",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Condition::KidneyDisease => "Kidney disease",
            Condition::LiverDisease => "Liver disease",
            Condition::Diabetes => "Diabetes",
            Condition::Asthma => "Asthma",
            Condition::Hypertension => "Hypertension",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = RxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Condition::ALL
            .into_iter()
            .find(|condition| condition.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| RxError::UnknownCondition {
                name: needle.to_string(),
            })
    }
}

/// Everything the engine knows about one patient.
///
/// Only `age`, `symptoms`, `conditions`, `allergies`, `current_meds`,
/// `creatinine` and `blood_sugar` are consulted by rules. The remaining
/// fields are carried so the result page can echo the full intake.
///
/// Every field has a default, so a partial JSON body deserializes. Numeric
/// fields accept numbers, numeric strings, or `null`; anything else is
/// treated the same way the form treats a malformed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientData {
    /// Age in whole years. Missing or malformed input is recorded as 0.
    #[serde(deserialize_with = "lenient_age_field")]
    pub age: u32,

    #[serde(deserialize_with = "lenient_set")]
    pub symptoms: BTreeSet<Symptom>,

    #[serde(deserialize_with = "lenient_set")]
    pub conditions: BTreeSet<Condition>,

    /// Free-text allergy list, e.g. "Aspirin, penicillin".
    pub allergies: String,

    /// Free-text list of current medications, e.g. "Warfarin 5mg daily".
    pub current_meds: String,

    /// Serum creatinine in mg/dL.
    #[serde(deserialize_with = "lenient_decimal_field")]
    pub creatinine: Option<f64>,

    /// Fasting blood glucose in mg/dL.
    #[serde(deserialize_with = "lenient_decimal_field")]
    pub blood_sugar: Option<f64>,

    pub gender: Option<String>,
    #[serde(deserialize_with = "lenient_decimal_field")]
    pub weight_kg: Option<f64>,
    /// Free text as entered, e.g. "120/80".
    pub blood_pressure: Option<String>,
    /// g/dL.
    #[serde(deserialize_with = "lenient_decimal_field")]
    pub hemoglobin: Option<f64>,
}

impl PatientData {
    pub fn has_symptom(&self, symptom: Symptom) -> bool {
        self.symptoms.contains(&symptom)
    }

    pub fn has_condition(&self, condition: Condition) -> bool {
        self.conditions.contains(&condition)
    }

    /// Case-insensitive substring match against the allergy text.
    pub fn allergic_to(&self, needle: &str) -> bool {
        contains_ignore_case(&self.allergies, needle)
    }

    /// Case-insensitive substring match against the medication text.
    pub fn takes(&self, needle: &str) -> bool {
        contains_ignore_case(&self.current_meds, needle)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Interpret raw text as an age. Blank, negative, fractional or otherwise
/// malformed input yields 0. Digit strings too large for `u32` saturate to
/// `u32::MAX` so they stay on the elderly side of every age rule.
pub fn lenient_age(raw: Option<&str>) -> u32 {
    let Some(text) = raw.map(str::trim) else {
        return 0;
    };
    match text.parse::<u32>() {
        Ok(age) => age,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => u32::MAX,
        Err(_) => 0,
    }
}

/// Interpret raw text as a decimal lab value. Blank, malformed, or non-finite
/// input yields `None`, which means "not measured" to every rule.
pub fn lenient_decimal(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Deserialize a list of names into a set, silently dropping names that do
/// not parse.
fn lenient_set<'de, D, T>(deserializer: D) -> Result<BTreeSet<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Ord,
{
    let names: Vec<String> = Vec::deserialize(deserializer)?;
    Ok(names.iter().filter_map(|n| n.parse().ok()).collect())
}

/// A numeric field as it may arrive in a JSON body.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl RawNumber {
    fn into_age(self) -> u32 {
        match self {
            RawNumber::Unsigned(n) => u32::try_from(n).unwrap_or(u32::MAX),
            RawNumber::Signed(n) if n < 0 => 0,
            RawNumber::Signed(n) => u32::try_from(n).unwrap_or(u32::MAX),
            RawNumber::Float(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => {
                if f >= f64::from(u32::MAX) {
                    u32::MAX
                } else {
                    f as u32
                }
            }
            RawNumber::Float(_) | RawNumber::Other(_) => 0,
            RawNumber::Text(text) => lenient_age(Some(&text)),
        }
    }

    fn into_decimal(self) -> Option<f64> {
        match self {
            RawNumber::Unsigned(n) => Some(n as f64),
            RawNumber::Signed(n) => Some(n as f64),
            RawNumber::Float(f) => Some(f).filter(|v| v.is_finite()),
            RawNumber::Text(text) => lenient_decimal(Some(&text)),
            RawNumber::Other(_) => None,
        }
    }
}

/// Deserialize an age the way [`lenient_age`] reads form text: never fails.
fn lenient_age_field<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawNumber> = Option::deserialize(deserializer)?;
    Ok(raw.map_or(0, RawNumber::into_age))
}

/// Deserialize a lab value the way [`lenient_decimal`] reads form text.
fn lenient_decimal_field<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawNumber> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(RawNumber::into_decimal))
}
