//! Recommendation output types.
//!
//! A `Recommendation` is built fresh for every call and never mutated once
//! returned. `warnings` and `precautions` are append-only during evaluation:
//! entries keep the order in which rules produced them.

use serde::{Deserialize, Serialize};

/// Marker used as `drug_name` when the patient must be seen urgently.
pub const EMERGENCY_MARKER: &str = "EMERGENCY CONSULTATION REQUIRED";

/// Marker used as `drug_name` when no symptom rule applies.
pub const CONSULTATION_MARKER: &str = "Detailed Consultation Required";

/// Dosage text for the emergency directive.
pub const DO_NOT_SELF_MEDICATE: &str = "DO NOT SELF-MEDICATE";

/// Dosage text when no drug is suggested.
pub const NOT_APPLICABLE: &str = "N/A";

/// What kind of advice the recommendation represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// A drug suggestion the patient may act on.
    Medication,
    /// Seek emergency care; `drug_name` is `EMERGENCY_MARKER`.
    Emergency,
    /// Book a physician visit; `drug_name` is `CONSULTATION_MARKER`.
    Consultation,
}

/// The engine's answer for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Suggested drug, or one of the directive markers.
    pub drug_name: String,
    /// Free-text dosing instructions.
    pub dosage: String,
    /// Ordered alternatives; empty for directives.
    pub alternatives: Vec<String>,
    /// Accumulated across derivation, the primary rule, and secondary rules.
    pub warnings: Vec<String>,
    /// Rationale for `drug_name`.
    pub reason: String,
    /// Accumulated across the primary rule and secondary rules.
    pub precautions: Vec<String>,
    pub disposition: Disposition,
}

impl Recommendation {
    /// True when the patient can act on `drug_name` without seeing anyone first.
    pub fn is_self_medication(&self) -> bool {
        self.disposition == Disposition::Medication
    }
}
