//! Derived clinical flags.
//!
//! Several primary and secondary rules ask the same questions ("does this
//! patient have impaired kidneys?"). The answers are computed once per call
//! from declared conditions and lab values.

use rxrules_contracts::patient::{Condition, PatientData};

use crate::rule::Findings;

/// Creatinine (mg/dL) above which kidney function is treated as impaired.
pub const KIDNEY_IMPAIRMENT_CREATININE: f64 = 1.5;

/// Blood glucose (mg/dL) above which the patient is treated as diabetic.
pub const DIABETIC_BLOOD_SUGAR: f64 = 126.0;

/// Booleans consumed by more than one rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClinicalFlags {
    pub kidney_issue: bool,
    pub liver_issue: bool,
    pub diabetes: bool,
}

impl ClinicalFlags {
    /// Compute the flags for `patient`.
    ///
    /// Also returns the warnings raised while deriving: an impaired-kidney
    /// warning when the lab value (rather than a declared condition) pushes
    /// creatinine over the threshold. Those warnings precede every rule's
    /// output in the final recommendation.
    pub fn derive(patient: &PatientData) -> (Self, Findings) {
        let mut findings = Findings::none();

        let mut kidney_issue = patient.has_condition(Condition::KidneyDisease);
        if patient
            .creatinine
            .is_some_and(|c| c > KIDNEY_IMPAIRMENT_CREATININE)
        {
            kidney_issue = true;
            findings = findings.warning("Elevated creatinine detected - Kidney function impaired");
        }

        let liver_issue = patient.has_condition(Condition::LiverDisease);

        let diabetes = patient.has_condition(Condition::Diabetes)
            || patient.blood_sugar.is_some_and(|bs| bs > DIABETIC_BLOOD_SUGAR);

        (
            Self {
                kidney_issue,
                liver_issue,
                diabetes,
            },
            findings,
        )
    }
}
