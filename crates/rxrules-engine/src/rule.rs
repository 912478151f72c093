//! Rule types shared by the primary and secondary rule tables.
//!
//! A `PrimaryRule` maps one symptom to a `Treatment`. Primary rules are tried
//! in table order and the first whose symptom is present wins. A
//! `SecondaryRule` never chooses a drug; it only contributes `Findings`
//! (extra warnings and precautions), and every secondary rule is evaluated.

use std::fmt;

use rxrules_contracts::patient::{PatientData, Symptom};
use rxrules_contracts::recommendation::Disposition;

use crate::flags::ClinicalFlags;

/// The inputs every rule sees: the raw patient record plus derived flags.
#[derive(Debug, Clone, Copy)]
pub struct Assessment<'a> {
    pub patient: &'a PatientData,
    pub flags: ClinicalFlags,
}

/// Warnings and precautions contributed by a single rule, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub warnings: Vec<String>,
    pub precautions: Vec<String>,
}

impl Findings {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn warning(mut self, text: impl Into<String>) -> Self {
        self.warnings.push(text.into());
        self
    }

    pub fn precaution(mut self, text: impl Into<String>) -> Self {
        self.precautions.push(text.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.precautions.is_empty()
    }

    /// Append this rule's entries to the running lists, preserving order.
    pub(crate) fn append_to(self, warnings: &mut Vec<String>, precautions: &mut Vec<String>) {
        warnings.extend(self.warnings);
        precautions.extend(self.precautions);
    }
}

/// The outcome of a primary rule: drug choice plus the rule's own findings.
#[derive(Debug, Clone, PartialEq)]
pub struct Treatment {
    /// Identifier of the branch that produced this treatment, e.g.
    /// `"fever.kidney"`. Appears in the evaluation trace.
    pub branch: &'static str,
    pub drug_name: String,
    pub dosage: String,
    pub alternatives: Vec<String>,
    pub reason: String,
    pub disposition: Disposition,
    pub findings: Findings,
}

impl Treatment {
    /// Start a drug suggestion.
    pub fn medication(branch: &'static str, drug_name: &str, dosage: &str) -> Self {
        Self::new(branch, drug_name, dosage, Disposition::Medication)
    }

    /// Start a non-drug directive (`Emergency` or `Consultation`).
    pub fn directive(
        branch: &'static str,
        marker: &str,
        dosage: &str,
        disposition: Disposition,
    ) -> Self {
        Self::new(branch, marker, dosage, disposition)
    }

    fn new(branch: &'static str, drug_name: &str, dosage: &str, disposition: Disposition) -> Self {
        Self {
            branch,
            drug_name: drug_name.to_string(),
            dosage: dosage.to_string(),
            alternatives: Vec::new(),
            reason: String::new(),
            disposition,
            findings: Findings::none(),
        }
    }

    pub fn alternatives<const N: usize>(mut self, alternatives: [&str; N]) -> Self {
        self.alternatives = alternatives.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn reason(mut self, reason: &str) -> Self {
        self.reason = reason.to_string();
        self
    }

    pub fn warning(mut self, text: &str) -> Self {
        self.findings = self.findings.warning(text);
        self
    }

    pub fn precaution(mut self, text: &str) -> Self {
        self.findings = self.findings.precaution(text);
        self
    }
}

/// A symptom-keyed rule that selects the drug.
#[derive(Clone, Copy)]
pub struct PrimaryRule {
    /// Stable identifier used in logs and the evaluation trace.
    pub id: &'static str,
    /// The rule applies when this symptom is present.
    pub symptom: Symptom,
    /// Choose the treatment. Only called once the symptom matched.
    pub prescribe: fn(&Assessment<'_>) -> Treatment,
}

impl fmt::Debug for PrimaryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimaryRule")
            .field("id", &self.id)
            .field("symptom", &self.symptom)
            .finish_non_exhaustive()
    }
}

impl PrimaryRule {
    pub fn matches(&self, patient: &PatientData) -> bool {
        patient.has_symptom(self.symptom)
    }
}

/// A cross-cutting check that may add warnings and precautions.
#[derive(Clone, Copy)]
pub struct SecondaryRule {
    pub id: &'static str,
    pub description: &'static str,
    /// Return the findings for this patient; empty findings mean the rule
    /// did not fire.
    pub check: fn(&Assessment<'_>) -> Findings,
}

impl fmt::Debug for SecondaryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecondaryRule")
            .field("id", &self.id)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
