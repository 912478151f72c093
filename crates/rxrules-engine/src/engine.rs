//! Recommendation engine.
//!
//! Evaluation algorithm:
//!
//! 1. Derive `ClinicalFlags`; keep any derivation-time warnings.
//! 2. Walk `PRIMARY_RULES` in declaration order. The first rule whose symptom
//!    the patient reports prescribes the treatment. No match → consultation
//!    directive.
//! 3. Evaluate every rule in `SECONDARY_RULES`, appending the findings of
//!    each one that fires.
//!
//! Warnings and precautions keep that order: derivation, primary, secondary.

use tracing::debug;

use rxrules_contracts::patient::PatientData;
use rxrules_contracts::recommendation::Recommendation;

use crate::flags::ClinicalFlags;
use crate::primary::{consultation, PRIMARY_RULES};
use crate::rule::{Assessment, Treatment};
use crate::secondary::SECONDARY_RULES;

/// Trace entry recorded when flag derivation itself raised warnings.
pub const DERIVATION_TRACE_ID: &str = "derivation";

/// Anything that turns a patient record into a recommendation.
///
/// The HTTP layer holds an `Arc<dyn Recommender>` so handlers can be driven
/// by a fixed stub in tests.
pub trait Recommender: Send + Sync {
    /// Must not fail and must not depend on anything but `patient`.
    fn recommend(&self, patient: &PatientData) -> Recommendation;
}

/// The built-in rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl Recommender for RuleEngine {
    fn recommend(&self, patient: &PatientData) -> Recommendation {
        recommend(patient)
    }
}

/// A recommendation together with the rules that shaped it.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub recommendation: Recommendation,
    /// Rule identifiers in contribution order: `derivation` (if it warned),
    /// the primary branch, then each secondary rule that fired.
    pub trace: Vec<&'static str>,
}

/// Evaluate `patient` against the rule set.
pub fn recommend(patient: &PatientData) -> Recommendation {
    evaluate(patient).recommendation
}

/// Evaluate `patient` and report which rules contributed.
pub fn evaluate(patient: &PatientData) -> Evaluation {
    let mut trace = Vec::new();
    let mut warnings = Vec::new();
    let mut precautions = Vec::new();

    let (flags, derived) = ClinicalFlags::derive(patient);
    debug!(
        kidney_issue = flags.kidney_issue,
        liver_issue = flags.liver_issue,
        diabetes = flags.diabetes,
        "derived clinical flags"
    );
    if !derived.is_empty() {
        trace.push(DERIVATION_TRACE_ID);
        derived.append_to(&mut warnings, &mut precautions);
    }

    let assessment = Assessment { patient, flags };

    let Treatment {
        branch,
        drug_name,
        dosage,
        alternatives,
        reason,
        disposition,
        findings,
    } = select_primary(&assessment);
    trace.push(branch);
    findings.append_to(&mut warnings, &mut precautions);

    for rule in SECONDARY_RULES {
        let findings = (rule.check)(&assessment);
        if findings.is_empty() {
            continue;
        }
        debug!(rule_id = rule.id, "secondary rule fired");
        trace.push(rule.id);
        findings.append_to(&mut warnings, &mut precautions);
    }

    Evaluation {
        recommendation: Recommendation {
            drug_name,
            dosage,
            alternatives,
            warnings,
            reason,
            precautions,
            disposition,
        },
        trace,
    }
}

fn select_primary(assessment: &Assessment<'_>) -> Treatment {
    for rule in PRIMARY_RULES {
        if !rule.matches(assessment.patient) {
            continue;
        }
        let treatment = (rule.prescribe)(assessment);
        debug!(rule_id = rule.id, branch = treatment.branch, "primary rule matched");
        return treatment;
    }

    debug!("no primary rule matched; recommending consultation");
    consultation()
}
