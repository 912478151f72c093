//! Cross-cutting checks applied after the drug has been chosen.
//!
//! Every rule in `SECONDARY_RULES` is evaluated, in order, regardless of which
//! primary rule matched. A rule that fires appends its warnings and
//! precautions after everything already collected.

use crate::flags::ClinicalFlags;
use crate::rule::{Assessment, Findings, SecondaryRule};

pub const ELDERLY_AGE: u32 = 70;
pub const PEDIATRIC_AGE: u32 = 12;

/// Creatinine (mg/dL) above which kidney monitoring is advised. Lower than
/// the impairment threshold used by `ClinicalFlags`; both checks may fire.
pub const CREATININE_MONITORING: f64 = 1.3;

/// Blood glucose (mg/dL) above which diabetes management needs review.
pub const HYPERGLYCEMIA_BLOOD_SUGAR: f64 = 180.0;

/// Ordered secondary rules. All are evaluated.
pub const SECONDARY_RULES: &[SecondaryRule] = &[
    SecondaryRule {
        id: "elderly",
        description: "Patients over 70 start at the lowest effective dose",
        check: elderly,
    },
    SecondaryRule {
        id: "pediatric",
        description: "Patients under 12 need weight-adjusted dosing",
        check: pediatric,
    },
    SecondaryRule {
        id: "creatinine_monitoring",
        description: "Elevated creatinine requires kidney function monitoring",
        check: creatinine_monitoring,
    },
    SecondaryRule {
        id: "diabetes",
        description: "Diabetic patients monitor blood sugar; hyperglycemia needs review",
        check: diabetes,
    },
    SecondaryRule {
        id: "anticoagulant",
        description: "Patients on blood thinners must avoid NSAIDs and Aspirin",
        check: anticoagulant,
    },
    SecondaryRule {
        id: "metformin_kidney",
        description: "Metformin with impaired kidneys needs immediate review",
        check: metformin_kidney,
    },
];

fn elderly(a: &Assessment<'_>) -> Findings {
    if a.patient.age > ELDERLY_AGE {
        Findings::none()
            .warning("Elderly patient - increased risk of side effects and drug interactions")
            .precaution("Start with lowest effective dose")
    } else {
        Findings::none()
    }
}

fn pediatric(a: &Assessment<'_>) -> Findings {
    if a.patient.age < PEDIATRIC_AGE {
        Findings::none()
            .warning("Pediatric patient - dosage must be weight-adjusted")
            .precaution("Consult pediatrician for exact dosing")
    } else {
        Findings::none()
    }
}

fn creatinine_monitoring(a: &Assessment<'_>) -> Findings {
    match a.patient.creatinine {
        Some(c) if c > CREATININE_MONITORING => Findings::none()
            .warning("Elevated creatinine - kidney function monitoring required")
            .precaution("Regular kidney function tests advised"),
        _ => Findings::none(),
    }
}

fn diabetes(a: &Assessment<'_>) -> Findings {
    let ClinicalFlags { diabetes, .. } = a.flags;
    if !diabetes {
        return Findings::none();
    }

    let findings = Findings::none().precaution("Monitor blood sugar levels regularly");
    match a.patient.blood_sugar {
        Some(bs) if bs > HYPERGLYCEMIA_BLOOD_SUGAR => {
            findings.warning("High blood sugar detected - review diabetes management")
        }
        _ => findings,
    }
}

fn anticoagulant(a: &Assessment<'_>) -> Findings {
    if a.patient.takes("warfarin") || a.patient.takes("blood thinner") {
        Findings::none()
            .warning("CRITICAL: Patient on blood thinners - avoid NSAIDs and Aspirin")
    } else {
        Findings::none()
    }
}

fn metformin_kidney(a: &Assessment<'_>) -> Findings {
    if a.patient.takes("metformin") && a.flags.kidney_issue {
        Findings::none().warning("Metformin + kidney disease - review with doctor immediately")
    } else {
        Findings::none()
    }
}
