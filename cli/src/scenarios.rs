//! Reference patients with known expected outcomes.
//!
//! `rxrules scenarios` evaluates each one and reports whether the engine
//! still chooses the expected drug. Useful as a smoke test after editing the
//! rule tables.

use rxrules_contracts::patient::{Condition, PatientData, Symptom};
use rxrules_contracts::recommendation::{CONSULTATION_MARKER, EMERGENCY_MARKER};
use rxrules_engine::{evaluate, Evaluation};

pub struct Scenario {
    pub name: &'static str,
    pub patient: PatientData,
    pub expected_drug: &'static str,
    /// A warning that must appear (substring match), if any.
    pub expected_warning: Option<&'static str>,
}

impl Scenario {
    pub fn run(&self) -> (Evaluation, bool) {
        let eval = evaluate(&self.patient);
        let rec = &eval.recommendation;
        let drug_ok = rec.drug_name == self.expected_drug;
        let warning_ok = self
            .expected_warning
            .map_or(true, |w| rec.warnings.iter().any(|x| x.contains(w)));
        (eval, drug_ok && warning_ok)
    }
}

fn adult(symptoms: &[Symptom]) -> PatientData {
    PatientData {
        age: 40,
        symptoms: symptoms.iter().copied().collect(),
        ..PatientData::default()
    }
}

pub fn all() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "chest pain overrides everything",
            patient: PatientData {
                conditions: [Condition::KidneyDisease].into_iter().collect(),
                allergies: "aspirin".to_string(),
                ..adult(&[Symptom::ChestPain])
            },
            expected_drug: EMERGENCY_MARKER,
            expected_warning: Some("cardiac emergency"),
        },
        Scenario {
            name: "fever with declared kidney disease",
            patient: PatientData {
                conditions: [Condition::KidneyDisease].into_iter().collect(),
                ..adult(&[Symptom::Fever])
            },
            expected_drug: "Paracetamol",
            expected_warning: Some("NSAIDs avoided"),
        },
        Scenario {
            name: "fever with creatinine 2.0",
            patient: PatientData {
                creatinine: Some(2.0),
                ..adult(&[Symptom::Fever])
            },
            expected_drug: "Paracetamol",
            expected_warning: Some("Kidney function impaired"),
        },
        Scenario {
            name: "headache with aspirin allergy",
            patient: PatientData {
                allergies: "Aspirin".to_string(),
                ..adult(&[Symptom::Headache])
            },
            expected_drug: "Paracetamol",
            expected_warning: Some("Aspirin allergy"),
        },
        Scenario {
            name: "elderly patient without symptoms",
            patient: PatientData {
                age: 75,
                ..PatientData::default()
            },
            expected_drug: CONSULTATION_MARKER,
            expected_warning: Some("Elderly patient"),
        },
        Scenario {
            name: "warfarin with joint pain",
            patient: PatientData {
                current_meds: "Warfarin 5mg daily".to_string(),
                ..adult(&[Symptom::JointPain])
            },
            expected_drug: "Ibuprofen",
            expected_warning: Some("blood thinners"),
        },
        Scenario {
            name: "asthmatic cough",
            patient: PatientData {
                conditions: [Condition::Asthma].into_iter().collect(),
                ..adult(&[Symptom::Cough])
            },
            expected_drug: "Dextromethorphan",
            expected_warning: Some("codeine"),
        },
        Scenario {
            name: "hypertensive dizziness",
            patient: PatientData {
                conditions: [Condition::Hypertension].into_iter().collect(),
                ..adult(&[Symptom::Dizziness])
            },
            expected_drug: "Betahistine",
            expected_warning: Some("blood pressure"),
        },
    ]
}
