//! # rxrules-engine
//!
//! A fixed, deterministic rule set that maps a [`PatientData`] record to a
//! [`Recommendation`].
//!
//! ## Overview
//!
//! Rules come in two tables. [`PRIMARY_RULES`] is ordered by priority and the
//! first rule whose symptom the patient reports chooses the drug.
//! [`SECONDARY_RULES`] are all evaluated afterwards and can only add warnings
//! and precautions. The engine holds no state, performs no I/O, and never
//! fails, so it is safe to call from any number of threads.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use rxrules_engine::recommend;
//!
//! let rec = recommend(&patient);
//! println!("{} {}", rec.drug_name, rec.dosage);
//! ```
//!
//! [`PatientData`]: rxrules_contracts::patient::PatientData
//! [`Recommendation`]: rxrules_contracts::recommendation::Recommendation

pub mod engine;
pub mod flags;
pub mod primary;
pub mod rule;
pub mod secondary;

pub use engine::{evaluate, recommend, Evaluation, Recommender, RuleEngine};
pub use flags::ClinicalFlags;
pub use primary::{DEFAULT_RULE_ID, PRIMARY_RULES};
pub use rule::{Assessment, Findings, PrimaryRule, SecondaryRule, Treatment};
pub use secondary::SECONDARY_RULES;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use rxrules_contracts::patient::{Condition, PatientData, Symptom};
    use rxrules_contracts::recommendation::{
        Disposition, CONSULTATION_MARKER, DO_NOT_SELF_MEDICATE, EMERGENCY_MARKER,
        NOT_APPLICABLE,
    };

    use crate::{evaluate, recommend, Recommender, RuleEngine, PRIMARY_RULES};

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// An adult with no conditions, allergies, medications, or labs. Age 30
    /// keeps both age-based secondary rules quiet.
    fn adult() -> PatientData {
        PatientData {
            age: 30,
            ..PatientData::default()
        }
    }

    fn with_symptoms(symptoms: &[Symptom]) -> PatientData {
        PatientData {
            symptoms: symptoms.iter().copied().collect(),
            ..adult()
        }
    }

    fn with_conditions(mut patient: PatientData, conditions: &[Condition]) -> PatientData {
        patient.conditions = conditions.iter().copied().collect();
        patient
    }

    fn has_entry(entries: &[String], needle: &str) -> bool {
        entries
            .iter()
            .any(|e| e.to_lowercase().contains(&needle.to_lowercase()))
    }

    // ── 1. drug name is never empty ───────────────────────────────────────────

    #[test]
    fn every_single_symptom_produces_a_drug_name() {
        for symptom in Symptom::ALL {
            let rec = recommend(&with_symptoms(&[symptom]));
            assert!(!rec.drug_name.is_empty(), "empty drug for {symptom}");
            assert!(!rec.dosage.is_empty(), "empty dosage for {symptom}");
            assert!(!rec.reason.is_empty(), "empty reason for {symptom}");
        }
        assert!(!recommend(&PatientData::default()).drug_name.is_empty());
    }

    // ── 2. fever ──────────────────────────────────────────────────────────────

    #[test]
    fn fever_with_kidney_disease_prescribes_capped_paracetamol() {
        let patient = with_conditions(with_symptoms(&[Symptom::Fever]), &[Condition::KidneyDisease]);
        let rec = recommend(&patient);

        assert_eq!(rec.drug_name, "Paracetamol");
        assert!(rec.dosage.contains("3g/day"));
        assert_eq!(rec.alternatives, vec!["Paracetamol 650mg", "Acetaminophen"]);
        assert!(has_entry(&rec.warnings, "NSAIDs avoided"));
        assert_eq!(
            rec.precautions,
            vec!["Monitor temperature every 4 hours", "Ensure adequate hydration"]
        );
    }

    #[test]
    fn fever_with_high_creatinine_is_treated_as_kidney_patient() {
        let patient = PatientData {
            creatinine: Some(2.0),
            ..with_symptoms(&[Symptom::Fever])
        };
        let eval = evaluate(&patient);
        let rec = &eval.recommendation;

        assert_eq!(rec.drug_name, "Paracetamol");
        assert!(rec.dosage.contains("3g/day"));
        assert!(has_entry(&rec.warnings, "NSAIDs avoided"));
        assert_eq!(
            rec.warnings[0],
            "Elevated creatinine detected - Kidney function impaired"
        );
        // The lower monitoring threshold fires independently.
        assert!(has_entry(&rec.warnings, "kidney function monitoring required"));
        assert_eq!(
            eval.trace,
            vec!["derivation", "fever.kidney", "creatinine_monitoring"]
        );
    }

    #[test]
    fn fever_with_liver_disease_prescribes_ibuprofen() {
        let patient = with_conditions(with_symptoms(&[Symptom::Fever]), &[Condition::LiverDisease]);
        let rec = recommend(&patient);

        assert_eq!(rec.drug_name, "Ibuprofen");
        assert_eq!(rec.alternatives, vec!["Aspirin 325mg"]);
        assert_eq!(rec.warnings, vec!["Paracetamol avoided due to liver disease"]);
    }

    #[test]
    fn fever_kidney_takes_priority_over_liver() {
        let patient = with_conditions(
            with_symptoms(&[Symptom::Fever]),
            &[Condition::KidneyDisease, Condition::LiverDisease],
        );
        assert_eq!(evaluate(&patient).trace, vec!["fever.kidney"]);
    }

    #[test]
    fn fever_with_nsaid_allergy_prescribes_paracetamol() {
        for allergy in ["NSAIDs", "ibuprofen", "Ibuprofen and sulfa"] {
            let patient = PatientData {
                allergies: allergy.to_string(),
                ..with_symptoms(&[Symptom::Fever])
            };
            let rec = recommend(&patient);
            assert_eq!(rec.drug_name, "Paracetamol", "allergy text: {allergy}");
            assert!(rec.dosage.contains("4g/day"));
            assert!(has_entry(&rec.warnings, "allergic to NSAIDs"));
        }
    }

    #[test]
    fn fever_standard_prescribes_ibuprofen_with_three_alternatives() {
        let rec = recommend(&with_symptoms(&[Symptom::Fever]));
        assert_eq!(rec.drug_name, "Ibuprofen");
        assert_eq!(rec.dosage, "400mg every 8 hours with food");
        assert_eq!(
            rec.alternatives,
            vec!["Paracetamol 500mg", "Aspirin 325mg", "Naproxen 250mg"]
        );
        assert!(rec.warnings.is_empty());
        assert_eq!(rec.precautions, vec!["Take after meals", "Avoid if stomach ulcer history"]);
    }

    // ── 3. joint pain ─────────────────────────────────────────────────────────

    #[test]
    fn joint_pain_branches() {
        let kidney = with_conditions(
            with_symptoms(&[Symptom::JointPain]),
            &[Condition::KidneyDisease],
        );
        let rec = recommend(&kidney);
        assert_eq!(rec.drug_name, "Paracetamol");
        assert_eq!(rec.dosage, "650mg every 8 hours");
        assert!(has_entry(&rec.warnings, "NSAIDs contraindicated"));

        let elderly = PatientData {
            age: 66,
            ..with_symptoms(&[Symptom::JointPain])
        };
        let rec = recommend(&elderly);
        assert_eq!(rec.drug_name, "Paracetamol");
        assert_eq!(rec.dosage, "500mg every 8 hours");
        assert!(has_entry(&rec.warnings, "reduced NSAID use"));

        let standard = PatientData {
            age: 65,
            ..with_symptoms(&[Symptom::JointPain])
        };
        let rec = recommend(&standard);
        assert_eq!(rec.drug_name, "Ibuprofen");
        assert_eq!(
            rec.alternatives,
            vec!["Naproxen 250mg", "Diclofenac 50mg", "Paracetamol 650mg"]
        );
        assert_eq!(rec.precautions, vec!["Take with food or milk", "Avoid alcohol"]);
    }

    // ── 4. headache ───────────────────────────────────────────────────────────

    #[test]
    fn headache_with_aspirin_allergy_avoids_aspirin() {
        let patient = PatientData {
            allergies: "Aspirin".to_string(),
            ..with_symptoms(&[Symptom::Headache])
        };
        let rec = recommend(&patient);
        assert_eq!(rec.drug_name, "Paracetamol");
        assert_ne!(rec.drug_name, "Aspirin");
        assert_eq!(rec.alternatives, vec!["Ibuprofen 200mg"]);
        assert!(has_entry(&rec.warnings, "Aspirin allergy"));
    }

    #[test]
    fn headache_standard_prescribes_aspirin() {
        let rec = recommend(&with_symptoms(&[Symptom::Headache]));
        assert_eq!(rec.drug_name, "Aspirin");
        assert_eq!(rec.dosage, "325mg every 6 hours");
        assert_eq!(rec.precautions, vec!["Avoid on empty stomach", "Stay hydrated"]);
    }

    // ── 5. cough ──────────────────────────────────────────────────────────────

    #[test]
    fn cough_prescribes_dextromethorphan_either_way() {
        let asthma = with_conditions(with_symptoms(&[Symptom::Cough]), &[Condition::Asthma]);
        let rec = recommend(&asthma);
        assert_eq!(rec.drug_name, "Dextromethorphan");
        assert_eq!(rec.alternatives, vec!["Guaifenesin syrup", "Honey with warm water"]);
        assert!(has_entry(&rec.warnings, "codeine-based suppressants avoided"));
        assert!(has_entry(&rec.precautions, "inhaler"));

        let rec = recommend(&with_symptoms(&[Symptom::Cough]));
        assert_eq!(rec.drug_name, "Dextromethorphan");
        assert_eq!(rec.dosage, "15mg syrup every 8 hours");
        assert_eq!(rec.alternatives, vec!["Guaifenesin expectorant", "Honey-based syrup"]);
        assert!(rec.warnings.is_empty());
    }

    // ── 6. nausea ─────────────────────────────────────────────────────────────

    #[test]
    fn nausea_adds_liver_warning_only_for_liver_disease() {
        let rec = recommend(&with_symptoms(&[Symptom::Nausea]));
        assert_eq!(rec.drug_name, "Ondansetron");
        assert!(rec.warnings.is_empty());

        let liver = with_conditions(with_symptoms(&[Symptom::Nausea]), &[Condition::LiverDisease]);
        let rec = recommend(&liver);
        assert_eq!(rec.drug_name, "Ondansetron");
        assert_eq!(rec.warnings, vec!["Use lower dose in liver disease"]);
    }

    // ── 7. chest pain ─────────────────────────────────────────────────────────

    #[test]
    fn chest_pain_is_an_emergency_regardless_of_other_fields() {
        let patient = PatientData {
            age: 45,
            symptoms: [Symptom::ChestPain].into_iter().collect(),
            conditions: [Condition::KidneyDisease, Condition::Hypertension]
                .into_iter()
                .collect(),
            allergies: "aspirin".to_string(),
            current_meds: "metformin".to_string(),
            creatinine: Some(1.8),
            blood_sugar: Some(200.0),
            ..PatientData::default()
        };
        let rec = recommend(&patient);

        assert_eq!(rec.drug_name, EMERGENCY_MARKER);
        assert_eq!(rec.dosage, DO_NOT_SELF_MEDICATE);
        assert!(rec.alternatives.is_empty());
        assert_eq!(rec.disposition, Disposition::Emergency);
        assert!(!rec.is_self_medication());
        assert!(has_entry(&rec.warnings, "requires immediate medical evaluation"));
        assert!(has_entry(&rec.warnings, "cardiac emergency"));
        assert!(has_entry(&rec.precautions, "Do not drive yourself"));
    }

    #[test]
    fn chest_pain_alone_has_fixed_directive_lists() {
        let rec = recommend(&with_symptoms(&[Symptom::ChestPain]));
        assert_eq!(rec.warnings.len(), 2);
        assert_eq!(
            rec.precautions,
            vec![
                "Seek emergency medical care immediately",
                "Call emergency services or visit ER",
                "Do not drive yourself",
            ]
        );
    }

    // ── 8. dizziness ──────────────────────────────────────────────────────────

    #[test]
    fn dizziness_checks_blood_pressure_for_hypertensives() {
        let rec = recommend(&with_symptoms(&[Symptom::Dizziness]));
        assert_eq!(rec.drug_name, "Betahistine");
        assert!(rec.warnings.is_empty());

        let htn = with_conditions(with_symptoms(&[Symptom::Dizziness]), &[Condition::Hypertension]);
        let rec = recommend(&htn);
        assert!(has_entry(&rec.warnings, "Check blood pressure"));
    }

    // ── 9. default consultation ───────────────────────────────────────────────

    #[test]
    fn no_symptoms_requests_consultation() {
        let rec = recommend(&adult());
        assert_eq!(rec.drug_name, CONSULTATION_MARKER);
        assert_eq!(rec.dosage, NOT_APPLICABLE);
        assert!(rec.alternatives.is_empty());
        assert_eq!(rec.disposition, Disposition::Consultation);
        assert_eq!(
            rec.warnings,
            vec![
                "Symptoms unclear or require detailed physical examination",
                "Multiple symptoms may indicate complex condition",
            ]
        );
        assert_eq!(
            rec.precautions,
            vec![
                "Schedule appointment with physician",
                "Bring all current medications to consultation",
            ]
        );
    }

    #[test]
    fn elderly_without_symptoms_gets_consultation_plus_age_pair() {
        let patient = PatientData {
            age: 75,
            ..PatientData::default()
        };
        let eval = evaluate(&patient);
        let rec = &eval.recommendation;

        assert_eq!(rec.drug_name, CONSULTATION_MARKER);
        assert_eq!(rec.warnings.len(), 3);
        assert!(rec.warnings[2].starts_with("Elderly patient"));
        assert_eq!(rec.precautions.last().unwrap(), "Start with lowest effective dose");
        assert_eq!(eval.trace, vec!["consultation", "elderly"]);
    }

    // ── 10. priority between symptoms ─────────────────────────────────────────

    #[test]
    fn first_matching_symptom_in_table_order_wins() {
        // Chest pain is reported, but fever outranks it in the table.
        let rec = recommend(&with_symptoms(&[Symptom::ChestPain, Symptom::Fever]));
        assert_eq!(rec.drug_name, "Ibuprofen");

        let rec = recommend(&with_symptoms(&[Symptom::Dizziness, Symptom::ChestPain]));
        assert_eq!(rec.drug_name, EMERGENCY_MARKER);

        let rec = recommend(&with_symptoms(&[Symptom::Nausea, Symptom::Headache]));
        assert_eq!(rec.drug_name, "Aspirin");
    }

    #[test]
    fn primary_table_covers_every_symptom_once() {
        for symptom in Symptom::ALL {
            let count = PRIMARY_RULES.iter().filter(|r| r.symptom == symptom).count();
            assert_eq!(count, 1, "{symptom} appears {count} times");
        }
    }

    // ── 11. secondary rules ───────────────────────────────────────────────────

    #[test]
    fn pediatric_rule_fires_under_twelve() {
        let patient = PatientData {
            age: 8,
            ..with_symptoms(&[Symptom::Cough])
        };
        let rec = recommend(&patient);
        assert!(has_entry(&rec.warnings, "Pediatric patient"));
        assert_eq!(rec.precautions.last().unwrap(), "Consult pediatrician for exact dosing");

        let patient = PatientData {
            age: 12,
            ..with_symptoms(&[Symptom::Cough])
        };
        assert!(!has_entry(&recommend(&patient).warnings, "Pediatric"));
    }

    #[test]
    fn elderly_rule_fires_only_above_seventy() {
        let at_threshold = PatientData {
            age: 70,
            ..with_symptoms(&[Symptom::Cough])
        };
        let eval = evaluate(&at_threshold);
        assert!(!has_entry(&eval.recommendation.warnings, "Elderly patient"));
        assert!(!eval.trace.contains(&"elderly"));

        let above = PatientData {
            age: 71,
            ..with_symptoms(&[Symptom::Cough])
        };
        let eval = evaluate(&above);
        assert!(has_entry(&eval.recommendation.warnings, "Elderly patient"));
        assert!(eval.trace.contains(&"elderly"));
    }

    #[test]
    fn missing_age_counts_as_pediatric() {
        let rec = recommend(&PatientData {
            symptoms: [Symptom::Headache].into_iter().collect(),
            ..PatientData::default()
        });
        assert!(has_entry(&rec.warnings, "Pediatric patient"));
    }

    #[test]
    fn creatinine_between_thresholds_only_triggers_monitoring() {
        let patient = PatientData {
            creatinine: Some(1.4),
            ..with_symptoms(&[Symptom::Fever])
        };
        let eval = evaluate(&patient);
        // 1.4 is below the impairment threshold: standard fever branch.
        assert_eq!(eval.recommendation.drug_name, "Ibuprofen");
        assert_eq!(eval.trace, vec!["fever.standard", "creatinine_monitoring"]);
        assert_eq!(
            eval.recommendation.precautions.last().unwrap(),
            "Regular kidney function tests advised"
        );
    }

    #[test]
    fn creatinine_at_monitoring_threshold_does_not_fire() {
        let patient = PatientData {
            creatinine: Some(1.3),
            ..with_symptoms(&[Symptom::Fever])
        };
        let eval = evaluate(&patient);
        assert_eq!(eval.trace, vec!["fever.standard"]);
        assert!(eval.recommendation.warnings.is_empty());
        assert!(!has_entry(&eval.recommendation.precautions, "kidney function"));
    }

    #[test]
    fn blood_sugar_at_180_adds_precaution_but_no_warning() {
        let patient = PatientData {
            blood_sugar: Some(180.0),
            ..with_symptoms(&[Symptom::Headache])
        };
        let rec = recommend(&patient);
        // 180 is above the diabetes cut-off but not above the hyperglycemia one.
        assert!(has_entry(&rec.precautions, "Monitor blood sugar levels regularly"));
        assert!(!has_entry(&rec.warnings, "High blood sugar"));

        let above = PatientData {
            blood_sugar: Some(180.5),
            ..with_symptoms(&[Symptom::Headache])
        };
        assert!(has_entry(&recommend(&above).warnings, "High blood sugar detected"));
    }

    #[test]
    fn diabetes_rule_from_condition_and_from_lab() {
        let declared = with_conditions(with_symptoms(&[Symptom::Headache]), &[Condition::Diabetes]);
        let rec = recommend(&declared);
        assert!(has_entry(&rec.precautions, "Monitor blood sugar levels regularly"));
        assert!(!has_entry(&rec.warnings, "High blood sugar"));

        let high = PatientData {
            blood_sugar: Some(250.0),
            ..with_symptoms(&[Symptom::Headache])
        };
        let rec = recommend(&high);
        assert!(has_entry(&rec.precautions, "Monitor blood sugar levels regularly"));
        assert!(has_entry(&rec.warnings, "High blood sugar detected"));

        let normal = PatientData {
            blood_sugar: Some(100.0),
            ..with_symptoms(&[Symptom::Headache])
        };
        assert!(!has_entry(&recommend(&normal).precautions, "blood sugar"));
    }

    #[test]
    fn warfarin_triggers_blood_thinner_warning_for_any_symptom() {
        for symptom in Symptom::ALL {
            let patient = PatientData {
                current_meds: "Warfarin 5mg daily".to_string(),
                ..with_symptoms(&[symptom])
            };
            let rec = recommend(&patient);
            assert!(
                has_entry(&rec.warnings, "on blood thinners"),
                "missing interaction warning for {symptom}"
            );
        }

        let patient = PatientData {
            current_meds: "some BLOOD THINNER".to_string(),
            ..adult()
        };
        assert!(has_entry(&recommend(&patient).warnings, "on blood thinners"));
    }

    #[test]
    fn metformin_warning_needs_kidney_issue() {
        let no_kidney = PatientData {
            current_meds: "Metformin 500mg".to_string(),
            ..with_symptoms(&[Symptom::Cough])
        };
        assert!(!has_entry(&recommend(&no_kidney).warnings, "Metformin"));

        let kidney = with_conditions(no_kidney.clone(), &[Condition::KidneyDisease]);
        assert!(has_entry(&recommend(&kidney).warnings, "Metformin + kidney disease"));

        let lab_kidney = PatientData {
            creatinine: Some(1.9),
            ..no_kidney
        };
        assert!(has_entry(&recommend(&lab_kidney).warnings, "Metformin + kidney disease"));
    }

    // ── 12. ordering ──────────────────────────────────────────────────────────

    #[test]
    fn entries_follow_derivation_primary_secondary_order() {
        let patient = PatientData {
            age: 80,
            symptoms: [Symptom::JointPain].into_iter().collect(),
            conditions: [Condition::Diabetes].into_iter().collect(),
            current_meds: "warfarin, metformin".to_string(),
            creatinine: Some(1.7),
            blood_sugar: Some(190.0),
            ..PatientData::default()
        };
        let eval = evaluate(&patient);

        assert_eq!(
            eval.trace,
            vec![
                "derivation",
                "joint_pain.kidney",
                "elderly",
                "creatinine_monitoring",
                "diabetes",
                "anticoagulant",
                "metformin_kidney",
            ]
        );
        assert_eq!(
            eval.recommendation.warnings,
            vec![
                "Elevated creatinine detected - Kidney function impaired",
                "NSAIDs contraindicated due to kidney dysfunction",
                "Elderly patient - increased risk of side effects and drug interactions",
                "Elevated creatinine - kidney function monitoring required",
                "High blood sugar detected - review diabetes management",
                "CRITICAL: Patient on blood thinners - avoid NSAIDs and Aspirin",
                "Metformin + kidney disease - review with doctor immediately",
            ]
        );
        assert_eq!(
            eval.recommendation.precautions,
            vec![
                "Consider physiotherapy",
                "Apply hot/cold compress",
                "Start with lowest effective dose",
                "Regular kidney function tests advised",
                "Monitor blood sugar levels regularly",
            ]
        );
    }

    // ── 13. purity ────────────────────────────────────────────────────────────

    #[test]
    fn identical_input_yields_identical_output() {
        let patient = PatientData {
            age: 72,
            symptoms: [Symptom::Fever, Symptom::Cough].into_iter().collect(),
            allergies: "ibuprofen".to_string(),
            blood_sugar: Some(140.0),
            ..PatientData::default()
        };
        assert_eq!(evaluate(&patient), evaluate(&patient));
        assert_eq!(RuleEngine.recommend(&patient), recommend(&patient));
    }

    #[test]
    fn recommendation_serializes_for_the_api() {
        let rec = recommend(&with_symptoms(&[Symptom::Headache]));
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["drug_name"], "Aspirin");
        assert_eq!(json["disposition"], "medication");
        assert!(json["alternatives"].is_array());
    }
}
