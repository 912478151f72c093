//! Symptom rules that choose the drug.
//!
//! `PRIMARY_RULES` is ordered by clinical priority. The patient's symptom set
//! is never iterated: the table is, and the first rule whose symptom appears
//! in the set decides `drug_name`, `dosage`, `reason` and `alternatives`.
//! When nothing matches, `consultation` produces the default directive.

use rxrules_contracts::patient::{Condition, Symptom};
use rxrules_contracts::recommendation::{
    Disposition, CONSULTATION_MARKER, DO_NOT_SELF_MEDICATE, EMERGENCY_MARKER, NOT_APPLICABLE,
};

use crate::rule::{Assessment, PrimaryRule, Treatment};

/// Age above which joint pain is managed without full-dose NSAIDs.
pub const JOINT_PAIN_ELDERLY_AGE: u32 = 65;

/// Branch identifier of the fallback directive.
pub const DEFAULT_RULE_ID: &str = "consultation";

/// Ordered primary rules. First match wins.
pub const PRIMARY_RULES: &[PrimaryRule] = &[
    PrimaryRule {
        id: "fever",
        symptom: Symptom::Fever,
        prescribe: fever,
    },
    PrimaryRule {
        id: "joint_pain",
        symptom: Symptom::JointPain,
        prescribe: joint_pain,
    },
    PrimaryRule {
        id: "headache",
        symptom: Symptom::Headache,
        prescribe: headache,
    },
    PrimaryRule {
        id: "cough",
        symptom: Symptom::Cough,
        prescribe: cough,
    },
    PrimaryRule {
        id: "nausea",
        symptom: Symptom::Nausea,
        prescribe: nausea,
    },
    PrimaryRule {
        id: "chest_pain",
        symptom: Symptom::ChestPain,
        prescribe: chest_pain,
    },
    PrimaryRule {
        id: "dizziness",
        symptom: Symptom::Dizziness,
        prescribe: dizziness,
    },
];

fn fever(a: &Assessment<'_>) -> Treatment {
    if a.flags.kidney_issue {
        Treatment::medication(
            "fever.kidney",
            "Paracetamol",
            "500mg every 6 hours (max 3g/day for kidney patients)",
        )
        .alternatives(["Paracetamol 650mg", "Acetaminophen"])
        .warning("NSAIDs avoided due to kidney issues")
        .reason("Paracetamol is the safest antipyretic for patients with kidney disease")
        .precaution("Monitor temperature every 4 hours")
        .precaution("Ensure adequate hydration")
    } else if a.flags.liver_issue {
        Treatment::medication("fever.liver", "Ibuprofen", "400mg every 8 hours with food")
            .alternatives(["Aspirin 325mg"])
            .warning("Paracetamol avoided due to liver disease")
            .reason("NSAIDs are safer for liver disease patients")
            .precaution("Take with food to prevent gastric irritation")
    } else if a.patient.allergic_to("nsaid") || a.patient.allergic_to("ibuprofen") {
        Treatment::medication(
            "fever.nsaid_allergy",
            "Paracetamol",
            "500mg every 6 hours (max 4g/day)",
        )
        .alternatives(["Paracetamol 650mg"])
        .warning("Patient allergic to NSAIDs")
        .reason("Paracetamol chosen due to documented NSAID allergy")
        .precaution("Avoid combination with other paracetamol products")
    } else {
        Treatment::medication("fever.standard", "Ibuprofen", "400mg every 8 hours with food")
            .alternatives(["Paracetamol 500mg", "Aspirin 325mg", "Naproxen 250mg"])
            .reason("Standard fever treatment with anti-inflammatory effect")
            .precaution("Take after meals")
            .precaution("Avoid if stomach ulcer history")
    }
}

fn joint_pain(a: &Assessment<'_>) -> Treatment {
    if a.flags.kidney_issue {
        Treatment::medication("joint_pain.kidney", "Paracetamol", "650mg every 8 hours")
            .alternatives(["Topical Diclofenac gel", "Capsaicin cream"])
            .warning("NSAIDs contraindicated due to kidney dysfunction")
            .reason("Paracetamol provides pain relief without kidney toxicity")
            .precaution("Consider physiotherapy")
            .precaution("Apply hot/cold compress")
    } else if a.patient.age > JOINT_PAIN_ELDERLY_AGE {
        Treatment::medication("joint_pain.elderly", "Paracetamol", "500mg every 8 hours")
            .alternatives(["Topical Diclofenac gel", "Low-dose Ibuprofen 200mg"])
            .warning("Elderly patient - reduced NSAID use recommended")
            .reason("Lower risk pain management for elderly patients to prevent GI bleeding")
            .precaution("Monitor for side effects closely")
            .precaution("Use minimum effective dose")
    } else {
        Treatment::medication("joint_pain.standard", "Ibuprofen", "400mg every 8 hours with food")
            .alternatives(["Naproxen 250mg", "Diclofenac 50mg", "Paracetamol 650mg"])
            .reason("Effective NSAID for inflammatory joint pain")
            .precaution("Take with food or milk")
            .precaution("Avoid alcohol")
    }
}

fn headache(a: &Assessment<'_>) -> Treatment {
    if a.patient.allergic_to("aspirin") {
        Treatment::medication(
            "headache.aspirin_allergy",
            "Paracetamol",
            "500mg every 6 hours as needed",
        )
        .alternatives(["Ibuprofen 200mg"])
        .warning("Aspirin allergy documented")
        .reason("Safe alternative to aspirin for headache relief")
        .precaution("Rest in dark, quiet room")
    } else {
        Treatment::medication("headache.standard", "Aspirin", "325mg every 6 hours")
            .alternatives(["Paracetamol 500mg", "Ibuprofen 200mg"])
            .reason("Effective first-line treatment for mild to moderate headache")
            .precaution("Avoid on empty stomach")
            .precaution("Stay hydrated")
    }
}

fn cough(a: &Assessment<'_>) -> Treatment {
    if a.patient.has_condition(Condition::Asthma) {
        Treatment::medication("cough.asthma", "Dextromethorphan", "15mg syrup every 8 hours")
            .alternatives(["Guaifenesin syrup", "Honey with warm water"])
            .warning("Asthma patient - codeine-based suppressants avoided")
            .reason("Non-opioid cough suppressant safe for asthma patients")
            .precaution("Use inhaler as prescribed")
            .precaution("Monitor breathing difficulty")
    } else {
        Treatment::medication("cough.standard", "Dextromethorphan", "15mg syrup every 8 hours")
            .alternatives(["Guaifenesin expectorant", "Honey-based syrup"])
            .reason("Standard cough suppressant for dry cough")
            .precaution("Drink plenty of fluids")
            .precaution("Avoid if cough produces thick mucus")
    }
}

fn nausea(a: &Assessment<'_>) -> Treatment {
    let treatment = Treatment::medication("nausea", "Ondansetron", "4mg tablet, dissolve on tongue")
        .alternatives(["Metoclopramide 10mg", "Ginger tea"])
        .reason("Effective antiemetic with minimal side effects")
        .precaution("Take 30 minutes before meals")
        .precaution("Avoid heavy, greasy foods");

    if a.flags.liver_issue {
        treatment.warning("Use lower dose in liver disease")
    } else {
        treatment
    }
}

fn chest_pain(_: &Assessment<'_>) -> Treatment {
    Treatment::directive(
        "chest_pain",
        EMERGENCY_MARKER,
        DO_NOT_SELF_MEDICATE,
        Disposition::Emergency,
    )
    .warning("CRITICAL: Chest pain requires immediate medical evaluation")
    .warning("Rule out cardiac emergency (heart attack)")
    .reason("Chest pain is a potentially life-threatening symptom")
    .precaution("Seek emergency medical care immediately")
    .precaution("Call emergency services or visit ER")
    .precaution("Do not drive yourself")
}

fn dizziness(a: &Assessment<'_>) -> Treatment {
    let treatment = Treatment::medication("dizziness", "Betahistine", "16mg three times daily with food")
        .alternatives(["Meclizine 25mg", "Rest and hydration"])
        .reason("Helps with vertigo and balance issues")
        .precaution("Avoid sudden position changes")
        .precaution("Stay seated if dizziness worsens");

    if a.patient.has_condition(Condition::Hypertension) {
        treatment.warning("Check blood pressure - may be cause of dizziness")
    } else {
        treatment
    }
}

/// The directive used when no primary rule matches.
pub fn consultation() -> Treatment {
    Treatment::directive(
        DEFAULT_RULE_ID,
        CONSULTATION_MARKER,
        NOT_APPLICABLE,
        Disposition::Consultation,
    )
    .warning("Symptoms unclear or require detailed physical examination")
    .warning("Multiple symptoms may indicate complex condition")
    .reason("Further medical evaluation needed for proper diagnosis and treatment")
    .precaution("Schedule appointment with physician")
    .precaution("Bring all current medications to consultation")
}
