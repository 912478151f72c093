//! HTML rendering for the intake form and the result page.
//!
//! Pages are assembled with `format!` around a shared layout. Every value
//! that originated from the request is passed through `escape_html`.

use std::fmt::Write;

use rxrules_contracts::patient::{Condition, PatientData, Symptom};
use rxrules_contracts::recommendation::{Disposition, Recommendation};

use crate::form::field;

/// Escape text for inclusion in HTML element content or quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `GET /` page: the patient intake form.
pub fn render_form() -> String {
    let symptoms = checkboxes(
        field::SYMPTOMS,
        Symptom::ALL.iter().map(|s| (s.as_str(), s.label())),
    );
    let conditions = checkboxes(
        field::CONDITIONS,
        Condition::ALL.iter().map(|c| (c.as_str(), c.label())),
    );

    let body = format!(
        r#"<h1>Drug Recommendation</h1>
<p class="disclaimer">Rule-based suggestions for demonstration only. Not medical advice.</p>
<form method="post" action="/recommend">
  <fieldset><legend>Patient</legend>
    <label>Age <input type="number" name="{age}" min="0" max="130"></label>
    <label>Gender
      <select name="{gender}">
        <option value="">-</option>
        <option value="female">Female</option>
        <option value="male">Male</option>
        <option value="other">Other</option>
      </select>
    </label>
    <label>Weight (kg) <input type="number" step="0.1" name="{weight}"></label>
  </fieldset>
  <fieldset><legend>Symptoms</legend>
{symptoms}  </fieldset>
  <fieldset><legend>Existing conditions</legend>
{conditions}  </fieldset>
  <fieldset><legend>History</legend>
    <label>Allergies <input type="text" name="{allergies}" placeholder="e.g. aspirin, NSAIDs"></label>
    <label>Current medications <input type="text" name="{current_meds}" placeholder="e.g. warfarin 5mg"></label>
  </fieldset>
  <fieldset><legend>Lab values</legend>
    <label>Blood sugar (mg/dL) <input type="number" step="any" name="{blood_sugar}"></label>
    <label>Creatinine (mg/dL) <input type="number" step="any" name="{creatinine}"></label>
    <label>Blood pressure <input type="text" name="{blood_pressure}" placeholder="120/80"></label>
    <label>Hemoglobin (g/dL) <input type="number" step="any" name="{hemoglobin}"></label>
  </fieldset>
  <button type="submit">Get recommendation</button>
</form>"#,
        age = field::AGE,
        gender = field::GENDER,
        weight = field::WEIGHT,
        allergies = field::ALLERGIES,
        current_meds = field::CURRENT_MEDS,
        blood_sugar = field::BLOOD_SUGAR,
        creatinine = field::CREATININE,
        blood_pressure = field::BLOOD_PRESSURE,
        hemoglobin = field::HEMOGLOBIN,
    );

    layout("Drug Recommendation", &body)
}

/// `POST /recommend` page: the submitted intake next to the recommendation.
pub fn render_result(
    patient: &PatientData,
    rec: &Recommendation,
    request_id: &str,
    generated_at: &str,
) -> String {
    let (class, heading) = match rec.disposition {
        Disposition::Medication => ("medication", "Suggested medication"),
        Disposition::Emergency => ("emergency", "Emergency"),
        Disposition::Consultation => ("consultation", "Consultation needed"),
    };

    let mut body = String::new();
    let _ = write!(
        body,
        r#"<h1>Recommendation</h1>
<section class="{class}">
  <h2>{heading}</h2>
  <p class="drug">{drug}</p>
  <p><strong>Dosage:</strong> {dosage}</p>
  <p><strong>Reason:</strong> {reason}</p>
"#,
        drug = escape_html(&rec.drug_name),
        dosage = escape_html(&rec.dosage),
        reason = escape_html(&rec.reason),
    );
    body.push_str(&list_section("Alternatives", "alternatives", &rec.alternatives));
    body.push_str(&list_section("Warnings", "warnings", &rec.warnings));
    body.push_str(&list_section("Precautions", "precautions", &rec.precautions));
    body.push_str("</section>\n");

    body.push_str(&patient_summary(patient));

    let _ = write!(
        body,
        r#"<footer>Request {id} &middot; generated {at}</footer>
<p><a href="/">New assessment</a></p>"#,
        id = escape_html(request_id),
        at = escape_html(generated_at),
    );

    layout("Recommendation", &body)
}

fn patient_summary(patient: &PatientData) -> String {
    let or_dash = |v: Option<String>| v.map(|s| escape_html(&s)).unwrap_or_else(|| "-".into());
    let join = |names: Vec<&str>| {
        if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        }
    };
    let text_or_none = |s: &str| {
        if s.trim().is_empty() {
            "none".to_string()
        } else {
            escape_html(s)
        }
    };

    let rows = [
        ("Age", patient.age.to_string()),
        ("Gender", or_dash(patient.gender.clone())),
        ("Weight (kg)", or_dash(patient.weight_kg.map(|w| w.to_string()))),
        (
            "Symptoms",
            join(patient.symptoms.iter().map(|s| s.label()).collect()),
        ),
        (
            "Conditions",
            join(patient.conditions.iter().map(|c| c.label()).collect()),
        ),
        ("Allergies", text_or_none(&patient.allergies)),
        ("Current medications", text_or_none(&patient.current_meds)),
        ("Blood sugar (mg/dL)", or_dash(patient.blood_sugar.map(|v| v.to_string()))),
        ("Creatinine (mg/dL)", or_dash(patient.creatinine.map(|v| v.to_string()))),
        ("Blood pressure", or_dash(patient.blood_pressure.clone())),
        ("Hemoglobin (g/dL)", or_dash(patient.hemoglobin.map(|v| v.to_string()))),
    ];

    let mut out = String::from("<section class=\"patient\">\n  <h2>Patient data</h2>\n  <table>\n");
    for (label, value) in rows {
        let _ = writeln!(out, "    <tr><th>{label}</th><td>{value}</td></tr>");
    }
    out.push_str("  </table>\n</section>\n");
    out
}

fn list_section(title: &str, class: &str, items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut out = format!("  <h3>{title}</h3>\n  <ul class=\"{class}\">\n");
    for item in items {
        let _ = writeln!(out, "    <li>{}</li>", escape_html(item));
    }
    out.push_str("  </ul>\n");
    out
}

fn checkboxes<'a>(name: &str, options: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    let mut out = String::new();
    for (value, label) in options {
        let _ = writeln!(
            out,
            r#"    <label><input type="checkbox" name="{name}" value="{value}"> {label}</label>"#
        );
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
  body {{ font-family: system-ui, sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; }}
  fieldset {{ margin-bottom: 1rem; }}
  label {{ display: block; margin: .3rem 0; }}
  .disclaimer {{ color: #666; font-size: .9rem; }}
  .drug {{ font-size: 1.4rem; font-weight: bold; }}
  .emergency {{ border-left: 6px solid #c0392b; padding-left: 1rem; }}
  .consultation {{ border-left: 6px solid #e67e22; padding-left: 1rem; }}
  .medication {{ border-left: 6px solid #27ae60; padding-left: 1rem; }}
  .warnings li {{ color: #a94442; }}
  footer {{ color: #888; font-size: .8rem; margin-top: 2rem; }}
</style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(disposition: Disposition) -> Recommendation {
        Recommendation {
            drug_name: "Paracetamol".to_string(),
            dosage: "500mg every 6 hours".to_string(),
            alternatives: vec!["Acetaminophen".to_string()],
            warnings: vec!["NSAIDs avoided due to kidney issues".to_string()],
            reason: "safest".to_string(),
            precautions: vec![],
            disposition,
        }
    }

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn form_lists_every_symptom_and_condition() {
        let html = render_form();
        for symptom in Symptom::ALL {
            assert!(html.contains(&format!(r#"value="{}""#, symptom.as_str())));
        }
        for condition in Condition::ALL {
            assert!(html.contains(&format!(r#"value="{}""#, condition.as_str())));
        }
        assert!(html.contains(r#"action="/recommend""#));
    }

    #[test]
    fn result_escapes_patient_text() {
        let patient = PatientData {
            allergies: "<b>aspirin</b>".to_string(),
            ..PatientData::default()
        };
        let html = render_result(&patient, &rec(Disposition::Medication), "req-1", "now");
        assert!(html.contains("&lt;b&gt;aspirin&lt;/b&gt;"));
        assert!(!html.contains("<b>aspirin</b>"));
    }

    #[test]
    fn result_styles_by_disposition_and_skips_empty_lists() {
        let html = render_result(
            &PatientData::default(),
            &rec(Disposition::Emergency),
            "req-2",
            "now",
        );
        assert!(html.contains(r#"<section class="emergency">"#));
        assert!(html.contains("NSAIDs avoided due to kidney issues"));
        assert!(html.contains(r#"<ul class="alternatives">"#));
        assert!(!html.contains(r#"<ul class="precautions">"#));
        assert!(html.contains("req-2"));
    }

    #[test]
    fn summary_shows_placeholders_for_missing_values() {
        let html = render_result(
            &PatientData::default(),
            &rec(Disposition::Consultation),
            "r",
            "t",
        );
        assert!(html.contains("<tr><th>Creatinine (mg/dL)</th><td>-</td></tr>"));
        assert!(html.contains("<tr><th>Symptoms</th><td>none</td></tr>"));
    }
}
