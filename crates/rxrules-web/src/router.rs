//! HTTP router.
//!
//! | Route                 | Body                     | Response               |
//! |-----------------------|--------------------------|------------------------|
//! | `GET /`               | -                        | intake form (HTML)     |
//! | `POST /recommend`     | urlencoded intake form   | result page (HTML)     |
//! | `POST /api/recommend` | `PatientData` JSON       | `Recommendation` JSON  |
//! | `GET /health`         | -                        | status JSON            |

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::Uri;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Serialize;
use tracing::{info, info_span};
use uuid::Uuid;

use rxrules_contracts::patient::PatientData;
use rxrules_contracts::recommendation::Recommendation;
use rxrules_engine::Recommender;

use crate::error::ApiError;
use crate::form::decode_patient;
use crate::render::{render_form, render_result};

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<dyn Recommender>,
}

impl AppState {
    pub fn new(recommender: Arc<dyn Recommender>) -> Self {
        Self { recommender }
    }
}

/// Build the application router around `recommender`.
pub fn app_router(recommender: Arc<dyn Recommender>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/recommend", post(submit_form))
        .route("/api/recommend", post(recommend_json))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(AppState::new(recommender))
}

/// `GET /`
async fn index() -> Html<String> {
    Html(render_form())
}

/// `POST /recommend`
async fn submit_form(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Html<String> {
    let request_id = Uuid::new_v4().to_string();
    let html = info_span!("submit_form", %request_id).in_scope(|| {
        let patient = decode_patient(&pairs);
        let rec = evaluate_logged(state.recommender.as_ref(), &patient);
        let generated_at = chrono::Utc::now().to_rfc3339();
        render_result(&patient, &rec, &request_id, &generated_at)
    });
    Html(html)
}

/// `POST /api/recommend`
async fn recommend_json(
    State(state): State<AppState>,
    payload: Result<Json<PatientData>, JsonRejection>,
) -> Result<Json<Recommendation>, ApiError> {
    let Json(patient) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let request_id = Uuid::new_v4().to_string();
    let rec = info_span!("recommend_json", %request_id)
        .in_scope(|| evaluate_logged(state.recommender.as_ref(), &patient));
    Ok(Json(rec))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /health`
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: APP_VERSION,
    })
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}

/// Log the intake, run the recommender, and log the outcome.
fn evaluate_logged(recommender: &dyn Recommender, patient: &PatientData) -> Recommendation {
    log_patient(patient);
    let rec = recommender.recommend(patient);
    log_recommendation(&rec);
    rec
}

fn log_patient(patient: &PatientData) {
    let symptoms: Vec<&str> = patient.symptoms.iter().map(|s| s.as_str()).collect();
    let conditions: Vec<&str> = patient.conditions.iter().map(|c| c.as_str()).collect();
    info!(
        age = patient.age,
        gender = patient.gender.as_deref().unwrap_or("-"),
        symptoms = ?symptoms,
        conditions = ?conditions,
        allergies = %patient.allergies,
        current_meds = %patient.current_meds,
        creatinine = ?patient.creatinine,
        blood_sugar = ?patient.blood_sugar,
        "patient data received"
    );
}

fn log_recommendation(rec: &Recommendation) {
    info!(
        drug = %rec.drug_name,
        disposition = ?rec.disposition,
        warnings = rec.warnings.len(),
        precautions = rec.precautions.len(),
        "recommendation issued"
    );
}
