//! Evaluation Route

use axum::{extract::State, Json};
use lab_validator::LabField;
use pleural_engine::{
    FluidClass, LabInput, LightsOutcome, PseudoExudateTrigger, RawLabInput, Reference, RiskBand,
};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

pub const DISCLAIMER: &str =
    "Educational decision support only. Verify all recommendations with clinical judgement and current guidelines.";

/// Alert as shown to clients
#[derive(Debug, Serialize)]
pub struct AlertView {
    pub code: &'static str,
    pub message: &'static str,
}

/// Recommendation as shown to clients
#[derive(Debug, Serialize)]
pub struct RecommendationView {
    pub code: &'static str,
    pub text: String,
    pub reference: Reference,
}

#[derive(Debug, Serialize)]
pub struct RapidView {
    pub score: u8,
    pub band: RiskBand,
    pub reference: Reference,
}

/// Rejected input value
#[derive(Debug, Serialize)]
pub struct DiagnosticView {
    pub field: LabField,
    pub message: String,
}

/// Response for the evaluate endpoint
#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub classification: FluidClass,
    pub classification_reference: Reference,
    /// `null` when Light's criteria could not be applied
    pub exudate: Option<bool>,
    pub pseudo_exudate: bool,
    pub pseudo_exudate_trigger: Option<PseudoExudateTrigger>,
    pub pseudo_exudate_reference: Option<Reference>,
    pub spag: Option<f64>,
    pub spg: Option<f64>,
    pub lights: LightsOutcome,
    pub alerts: Vec<AlertView>,
    pub recommendations: Vec<RecommendationView>,
    pub rapid: RapidView,
    pub diagnostics: Vec<DiagnosticView>,
    /// Submitted keys that are not lab fields
    pub ignored_fields: Vec<String>,
    /// Values actually used, after normalization
    pub input: LabInput,
    pub disclaimer: &'static str,
}

/// Evaluate a submitted form
pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<RawLabInput>,
) -> Json<EvaluationResponse> {
    let (intake, result) = super::run_evaluation(&state, &raw);

    Json(EvaluationResponse {
        classification: result.class(),
        classification_reference: result.class().reference(),
        exudate: result.is_exudate(),
        pseudo_exudate: result.is_pseudo_exudate(),
        pseudo_exudate_trigger: result.pseudo_exudate,
        pseudo_exudate_reference: result.pseudo_exudate.map(PseudoExudateTrigger::reference),
        spag: result.gradients.spag,
        spg: result.gradients.spg,
        alerts: result
            .alerts
            .iter()
            .map(|alert| AlertView {
                code: alert.code(),
                message: alert.message(),
            })
            .collect(),
        recommendations: result
            .recommendations
            .iter()
            .map(|rec| RecommendationView {
                code: rec.code(),
                text: rec.text(),
                reference: rec.reference(),
            })
            .collect(),
        rapid: RapidView {
            score: result.rapid.value(),
            band: result.risk_band(),
            reference: result.risk_band().reference(),
        },
        diagnostics: intake
            .diagnostics
            .iter()
            .map(|diag| DiagnosticView {
                field: diag.field(),
                message: diag.to_string(),
            })
            .collect(),
        lights: result.lights,
        ignored_fields: intake.ignored_fields,
        input: intake.input,
        disclaimer: DISCLAIMER,
    })
}
