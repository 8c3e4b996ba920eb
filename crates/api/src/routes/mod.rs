//! HTTP Routes

pub mod evaluate;
pub mod report;

use metrics::counter;
use pleural_engine::{ClassificationResult, Intake, RawLabInput};
use tracing::info;

use crate::AppState;

/// Normalize a submitted form and run the engine on it
pub(crate) fn run_evaluation(state: &AppState, raw: &RawLabInput) -> (Intake, ClassificationResult) {
    let intake = Intake::from_raw(raw, &state.normalizer);
    let result = state.engine.evaluate(&intake.input);

    counter!("pleural_evaluations_total", "class" => result.class().label()).increment(1);
    if !intake.diagnostics.is_empty() {
        counter!("pleural_validation_diagnostics_total").increment(intake.diagnostics.len() as u64);
    }

    info!(
        "Evaluation: {} (alerts={}, rapid={}, diagnostics={})",
        result.class().label(),
        result.alerts.len(),
        result.rapid.value(),
        intake.diagnostics.len()
    );
    (intake, result)
}
