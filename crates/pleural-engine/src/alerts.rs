//! Special-aetiology alerts

use crate::input::{ratio, Beta2Transferrin, LabInput};
use serde::{Deserialize, Serialize};
use tracing::debug;

const LOW_PH: f64 = 7.20;
const LOW_GLUCOSE: f64 = 60.0;
const HIGH_TRIGLYCERIDES: f64 = 110.0;
const HIGH_CHOLESTEROL: f64 = 60.0;
const HIGH_ADA: f64 = 40.0;
const CREATININE_RATIO: f64 = 1.0;
const HEMATOCRIT_RATIO: f64 = 0.5;

/// Aetiology alert, declared in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alert {
    /// pH < 7.20
    LowPh,
    /// Glucose < 60 mg/dL
    LowGlucose,
    /// Triglycerides > 110 mg/dL
    Chylothorax,
    /// Cholesterol > 60 mg/dL
    HighCholesterol,
    /// ADA > 40 U/L
    TuberculousPleuritis,
    /// PF / serum creatinine > 1
    Urinothorax,
    /// Beta-2 transferrin positive
    CsfLeak,
    /// PF / serum hematocrit > 0.5
    Hemothorax,
}

impl Alert {
    pub const ALL: [Alert; 8] = [
        Alert::LowPh,
        Alert::LowGlucose,
        Alert::Chylothorax,
        Alert::HighCholesterol,
        Alert::TuberculousPleuritis,
        Alert::Urinothorax,
        Alert::CsfLeak,
        Alert::Hemothorax,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Alert::LowPh => "low_ph",
            Alert::LowGlucose => "low_glucose",
            Alert::Chylothorax => "chylothorax",
            Alert::HighCholesterol => "high_cholesterol",
            Alert::TuberculousPleuritis => "tuberculous_pleuritis",
            Alert::Urinothorax => "urinothorax",
            Alert::CsfLeak => "csf_leak",
            Alert::Hemothorax => "hemothorax",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Alert::LowPh => {
                "Low pH (<7.20): possible complicated parapneumonic effusion, consider chest tube drainage"
            }
            Alert::LowGlucose => {
                "Low glucose (<60 mg/dL): possible empyema, rheumatoid effusion, or malignancy"
            }
            Alert::Chylothorax => "High triglycerides (>110 mg/dL): suspect chylothorax",
            Alert::HighCholesterol => "PF cholesterol >60 mg/dL: supports true exudate",
            Alert::TuberculousPleuritis => "ADA >40 U/L: consider tuberculous pleuritis",
            Alert::Urinothorax => "PF/serum creatinine >1: suspect urinothorax",
            Alert::CsfLeak => "Beta-2 transferrin positive: suspect CSF leak into the pleura",
            Alert::Hemothorax => "PF hematocrit >50% of blood: suspect hemothorax",
        }
    }

    /// Whether the rule fires; `false` when its inputs are unavailable
    fn fires(self, input: &LabInput) -> bool {
        match self {
            Alert::LowPh => input.pf_ph.is_some_and(|v| v < LOW_PH),
            Alert::LowGlucose => input.pf_glucose.is_some_and(|v| v < LOW_GLUCOSE),
            Alert::Chylothorax => input.pf_triglycerides.is_some_and(|v| v > HIGH_TRIGLYCERIDES),
            Alert::HighCholesterol => input.pf_cholesterol.is_some_and(|v| v > HIGH_CHOLESTEROL),
            Alert::TuberculousPleuritis => input.pf_ada.is_some_and(|v| v > HIGH_ADA),
            Alert::Urinothorax => ratio(input.pf_creatinine, input.serum_creatinine)
                .is_some_and(|r| r > CREATININE_RATIO),
            Alert::CsfLeak => input.beta2_transferrin == Beta2Transferrin::Positive,
            Alert::Hemothorax => ratio(input.pf_hematocrit, input.serum_hematocrit)
                .is_some_and(|r| r > HEMATOCRIT_RATIO),
        }
    }
}

/// Evaluate every alert rule in declaration order
pub fn derive_alerts(input: &LabInput) -> Vec<Alert> {
    let alerts: Vec<Alert> = Alert::ALL
        .into_iter()
        .filter(|alert| alert.fires(input))
        .collect();
    debug!("Alerts fired: {:?}", alerts);
    alerts
}
