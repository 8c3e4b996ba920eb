//! Serum-to-pleural-fluid gradients and pseudo-exudate detection

use crate::config::EngineConfig;
use crate::input::LabInput;
use crate::lights::FluidClass;
use crate::reference::{Reference, ROTH_1990};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// SPAG above this (g/dL) suggests a diuretic-treated transudate
pub const SPAG_THRESHOLD: f64 = 1.2;
/// SPG above this (g/dL), legacy trigger only
pub const SPG_THRESHOLD: f64 = 3.1;

/// Serum minus pleural-fluid gradients (g/dL)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gradients {
    /// Serum-to-PF albumin gradient
    pub spag: Option<f64>,
    /// Serum-to-PF protein gradient
    pub spg: Option<f64>,
}

impl Gradients {
    pub fn from_input(input: &LabInput) -> Self {
        Self {
            spag: difference(input.serum_albumin, input.pf_albumin),
            spg: difference(input.serum_protein, input.pf_protein),
        }
    }
}

fn difference(serum: Option<f64>, fluid: Option<f64>) -> Option<f64> {
    Some(serum? - fluid?)
}

/// Which gradient flagged the pseudo-exudate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PseudoExudateTrigger {
    Albumin,
    Protein,
}

impl PseudoExudateTrigger {
    pub fn reference(self) -> Reference {
        ROTH_1990
    }
}

/// Check an exudate for the pseudo-exudate pattern
///
/// Only exudates can be pseudo-exudates; anything else returns `None`.
pub fn detect_pseudo_exudate(
    class: FluidClass,
    gradients: &Gradients,
    config: &EngineConfig,
) -> Option<PseudoExudateTrigger> {
    if class != FluidClass::Exudate {
        return None;
    }

    let trigger = if gradients.spag.is_some_and(|spag| spag > SPAG_THRESHOLD) {
        Some(PseudoExudateTrigger::Albumin)
    } else if config.spg_trigger && gradients.spg.is_some_and(|spg| spg > SPG_THRESHOLD) {
        Some(PseudoExudateTrigger::Protein)
    } else {
        None
    };

    debug!("Pseudo-exudate check: {:?} -> {:?}", gradients, trigger);
    trigger
}
