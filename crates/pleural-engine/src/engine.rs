//! Rule Engine Implementation

use crate::alerts::{derive_alerts, Alert};
use crate::config::EngineConfig;
use crate::gradient::{detect_pseudo_exudate, Gradients, PseudoExudateTrigger};
use crate::input::LabInput;
use crate::lights::{self, FluidClass, LightsOutcome};
use crate::rapid::{RapidScore, RiskBand};
use crate::recommend::{recommend, Recommendation};
use crate::reference::Reference;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Result of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub lights: LightsOutcome,
    /// Set only for exudates that match the pseudo-exudate pattern
    pub pseudo_exudate: Option<PseudoExudateTrigger>,
    pub gradients: Gradients,
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<Recommendation>,
    pub rapid: RapidScore,
}

impl ClassificationResult {
    pub fn class(&self) -> FluidClass {
        self.lights.class
    }

    /// Exudate verdict; `None` when unknown
    pub fn is_exudate(&self) -> Option<bool> {
        self.lights.class.is_exudate()
    }

    pub fn is_pseudo_exudate(&self) -> bool {
        self.pseudo_exudate.is_some()
    }

    pub fn risk_band(&self) -> RiskBand {
        self.rapid.band()
    }

    /// Sources behind this result, first use order, without duplicates
    pub fn references(&self) -> Vec<Reference> {
        let mut refs = vec![self.lights.class.reference()];
        refs.extend(self.pseudo_exudate.map(PseudoExudateTrigger::reference));
        refs.push(self.rapid.band().reference());
        refs.extend(self.recommendations.iter().map(Recommendation::reference));

        let mut out: Vec<Reference> = Vec::with_capacity(refs.len());
        for reference in refs {
            if !out.contains(&reference) {
                out.push(reference);
            }
        }
        out
    }
}

/// Stateless rule engine
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    config: EngineConfig,
}

impl RuleEngine {
    /// Create a new rule engine
    pub fn new(config: EngineConfig) -> Self {
        info!("Creating rule engine with config: {:?}", config);
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Classify, alert, score and recommend
    pub fn evaluate(&self, input: &LabInput) -> ClassificationResult {
        let lights = lights::apply(input);
        let gradients = Gradients::from_input(input);
        let pseudo_exudate = detect_pseudo_exudate(lights.class, &gradients, &self.config);
        let alerts = derive_alerts(input);
        let rapid = RapidScore::from_inputs(&input.rapid);
        let recommendations = recommend(&lights, pseudo_exudate.is_some(), &alerts, rapid);

        debug!(
            "Evaluated: class={:?} pseudo={:?} alerts={} rapid={}",
            lights.class,
            pseudo_exudate,
            alerts.len(),
            rapid.value()
        );

        ClassificationResult {
            lights,
            pseudo_exudate,
            gradients,
            alerts,
            recommendations,
            rapid,
        }
    }
}

/// Evaluate with the default configuration
pub fn evaluate(input: &LabInput) -> ClassificationResult {
    RuleEngine::default().evaluate(input)
}
