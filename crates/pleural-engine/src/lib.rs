//! Pleural Effusion Rule Engine
//!
//! Pure, stateless evaluation of serum and pleural-fluid labs:
//! - Light's criteria (exudate / transudate / unknown)
//! - Albumin and protein gradients, pseudo-exudate detection
//! - Special-aetiology alerts
//! - RAPID score and risk band
//! - Ordered, guideline-linked recommendations
//!
//! Missing values never default to zero; any rule that needs one is skipped
//! and its verdict reported as unknown.

pub mod alerts;
pub mod config;
pub mod engine;
pub mod gradient;
pub mod input;
pub mod intake;
pub mod lights;
pub mod rapid;
pub mod recommend;
pub mod reference;

pub use alerts::Alert;
pub use config::EngineConfig;
pub use engine::{evaluate, ClassificationResult, RuleEngine};
pub use gradient::{Gradients, PseudoExudateTrigger};
pub use input::{Answer, Beta2Transferrin, LabInput, RapidInputs};
pub use intake::{Intake, RawLabInput};
pub use lights::{FluidClass, LightsOutcome};
pub use rapid::{RapidScore, RapidScoreOutOfRange, RiskBand};
pub use recommend::Recommendation;
pub use reference::Reference;
