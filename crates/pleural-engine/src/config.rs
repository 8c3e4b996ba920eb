//! Engine configuration

use serde::{Deserialize, Serialize};

/// Rule engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Also flag pseudo-exudate when the serum-to-PF protein gradient
    /// exceeds 3.1 g/dL (off in the current rule set, on in the legacy one)
    pub spg_trigger: bool,
}

impl EngineConfig {
    /// Legacy rule set with the protein-gradient trigger enabled
    pub fn legacy() -> Self {
        Self { spg_trigger: true }
    }
}
