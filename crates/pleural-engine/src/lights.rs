//! Light's criteria
//!
//! Exudate if any of:
//! - PF protein / serum protein > 0.5
//! - PF LDH / serum LDH > 0.6
//! - PF LDH > 2 x upper limit of normal for serum LDH
//!
//! Sub-rules combine with three-valued OR: one true sub-rule is enough for an
//! exudate, but transudate needs every sub-rule to be known false.

use crate::input::{ratio, LabInput};
use crate::reference::{Reference, LIGHT_1972};
use lab_validator::LabField;
use serde::{Deserialize, Serialize};
use tracing::debug;

const PROTEIN_RATIO_THRESHOLD: f64 = 0.5;
const LDH_RATIO_THRESHOLD: f64 = 0.6;
const LDH_ULN_MULTIPLE: f64 = 2.0;

/// Fields Light's criteria cannot be applied without
pub const REQUIRED_FIELDS: [LabField; 5] = [
    LabField::PfProtein,
    LabField::SerumProtein,
    LabField::PfLdh,
    LabField::SerumLdh,
    LabField::SerumLdhUln,
];

/// Fluid classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluidClass {
    Exudate,
    Transudate,
    /// Not enough usable data to decide
    Unknown,
}

impl FluidClass {
    /// `Some(true)` for exudate, `Some(false)` for transudate
    pub fn is_exudate(self) -> Option<bool> {
        match self {
            FluidClass::Exudate => Some(true),
            FluidClass::Transudate => Some(false),
            FluidClass::Unknown => None,
        }
    }

    /// Light's criteria, whatever the verdict
    pub fn reference(self) -> Reference {
        LIGHT_1972
    }

    pub fn label(self) -> &'static str {
        match self {
            FluidClass::Exudate => "Exudate",
            FluidClass::Transudate => "Transudate",
            FluidClass::Unknown => "Unknown",
        }
    }
}

/// Detailed result of applying Light's criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightsOutcome {
    /// PF / serum protein
    pub protein_ratio: Option<f64>,
    /// PF / serum LDH
    pub ldh_ratio: Option<f64>,
    /// Whether PF LDH exceeds twice the serum ULN
    pub ldh_above_twice_uln: Option<bool>,
    /// Required fields that were not available
    pub missing: Vec<LabField>,
    pub class: FluidClass,
}

/// Apply Light's criteria
pub fn apply(input: &LabInput) -> LightsOutcome {
    let missing: Vec<LabField> = REQUIRED_FIELDS
        .into_iter()
        .filter(|field| input.get(*field).is_none())
        .collect();

    let protein_ratio = ratio(input.pf_protein, input.serum_protein);
    let ldh_ratio = ratio(input.pf_ldh, input.serum_ldh);
    let ldh_above_twice_uln = match (input.pf_ldh, input.serum_ldh_uln) {
        (Some(pf_ldh), Some(uln)) if uln != 0.0 => Some(pf_ldh > LDH_ULN_MULTIPLE * uln),
        _ => None,
    };

    let class = if !missing.is_empty() {
        FluidClass::Unknown
    } else {
        let sub_rules = [
            protein_ratio.map(|r| r > PROTEIN_RATIO_THRESHOLD),
            ldh_ratio.map(|r| r > LDH_RATIO_THRESHOLD),
            ldh_above_twice_uln,
        ];
        if sub_rules.contains(&Some(true)) {
            FluidClass::Exudate
        } else if sub_rules.iter().all(|r| *r == Some(false)) {
            FluidClass::Transudate
        } else {
            FluidClass::Unknown
        }
    };

    debug!(
        "Light's criteria: protein_ratio={:?} ldh_ratio={:?} uln={:?} missing={:?} -> {:?}",
        protein_ratio, ldh_ratio, ldh_above_twice_uln, missing, class
    );

    LightsOutcome {
        protein_ratio,
        ldh_ratio,
        ldh_above_twice_uln,
        missing,
        class,
    }
}
