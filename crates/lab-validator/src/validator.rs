//! Range Validator for Laboratory Values

use crate::error::ValidationError;
use crate::field::LabField;
use serde::{Deserialize, Serialize};

/// Validation configuration
///
/// Inclusive `(min, max)` physiological range per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Serum protein (g/dL)
    pub serum_protein_range: (f64, f64),
    /// Serum albumin (g/dL)
    pub serum_albumin_range: (f64, f64),
    /// Serum LDH (U/L)
    pub serum_ldh_range: (f64, f64),
    /// Upper limit of normal for serum LDH (U/L)
    pub serum_ldh_uln_range: (f64, f64),
    /// Serum creatinine (mg/dL)
    pub serum_creatinine_range: (f64, f64),
    /// Serum hematocrit (%)
    pub serum_hematocrit_range: (f64, f64),
    /// PF protein (g/dL)
    pub pf_protein_range: (f64, f64),
    /// PF albumin (g/dL)
    pub pf_albumin_range: (f64, f64),
    /// PF LDH (U/L)
    pub pf_ldh_range: (f64, f64),
    /// PF creatinine (mg/dL)
    pub pf_creatinine_range: (f64, f64),
    /// PF pH
    pub pf_ph_range: (f64, f64),
    /// PF glucose (mg/dL)
    pub pf_glucose_range: (f64, f64),
    /// PF triglycerides (mg/dL)
    pub pf_triglycerides_range: (f64, f64),
    /// PF cholesterol (mg/dL)
    pub pf_cholesterol_range: (f64, f64),
    /// PF adenosine deaminase (U/L)
    pub pf_ada_range: (f64, f64),
    /// PF hematocrit (%)
    pub pf_hematocrit_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            serum_protein_range: (0.0, 10.0),
            serum_albumin_range: (0.0, 6.0),
            serum_ldh_range: (0.0, 3000.0),
            serum_ldh_uln_range: (100.0, 1000.0),
            serum_creatinine_range: (0.3, 15.0),
            serum_hematocrit_range: (0.0, 60.0),
            pf_protein_range: (0.0, 10.0),
            pf_albumin_range: (0.0, 6.0),
            pf_ldh_range: (0.0, 5000.0),
            pf_creatinine_range: (0.0, 15.0),
            pf_ph_range: (6.5, 8.5),
            pf_glucose_range: (0.0, 500.0),
            pf_triglycerides_range: (0.0, 1000.0),
            pf_cholesterol_range: (0.0, 300.0),
            pf_ada_range: (0.0, 200.0),
            pf_hematocrit_range: (0.0, 60.0),
        }
    }
}

impl ValidationConfig {
    /// Range configured for a field
    pub fn range_for(&self, field: LabField) -> (f64, f64) {
        match field {
            LabField::SerumProtein => self.serum_protein_range,
            LabField::SerumAlbumin => self.serum_albumin_range,
            LabField::SerumLdh => self.serum_ldh_range,
            LabField::SerumLdhUln => self.serum_ldh_uln_range,
            LabField::SerumCreatinine => self.serum_creatinine_range,
            LabField::SerumHematocrit => self.serum_hematocrit_range,
            LabField::PfProtein => self.pf_protein_range,
            LabField::PfAlbumin => self.pf_albumin_range,
            LabField::PfLdh => self.pf_ldh_range,
            LabField::PfCreatinine => self.pf_creatinine_range,
            LabField::PfPh => self.pf_ph_range,
            LabField::PfGlucose => self.pf_glucose_range,
            LabField::PfTriglycerides => self.pf_triglycerides_range,
            LabField::PfCholesterol => self.pf_cholesterol_range,
            LabField::PfAda => self.pf_ada_range,
            LabField::PfHematocrit => self.pf_hematocrit_range,
        }
    }
}

/// Range validator for laboratory fields
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against its configured range
    pub fn validate_range(&self, field: LabField, value: f64) -> Result<(), ValidationError> {
        let (min, max) = self.config.range_for(field);
        if value < min || value > max {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            })
        } else {
            Ok(())
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
