//! Raw Field Normalization
//!
//! Turns whatever the form supplied for a field into either a validated number
//! or an explicit missing marker. Bad input becomes a diagnostic attached to
//! the field instead of an error for the whole form.

use crate::error::ValidationError;
use crate::field::LabField;
use crate::validator::{ValidationConfig, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Value as supplied by a client for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Already numeric (JSON number)
    Number(f64),
    /// Free text from a form field
    Text(String),
    /// Explicit JSON `null`
    Missing,
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// Parse a raw value without range checking
///
/// Blank text and `null` are missing, not an error.
pub fn parse_raw(field: LabField, raw: &RawValue) -> Result<Option<f64>, ValidationError> {
    let (value, original) = match raw {
        RawValue::Missing => return Ok(None),
        RawValue::Number(value) => (*value, None),
        RawValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            match trimmed.parse::<f64>() {
                Ok(value) => (value, Some(text)),
                Err(_) => {
                    return Err(ValidationError::InvalidFormat {
                        field,
                        raw: text.clone(),
                    })
                }
            }
        }
    };

    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field,
            raw: original.cloned().unwrap_or_else(|| value.to_string()),
        });
    }

    Ok(Some(value))
}

/// Outcome of normalizing a single field
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldReading {
    /// Usable value, `None` when missing or rejected
    pub value: Option<f64>,
    /// Why the supplied value was rejected
    pub diagnostic: Option<ValidationError>,
}

impl FieldReading {
    fn missing() -> Self {
        Self::default()
    }

    fn rejected(diagnostic: ValidationError) -> Self {
        Self {
            value: None,
            diagnostic: Some(diagnostic),
        }
    }

    fn accepted(value: f64) -> Self {
        Self {
            value: Some(value),
            diagnostic: None,
        }
    }
}

/// Normalized form: usable values plus diagnostics in catalogue order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedPanel {
    pub values: BTreeMap<LabField, f64>,
    pub diagnostics: Vec<ValidationError>,
}

impl NormalizedPanel {
    /// Usable value for a field
    pub fn get(&self, field: LabField) -> Option<f64> {
        self.values.get(&field).copied()
    }
}

/// Parses and range-checks raw form values
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    validator: Validator,
}

impl Normalizer {
    /// Create a normalizer with the given ranges
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            validator: Validator::new(config),
        }
    }

    /// Normalize one field; never clamps
    pub fn normalize(&self, field: LabField, raw: Option<&RawValue>) -> FieldReading {
        let Some(raw) = raw else {
            return FieldReading::missing();
        };

        let value = match parse_raw(field, raw) {
            Ok(Some(value)) => value,
            Ok(None) => return FieldReading::missing(),
            Err(err) => {
                warn!("Rejected {}: {}", field, err);
                return FieldReading::rejected(err);
            }
        };

        match self.validator.validate_range(field, value) {
            Ok(()) => FieldReading::accepted(value),
            Err(err) => {
                warn!("Rejected {}: {}", field, err);
                FieldReading::rejected(err)
            }
        }
    }

    /// Normalize a whole form
    pub fn normalize_panel(&self, raw: &BTreeMap<LabField, RawValue>) -> NormalizedPanel {
        let mut panel = NormalizedPanel::default();

        for field in LabField::ALL {
            let reading = self.normalize(field, raw.get(&field));
            if let Some(value) = reading.value {
                panel.values.insert(field, value);
            }
            if let Some(diagnostic) = reading.diagnostic {
                panel.diagnostics.push(diagnostic);
            }
        }

        debug!(
            "Normalized panel: {} values, {} diagnostics",
            panel.values.len(),
            panel.diagnostics.len()
        );
        panel
    }

    /// Underlying range validator
    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}
