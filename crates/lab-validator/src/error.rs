//! Validation Error Types

use crate::field::LabField;
use thiserror::Error;

/// Diagnostics raised while normalizing a raw field value
///
/// A diagnostic never aborts an evaluation; the field is treated as missing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of the configured physiological range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: LabField,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Text that does not parse as a finite number
    #[error("{field} value {raw:?} is not a number")]
    InvalidFormat { field: LabField, raw: String },
}

impl ValidationError {
    /// Field the diagnostic is attached to
    pub fn field(&self) -> LabField {
        match self {
            ValidationError::OutOfRange { field, .. } => *field,
            ValidationError::InvalidFormat { field, .. } => *field,
        }
    }
}
