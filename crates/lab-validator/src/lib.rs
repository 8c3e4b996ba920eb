//! Laboratory Input Validation and Normalization
//!
//! Provides the field catalogue, raw-value parsing, and explicit range
//! validation for serum and pleural-fluid measurements.

mod error;
mod field;
mod normalizer;
mod validator;

pub use error::ValidationError;
pub use field::LabField;
pub use normalizer::{parse_raw, FieldReading, NormalizedPanel, Normalizer, RawValue};
pub use validator::{ValidationConfig, Validator};
